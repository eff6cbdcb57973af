//! Per-pixel tone reduction: threshold cut, Floyd-Steinberg error
//! diffusion, and ordered (Bayer) dithering.
//!
//! All three mutate the grayscale buffer in place; the pipeline converts
//! the result back to RGBA afterwards.

use super::gray::GrayBuffer;

/// Binary threshold cut.
///
/// Values below `threshold` go to 0; everything else, including an exact
/// match, goes to 255.
pub fn apply_threshold(gray: &mut GrayBuffer, threshold: u8) {
    let cut = threshold as f32;
    for v in gray.as_mut_slice() {
        *v = if *v < cut { 0.0 } else { 255.0 };
    }
}

/// Floyd-Steinberg error diffusion onto `palette_levels` evenly spaced
/// gray levels (`step = 255 / (levels - 1)`).
///
/// The scan is strictly row-major, left-to-right and top-to-bottom: later
/// pixels read values already updated by earlier error pushes, so the
/// order is part of the output contract. Error weights are 7/16 right,
/// 3/16 below-left, 5/16 below, 1/16 below-right; out-of-bounds neighbors
/// are skipped and their share of the error is dropped at the edge.
pub fn apply_error_diffusion(gray: &mut GrayBuffer, palette_levels: u8) {
    let step = 255.0 / (palette_levels as f32 - 1.0);
    let (width, height) = (gray.width(), gray.height());

    for y in 0..height {
        for x in 0..width {
            let old = gray.get(x, y);
            let new = (old / step).round() * step;
            let err = old - new;
            gray.set(x, y, new);

            if x + 1 < width {
                let v = gray.get(x + 1, y);
                gray.set(x + 1, y, v + err * 7.0 / 16.0);
            }
            if y + 1 < height {
                if x >= 1 {
                    let v = gray.get(x - 1, y + 1);
                    gray.set(x - 1, y + 1, v + err * 3.0 / 16.0);
                }
                let v = gray.get(x, y + 1);
                gray.set(x, y + 1, v + err * 5.0 / 16.0);
                if x + 1 < width {
                    let v = gray.get(x + 1, y + 1);
                    gray.set(x + 1, y + 1, v + err * 1.0 / 16.0);
                }
            }
        }
    }
}

const BAYER_2: [[u32; 2]; 2] = [[0, 2], [3, 1]];

const BAYER_4: [[u32; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

const BAYER_8: [[u32; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Threshold for pixel `(x, y)` from the tiled Bayer matrix of the given
/// size.
///
/// Sizes other than 2, 4 and 8 fall back to the 4x4 matrix. The fallback
/// is a documented lookup policy, not an error path.
fn bayer_threshold(matrix_size: u32, x: u32, y: u32) -> f32 {
    match matrix_size {
        2 => BAYER_2[(y % 2) as usize][(x % 2) as usize] as f32 / 4.0 * 255.0,
        8 => BAYER_8[(y % 8) as usize][(x % 8) as usize] as f32 / 64.0 * 255.0,
        _ => BAYER_4[(y % 4) as usize][(x % 4) as usize] as f32 / 16.0 * 255.0,
    }
}

/// Ordered (Bayer) dithering: compare each pixel against the tiled
/// threshold matrix; below goes to 0, everything else to 255.
pub fn apply_ordered(gray: &mut GrayBuffer, matrix_size: u32) {
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            let value = if gray.get(x, y) < bayer_threshold(matrix_size, x, y) {
                0.0
            } else {
                255.0
            };
            gray.set(x, y, value);
        }
    }
}
