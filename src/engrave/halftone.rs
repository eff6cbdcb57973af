//! Block-drawing tone reductions: halftone dots, posterized pop-art dots,
//! and banded line engraving.
//!
//! Unlike the per-pixel algorithms these paint geometry onto an initially
//! white, fully opaque surface and return it directly.

use image::{Rgba, RgbaImage};

use super::gray::GrayBuffer;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn white_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, WHITE)
}

/// Average intensity over the block starting at `(x0, y0)`, clipped to
/// the buffer edges.
fn block_average(gray: &GrayBuffer, x0: u32, y0: u32, size: u32) -> f32 {
    let mut total = 0.0;
    let mut count = 0u32;
    for y in y0..(y0 + size).min(gray.height()) {
        for x in x0..(x0 + size).min(gray.width()) {
            total += gray.get(x, y);
            count += 1;
        }
    }
    total / count as f32
}

/// Rasterize a filled black circle, clipped to the image bounds.
///
/// A pixel is painted when its center falls within `radius` of
/// `(cx, cy)`.
fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let r_sq = radius * radius;
    let x1 = ((cx + radius).ceil() as i64).min(img.width() as i64 - 1);
    let y1 = ((cy + radius).ceil() as i64).min(img.height() as i64 - 1);
    if x1 < 0 || y1 < 0 {
        return;
    }
    let x0 = ((cx - radius).floor() as i64).max(0) as u32;
    let y0 = ((cy - radius).floor() as i64).max(0) as u32;
    for y in y0..=y1 as u32 {
        for x in x0..=x1 as u32 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r_sq {
                img.put_pixel(x, y, BLACK);
            }
        }
    }
}

/// Classic halftone: one filled circle per `dot_size` block, with radius
/// `(1 - avg/255) * (dot_size/2) * 1.414`.
///
/// The 1.414 factor lets a fully dark dot reach the block corners, so
/// solid black input produces solid black output.
pub fn apply_halftone(gray: &GrayBuffer, dot_size: u32) -> RgbaImage {
    let mut out = white_surface(gray.width(), gray.height());
    let size = dot_size as f32;
    for y in (0..gray.height()).step_by(dot_size as usize) {
        for x in (0..gray.width()).step_by(dot_size as usize) {
            let avg = block_average(gray, x, y, dot_size);
            let radius = (1.0 - avg / 255.0) * (size / 2.0) * 1.414;
            fill_circle(&mut out, x as f32 + size / 2.0, y as f32 + size / 2.0, radius);
        }
    }
    out
}

/// Posterized halftone: block averages snap to four discrete radius tiers
/// at the fixed breakpoints 64, 128 and 192.
pub fn apply_pop_art(gray: &GrayBuffer, spacing: u32) -> RgbaImage {
    let mut out = white_surface(gray.width(), gray.height());
    let s = spacing as f32;
    for y in (0..gray.height()).step_by(spacing as usize) {
        for x in (0..gray.width()).step_by(spacing as usize) {
            let avg = block_average(gray, x, y, spacing);
            let radius = if avg < 64.0 {
                s * 0.45
            } else if avg < 128.0 {
                s * 0.35
            } else if avg < 192.0 {
                s * 0.20
            } else {
                0.0
            };
            if radius > 0.0 {
                fill_circle(&mut out, x as f32 + s / 2.0, y as f32 + s / 2.0, radius);
            }
        }
    }
    out
}

/// Banded line engraving: rows are grouped into bands of `line_spacing`
/// pixels; each column in a band gets a vertical run whose thickness
/// scales with the band-average darkness, centered within the band.
pub fn apply_line_engraving(gray: &GrayBuffer, line_spacing: u32) -> RgbaImage {
    let mut out = white_surface(gray.width(), gray.height());
    for y in (0..gray.height()).step_by(line_spacing as usize) {
        for x in 0..gray.width() {
            let mut total = 0.0;
            let mut count = 0u32;
            for row in y..(y + line_spacing).min(gray.height()) {
                total += gray.get(x, row);
                count += 1;
            }
            let avg = total / count as f32;
            let thickness =
                (((1.0 - avg / 255.0) * line_spacing as f32).round() as u32).min(line_spacing);
            if thickness == 0 {
                continue;
            }
            let line_y = y + (line_spacing - thickness) / 2;
            for row in line_y..(line_y + thickness).min(gray.height()) {
                out.put_pixel(x, row, BLACK);
            }
        }
    }
    out
}
