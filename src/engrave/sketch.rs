//! Texture-style reductions: grunge noise thresholding and the
//! dodge-blend pencil sketch.

use rand::Rng;

use super::gray::GrayBuffer;

/// Noise-threshold texturing.
///
/// Each pixel gets independent uniform noise in `±(intensity * 3)` added
/// before a fixed binarization at 128. This is the one intentionally
/// non-deterministic algorithm in the catalog; the noise source is
/// injected so callers and tests can seed it.
pub fn apply_grunge<R: Rng>(gray: &mut GrayBuffer, intensity: u32, rng: &mut R) {
    let amplitude = intensity as f32 * 6.0;
    for v in gray.as_mut_slice() {
        let noise = (rng.r#gen::<f32>() - 0.5) * amplitude;
        *v = if *v + noise < 128.0 { 0.0 } else { 255.0 };
    }
}

/// Build a normalized 1D Gaussian kernel truncated at three sigma.
fn gaussian_taps(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as i64;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Separable Gaussian blur with clamp-to-edge sampling.
fn gaussian_blur(src: &GrayBuffer, sigma: f32) -> GrayBuffer {
    let taps = gaussian_taps(sigma);
    let radius = (taps.len() / 2) as i64;
    let (width, height) = (src.width() as i64, src.height() as i64);

    let mut horizontal = GrayBuffer::filled(src.width(), src.height(), 0.0);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = (x + k as i64 - radius).clamp(0, width - 1);
                acc += tap * src.get(sx as u32, y as u32);
            }
            horizontal.set(x as u32, y as u32, acc);
        }
    }

    let mut out = GrayBuffer::filled(src.width(), src.height(), 0.0);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = (y + k as i64 - radius).clamp(0, height - 1);
                acc += tap * horizontal.get(x as u32, sy as u32);
            }
            out.set(x as u32, y as u32, acc);
        }
    }
    out
}

/// Dodge-blend pencil sketch.
///
/// Blurs an inverted copy of the buffer (sigma = `blur_radius / 2`),
/// dodge-blends it over the original, then shapes the tone curve with a
/// stroke-weight power before clamping:
///
/// ```text
/// blend = bottom == 255 ? 255 : min(255, bottom * 255 / (255 - top))
/// final = 255 - (255 - blend)^stroke_weight
/// ```
///
/// The dodge is degenerate when the blurred layer saturates at 255: black
/// stays black, anything brighter saturates to white.
pub fn apply_pencil_sketch(gray: &mut GrayBuffer, blur_radius: u32, stroke_weight: f32) {
    let mut inverted = gray.clone();
    inverted.invert();
    let blurred = gaussian_blur(&inverted, blur_radius as f32 / 2.0);

    for (v, &top) in gray.as_mut_slice().iter_mut().zip(blurred.as_slice()) {
        let bottom = *v;
        let blend = if bottom >= 255.0 {
            255.0
        } else if top >= 255.0 {
            if bottom > 0.0 { 255.0 } else { 0.0 }
        } else {
            (bottom * 255.0 / (255.0 - top)).min(255.0)
        };
        *v = (255.0 - (255.0 - blend).powf(stroke_weight)).clamp(0.0, 255.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_grunge_binarizes() {
        let mut gray = GrayBuffer::filled(16, 16, 128.0);
        let mut rng = StdRng::seed_from_u64(7);
        apply_grunge(&mut gray, 20, &mut rng);
        assert!(gray.as_slice().iter().all(|&v| v == 0.0 || v == 255.0));
    }

    #[test]
    fn test_grunge_seeded_runs_match() {
        let mut a = GrayBuffer::filled(16, 16, 128.0);
        let mut b = GrayBuffer::filled(16, 16, 128.0);
        apply_grunge(&mut a, 10, &mut StdRng::seed_from_u64(42));
        apply_grunge(&mut b, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b, "Identical seeds must produce identical output");
    }

    #[test]
    fn test_grunge_small_noise_cannot_flip_extremes() {
        // intensity 1 -> noise within +/-3, far from the 128 threshold
        let mut white = GrayBuffer::filled(8, 8, 255.0);
        apply_grunge(&mut white, 1, &mut StdRng::seed_from_u64(1));
        assert!(white.as_slice().iter().all(|&v| v == 255.0));

        let mut black = GrayBuffer::filled(8, 8, 0.0);
        apply_grunge(&mut black, 1, &mut StdRng::seed_from_u64(1));
        assert!(black.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_gaussian_taps_normalized_and_symmetric() {
        let taps = gaussian_taps(2.0);
        assert_eq!(taps.len(), 13, "3 sigma truncation gives radius 6");
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "Kernel must be normalized");
        for i in 0..taps.len() / 2 {
            assert_eq!(taps[i], taps[taps.len() - 1 - i]);
        }
    }

    #[test]
    fn test_gaussian_blur_preserves_uniform() {
        let gray = GrayBuffer::filled(10, 10, 90.0);
        let blurred = gaussian_blur(&gray, 2.0);
        for &v in blurred.as_slice() {
            assert!((v - 90.0).abs() < 1e-3, "Uniform input must stay uniform");
        }
    }

    #[test]
    fn test_gaussian_blur_smooths_spike() {
        let mut gray = GrayBuffer::filled(9, 9, 0.0);
        gray.set(4, 4, 255.0);
        let blurred = gaussian_blur(&gray, 1.0);
        assert!(blurred.get(4, 4) < 255.0, "Peak must spread out");
        assert!(blurred.get(3, 4) > 0.0, "Neighbors must pick up energy");
        assert!(blurred.get(4, 4) > blurred.get(3, 4));
    }

    #[test]
    fn test_pencil_sketch_white_stays_white() {
        let mut gray = GrayBuffer::filled(8, 8, 255.0);
        apply_pencil_sketch(&mut gray, 4, 1.5);
        assert!(gray.as_slice().iter().all(|&v| v == 255.0));
    }

    #[test]
    fn test_pencil_sketch_black_stays_black() {
        let mut gray = GrayBuffer::filled(8, 8, 0.0);
        apply_pencil_sketch(&mut gray, 4, 1.5);
        assert!(gray.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_pencil_sketch_output_in_range() {
        let mut gray = GrayBuffer::filled(12, 12, 0.0);
        for y in 0..12 {
            for x in 0..12 {
                gray.set(x, y, (x * 21) as f32);
            }
        }
        apply_pencil_sketch(&mut gray, 6, 3.0);
        assert!(
            gray.as_slice().iter().all(|&v| (0.0..=255.0).contains(&v)),
            "Stroke weight powers must be clamped"
        );
    }
}
