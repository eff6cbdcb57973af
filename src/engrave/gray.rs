//! Grayscale intermediate buffer and tone adjustment.
//!
//! The pipeline reduces the rescaled RGBA image to a single flat `f32`
//! intensity buffer that every dithering algorithm consumes. Brightness
//! and contrast are applied to the RGB channels before the reduction.

use image::{Rgba, RgbaImage};

/// Dense grayscale intensity buffer.
///
/// Stores one `f32` per pixel in row-major order (`y * width + x`).
/// Values are nominally in `[0, 255]`; error diffusion may push individual
/// entries outside that range transiently, so conversion back to pixels
/// clamps every value.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl GrayBuffer {
    /// Reduce an RGBA image to single-channel intensity.
    ///
    /// Uses the 0.299/0.587/0.114 luma weights in integer-scaled form
    /// (`(299R + 587G + 114B) / 1000`) so that equal channels reduce
    /// exactly: (128,128,128) becomes 128.0, not a rounding neighbor.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let data = img
            .pixels()
            .map(|&Rgba([r, g, b, _])| {
                (299.0 * r as f32 + 587.0 * g as f32 + 114.0 * b as f32) / 1000.0
            })
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Buffer of the given dimensions with every value set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let i = self.idx(x, y);
        self.data[i] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Replace every value with `255 - value`.
    ///
    /// Runs after grayscale reduction and before any dithering, so
    /// algorithms reasoning about "darker = more mark" work for both
    /// polarities.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = 255.0 - *v;
        }
    }

    /// Write the buffer back to an opaque RGBA image.
    ///
    /// Every value is clamped to `[0, 255]` and alpha is forced to 255.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (pixel, &v) in img.pixels_mut().zip(self.data.iter()) {
            let value = v.clamp(0.0, 255.0).round() as u8;
            *pixel = Rgba([value, value, value, 255]);
        }
        img
    }
}

/// Apply brightness then contrast to each RGB channel, in place.
///
/// For brightness `B` and contrast `C` (both in -100..=100):
///
/// ```text
/// factor = (259 * (C + 255)) / (255 * (259 - C))
/// v' = factor * ((v + B) - 128) + 128
/// ```
///
/// clamped to `[0, 255]` per channel. Alpha is untouched. `B = C = 0` is
/// an exact identity, so the pipeline can run this stage unconditionally.
pub fn apply_brightness_contrast(img: &mut RgbaImage, brightness: i32, contrast: i32) {
    let factor = (259.0 * (contrast as f32 + 255.0)) / (255.0 * (259.0 - contrast as f32));
    let offset = brightness as f32;
    for pixel in img.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let adjust = |v: u8| -> u8 {
            let v = factor * ((v as f32 + offset) - 128.0) + 128.0;
            v.clamp(0.0, 255.0).round() as u8
        };
        *pixel = Rgba([adjust(r), adjust(g), adjust(b), a]);
    }
}
