//! Raster engraving preparation module
//!
//! Converts a decoded raster image into an engraving-ready binary or
//! reduced-tone raster suitable for a laser. The pipeline is a strict
//! linear sequence, run once per invocation with no persistent state:
//!
//! 1. Rescale to the target resolution (96 dpi baseline)
//! 2. Apply brightness/contrast per RGB channel
//! 3. Reduce to single-channel intensity, optionally inverted
//! 4. Run one of eight halftoning/dithering algorithms
//! 5. Encode the result as PNG

mod dither;
mod gray;
mod halftone;
mod sketch;

use std::io::Cursor;

use image::{
    DynamicImage, GenericImageView, ImageFormat, ImageReader, RgbaImage, imageops::FilterType,
};
use rand::Rng;

use crate::error::EngraveError;

pub use dither::{apply_error_diffusion, apply_ordered, apply_threshold};
pub use gray::{GrayBuffer, apply_brightness_contrast};
pub use halftone::{apply_halftone, apply_line_engraving, apply_pop_art};
pub use sketch::{apply_grunge, apply_pencil_sketch};

/// Baseline pixel density the resolution setting is measured against.
pub const BASE_DPI: u32 = 96;

/// Algorithm selection together with its parameters.
///
/// Exactly one algorithm runs per invocation; modeling the parameters as
/// a sum type means there are no stale fields from other algorithms to
/// validate defensively.
#[derive(Debug, Clone, PartialEq)]
pub enum DitherMode {
    /// Binary cut at a fixed intensity; an exact match maps to white.
    Threshold { threshold: u8 },
    /// Floyd-Steinberg error diffusion over 2..=16 evenly spaced levels.
    ErrorDiffusion { palette_levels: u8 },
    /// Ordered dithering against a tiled Bayer matrix (2, 4 or 8; other
    /// sizes fall back to 4).
    Ordered { matrix_size: u32 },
    /// Variable-radius dots, one per block of 2..=20 pixels.
    Halftone { dot_size: u32 },
    /// Posterized dots in four fixed radius tiers, spacing 2..=20.
    PopArt { spacing: u32 },
    /// Noise-threshold texturing, intensity 1..=20 (non-deterministic).
    Grunge { intensity: u32 },
    /// Horizontal bands of 1..=10 rows with darkness-scaled thickness.
    LineEngraving { line_spacing: u32 },
    /// Dodge-blend sketch shading; blur radius 2..=20, stroke weight
    /// 0.5..=3.0.
    PencilSketch { blur_radius: u32, stroke_weight: f32 },
}

/// Configuration snapshot for one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngravingSettings {
    /// Active dithering algorithm and its parameters.
    pub mode: DitherMode,
    /// Output density in dots-per-inch-equivalent, 96..=1000. The 96 dpi
    /// baseline keeps the source pixel grid unchanged.
    pub resolution: u32,
    /// Brightness offset, -100..=100.
    pub brightness: i32,
    /// Contrast offset, -100..=100.
    pub contrast: i32,
    /// Invert intensity after grayscale reduction, before dithering.
    pub invert: bool,
}

impl Default for EngravingSettings {
    fn default() -> Self {
        Self {
            mode: DitherMode::ErrorDiffusion { palette_levels: 2 },
            resolution: 300,
            brightness: 0,
            contrast: 0,
            invert: false,
        }
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), EngraveError> {
    if value < min || value > max {
        return Err(EngraveError::InvalidParameter {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl EngravingSettings {
    /// Validate every parameter against its documented range.
    ///
    /// The ordered-dither matrix size is deliberately not checked:
    /// unsupported sizes fall back to the 4x4 matrix in the lookup
    /// instead of failing the invocation.
    pub fn validate(&self) -> Result<(), EngraveError> {
        check_range("resolution", self.resolution as f64, 96.0, 1000.0)?;
        check_range("brightness", self.brightness as f64, -100.0, 100.0)?;
        check_range("contrast", self.contrast as f64, -100.0, 100.0)?;
        match self.mode {
            DitherMode::Threshold { .. } | DitherMode::Ordered { .. } => Ok(()),
            DitherMode::ErrorDiffusion { palette_levels } => {
                check_range("palette_levels", palette_levels as f64, 2.0, 16.0)
            }
            DitherMode::Halftone { dot_size } => check_range("dot_size", dot_size as f64, 2.0, 20.0),
            DitherMode::PopArt { spacing } => check_range("spacing", spacing as f64, 2.0, 20.0),
            DitherMode::Grunge { intensity } => check_range("intensity", intensity as f64, 1.0, 20.0),
            DitherMode::LineEngraving { line_spacing } => {
                check_range("line_spacing", line_spacing as f64, 1.0, 10.0)
            }
            DitherMode::PencilSketch {
                blur_radius,
                stroke_weight,
            } => {
                check_range("blur_radius", blur_radius as f64, 2.0, 20.0)?;
                check_range("stroke_weight", stroke_weight as f64, 0.5, 3.0)
            }
        }
    }
}

/// Material presets carried over from the interactive tool.
///
/// Each maps to the resolution/algorithm combination that engraves well
/// on that surface; `Custom` applies no overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Wood,
    Acrylic,
    Leather,
    AnodizedMetal,
    Glass,
    Custom,
}

impl Material {
    /// Settings for this material, starting from the defaults.
    pub fn preset(self) -> EngravingSettings {
        let mut settings = EngravingSettings::default();
        match self {
            Material::Wood => {
                settings.resolution = 300;
                settings.mode = DitherMode::ErrorDiffusion { palette_levels: 2 };
            }
            Material::Acrylic => {
                settings.resolution = 600;
                settings.mode = DitherMode::Threshold { threshold: 128 };
            }
            Material::Leather => {
                settings.resolution = 250;
                settings.mode = DitherMode::ErrorDiffusion { palette_levels: 2 };
            }
            Material::AnodizedMetal => {
                settings.resolution = 1000;
                settings.mode = DitherMode::Threshold { threshold: 128 };
            }
            Material::Glass => {
                settings.resolution = 500;
                settings.mode = DitherMode::ErrorDiffusion { palette_levels: 2 };
                settings.invert = true;
            }
            Material::Custom => {}
        }
        settings
    }
}

/// Result of an engraving run: encoded PNG bytes plus output dimensions.
pub struct EngraveResult {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Run the full pipeline on encoded image bytes and produce PNG output.
pub fn engrave_image(
    image_bytes: &[u8],
    settings: &EngravingSettings,
) -> Result<EngraveResult, EngraveError> {
    let img = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()
        .map_err(|e| EngraveError::Decode(format!("failed to guess image format: {}", e)))?
        .decode()
        .map_err(|e| EngraveError::Decode(e.to_string()))?;

    let output = engrave_dynamic_image(&img, settings)?;
    let (width, height) = output.dimensions();
    let png = encode_png(&output)?;
    Ok(EngraveResult { png, width, height })
}

/// Run the pipeline on a decoded image with a thread-local rng.
pub fn engrave_dynamic_image(
    img: &DynamicImage,
    settings: &EngravingSettings,
) -> Result<RgbaImage, EngraveError> {
    engrave_dynamic_image_with_rng(img, settings, &mut rand::thread_rng())
}

/// Run the pipeline on a decoded image with an injected random source.
///
/// `rng` feeds the Grunge noise only; every other algorithm is
/// deterministic for a fixed input and settings, so repeated runs produce
/// byte-identical output.
pub fn engrave_dynamic_image_with_rng<R: Rng>(
    img: &DynamicImage,
    settings: &EngravingSettings,
    rng: &mut R,
) -> Result<RgbaImage, EngraveError> {
    settings.validate()?;

    let mut rgba = rescale(img, settings.resolution)?;
    apply_brightness_contrast(&mut rgba, settings.brightness, settings.contrast);

    let mut gray = GrayBuffer::from_rgba(&rgba);
    if settings.invert {
        gray.invert();
    }

    let output = match settings.mode {
        DitherMode::Threshold { threshold } => {
            apply_threshold(&mut gray, threshold);
            gray.to_rgba()
        }
        DitherMode::ErrorDiffusion { palette_levels } => {
            apply_error_diffusion(&mut gray, palette_levels);
            gray.to_rgba()
        }
        DitherMode::Ordered { matrix_size } => {
            apply_ordered(&mut gray, matrix_size);
            gray.to_rgba()
        }
        DitherMode::Halftone { dot_size } => apply_halftone(&gray, dot_size),
        DitherMode::PopArt { spacing } => apply_pop_art(&gray, spacing),
        DitherMode::Grunge { intensity } => {
            apply_grunge(&mut gray, intensity, rng);
            gray.to_rgba()
        }
        DitherMode::LineEngraving { line_spacing } => apply_line_engraving(&gray, line_spacing),
        DitherMode::PencilSketch {
            blur_radius,
            stroke_weight,
        } => {
            apply_pencil_sketch(&mut gray, blur_radius, stroke_weight);
            gray.to_rgba()
        }
    };

    Ok(output)
}

/// Resample to the pixel grid implied by `resolution` against the 96 dpi
/// baseline: `floor(srcDim * resolution / 96)` in each dimension.
///
/// Bilinear resampling keeps the result deterministic for a fixed input;
/// a same-size rescale is skipped entirely so it is an exact no-op.
fn rescale(img: &DynamicImage, resolution: u32) -> Result<RgbaImage, EngraveError> {
    let (src_w, src_h) = img.dimensions();
    let scale = resolution as f64 / BASE_DPI as f64;
    let width = (src_w as f64 * scale).floor() as u32;
    let height = (src_h as f64 * scale).floor() as u32;
    if width == 0 || height == 0 {
        return Err(EngraveError::InvalidDimensions {
            width,
            height,
            resolution,
        });
    }
    if (width, height) == (src_w, src_h) {
        return Ok(img.to_rgba8());
    }
    Ok(img.resize_exact(width, height, FilterType::Triangle).to_rgba8())
}

/// Encode the final RGBA buffer as PNG, same pixel grid as produced by
/// the rescaler.
fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, EngraveError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| EngraveError::Encode(e.to_string()))?;
    Ok(bytes)
}
