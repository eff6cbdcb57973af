//! # engrave-tools
//!
//! A Rust library for preparing raster images for laser engraving.
//!
//! ## Features
//!
//! - **Tone pipeline**: resolution rescaling, brightness/contrast,
//!   grayscale reduction with optional inversion
//! - **Eight reduction algorithms**: threshold, Floyd-Steinberg error
//!   diffusion, ordered (Bayer) dithering, halftone dots, pop-art dots,
//!   grunge noise texturing, line engraving, and pencil sketch
//!
//! ## Example
//!
//! ```rust,ignore
//! use engrave_tools::engrave::{engrave_image, EngravingSettings};
//!
//! let bytes = std::fs::read("input.png").unwrap();
//! let result = engrave_image(&bytes, &EngravingSettings::default()).unwrap();
//! std::fs::write("output.png", result.png).unwrap();
//! ```
//!
//! ## Example - Material presets
//!
//! ```rust,ignore
//! use engrave_tools::engrave::{engrave_image, Material};
//!
//! let bytes = std::fs::read("input.png").unwrap();
//! let result = engrave_image(&bytes, &Material::Acrylic.preset()).unwrap();
//! std::fs::write("output.png", result.png).unwrap();
//! ```

pub mod edit;
pub mod engrave;
pub mod error;

// Re-export commonly used items
pub use edit::GenerativeEdit;
pub use engrave::{
    DitherMode, EngraveResult, EngravingSettings, GrayBuffer, Material, engrave_dynamic_image,
    engrave_dynamic_image_with_rng, engrave_image,
};
pub use error::EngraveError;
