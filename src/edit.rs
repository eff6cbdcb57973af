//! Interface boundary for the remote generative image-edit service.
//!
//! The service itself (a network call to a third-party model) lives
//! outside this crate; only its seam is defined here.

use image::DynamicImage;

/// Opaque generative edit collaborator.
///
/// Sends pixel data and a text instruction to an external model and
/// receives a full replacement image. The pipeline never calls this
/// itself: the editor shell invokes it on the unmodified original image
/// only, never on a dithered derivative, and feeds the replacement back
/// in as the new original for subsequent runs.
pub trait GenerativeEdit {
    type Error;

    /// Produce a replacement image for `image` following `instruction`.
    fn edit_image(
        &self,
        image: &DynamicImage,
        instruction: &str,
    ) -> Result<DynamicImage, Self::Error>;
}
