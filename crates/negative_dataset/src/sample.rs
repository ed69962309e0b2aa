use anyhow::{Context, Result};
use tch::Tensor;

/// One training example: an augmented image and its segmentation mask.
///
/// - `image`: `f32` tensor `[3, H, W]`
/// - `mask`: `f32` tensor `[H, W]`; for negative samples every value is zero
///
/// The mask is always built from the transformed image's shape, so the two
/// spatial sizes agree.
#[derive(Debug)]
pub struct Sample {
    pub image: Tensor,
    pub mask: Tensor,
}

/// Creates a shallow clone of the `Sample`
impl Clone for Sample {
    fn clone(&self) -> Self {
        Self {
            image: self.image.shallow_clone(),
            mask: self.mask.shallow_clone(),
        }
    }
}

impl Sample {
    pub fn new(image: Tensor, mask: Tensor) -> Self {
        Self { image, mask }
    }

    /// Spatial size `(height, width)` of the image.
    pub fn image_size(&self) -> Result<(i64, i64)> {
        let (_channels, height, width) = self
            .image
            .size3()
            .context("Sample image must be a 3D [C, H, W] tensor")?;
        Ok((height, width))
    }

    /// Splits into `(image, mask)`, the pair a training loop consumes.
    pub fn into_pair(self) -> (Tensor, Tensor) {
        (self.image, self.mask)
    }
}
