use crate::transforms::Transform;
use anyhow::{ensure, Context, Result};
use image::RgbImage;
use tch::{Kind, Tensor};

// ============================================================================
// ToTensor
// ============================================================================

/// Converts an RGB image to a channel-first `f32` tensor of shape `[3, H, W]`.
///
/// Pixel values keep their 0..255 scale; rescaling is left to
/// [`NormalizeRange`](super::NormalizeRange) when a pipeline wants it.
///
/// # Example
/// ```ignore
/// let tensor = ToTensor.apply(rgb)?;
/// assert_eq!(tensor.size(), vec![3, rgb.height() as i64, rgb.width() as i64]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToTensor;

impl Transform<RgbImage, Tensor> for ToTensor {
    fn apply(&self, img: RgbImage) -> Result<Tensor> {
        let (width, height) = img.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Image dimensions must be positive (got {}x{})",
            width,
            height
        );

        // HWC interleaved -> CHW planar
        Tensor::from_slice(img.as_raw())
            .reshape(&[height as i64, width as i64, 3])
            .permute(&[2, 0, 1])
            .f_to_kind(Kind::Float)
            .map(|t| t.contiguous())
            .context("Failed to convert image to a float tensor")
    }
}

/// An all-zero `f32` mask `[H, W]` matching the spatial size of a `[C, H, W]`
/// image tensor, on the same device.
pub fn zero_mask(image: &Tensor) -> Result<Tensor> {
    let (_channels, height, width) = image
        .size3()
        .context("Mask needs a 3D [C, H, W] image tensor")?;
    Ok(Tensor::zeros(&[height, width], (Kind::Float, image.device())))
}
