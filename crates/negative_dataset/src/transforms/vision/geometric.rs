use crate::transforms::Transform;
use anyhow::{bail, Result};
use image::{imageops, DynamicImage, RgbImage};

// ============================================================================
// EnsureRgb
// ============================================================================

/// Narrows a decoded image to 8-bit, 3-channel RGB.
///
/// In strict mode (the default) any image whose color type does not have
/// exactly three channels is rejected, since the HSV stage is only defined for
/// three channels. With `coerce` enabled, grayscale and RGBA inputs are
/// converted instead.
#[derive(Debug, Clone, Default)]
pub struct EnsureRgb {
    coerce: bool,
}

impl EnsureRgb {
    pub fn strict() -> Self {
        Self { coerce: false }
    }

    pub fn coerce() -> Self {
        Self { coerce: true }
    }
}

impl Transform<DynamicImage, RgbImage> for EnsureRgb {
    fn apply(&self, img: DynamicImage) -> Result<RgbImage> {
        match img {
            DynamicImage::ImageRgb8(rgb) => Ok(rgb),
            other if self.coerce || other.color().channel_count() == 3 => Ok(other.to_rgb8()),
            other => bail!(
                "Expected a 3-channel image, got {:?} with {} channel(s)",
                other.color(),
                other.color().channel_count()
            ),
        }
    }
}

// ============================================================================
// Flip
// ============================================================================

/// Mirror applied to an image.
///
/// Augmentation parameters are drawn as an index: `0` vertical, `1`
/// horizontal, `2` both, anything else leaves the image alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipMode {
    /// Upside down (rows reversed).
    Vertical,
    /// Left-right mirror (columns reversed).
    Horizontal,
    Both,
    Identity,
}

impl FlipMode {
    pub const ALL: [FlipMode; 4] = [
        FlipMode::Vertical,
        FlipMode::Horizontal,
        FlipMode::Both,
        FlipMode::Identity,
    ];
}

impl From<u8> for FlipMode {
    fn from(value: u8) -> Self {
        match value {
            0 => FlipMode::Vertical,
            1 => FlipMode::Horizontal,
            2 => FlipMode::Both,
            _ => FlipMode::Identity,
        }
    }
}

/// Flips `image` according to `mode`. `FlipMode::Both` is a vertical flip
/// followed by a horizontal one.
pub fn flip(image: &RgbImage, mode: impl Into<FlipMode>) -> RgbImage {
    match mode.into() {
        FlipMode::Vertical => imageops::flip_vertical(image),
        FlipMode::Horizontal => imageops::flip_horizontal(image),
        FlipMode::Both => imageops::flip_horizontal(&imageops::flip_vertical(image)),
        FlipMode::Identity => image.clone(),
    }
}

/// [`flip`] as a pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct Flip {
    mode: FlipMode,
}

impl Flip {
    pub fn new(mode: FlipMode) -> Self {
        Self { mode }
    }
}

impl Transform<RgbImage, RgbImage> for Flip {
    fn apply(&self, img: RgbImage) -> Result<RgbImage> {
        Ok(match self.mode {
            FlipMode::Identity => img,
            mode => flip(&img, mode),
        })
    }
}

// ============================================================================
// Rotate90
// ============================================================================

/// Rotates by `quarter_turns * 90` degrees counter-clockwise. An odd number of
/// turns swaps width and height.
#[derive(Debug, Clone, Copy)]
pub struct Rotate90 {
    quarter_turns: u8,
}

impl Rotate90 {
    pub fn new(quarter_turns: u8) -> Self {
        Self {
            quarter_turns: quarter_turns % 4,
        }
    }
}

impl Transform<RgbImage, RgbImage> for Rotate90 {
    fn apply(&self, img: RgbImage) -> Result<RgbImage> {
        // imageops rotates clockwise
        Ok(match self.quarter_turns {
            0 => img,
            1 => imageops::rotate270(&img),
            2 => imageops::rotate180(&img),
            _ => imageops::rotate90(&img),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbaImage};

    /// 3 wide, 2 tall, every pixel distinct.
    fn numbered_image() -> RgbImage {
        RgbImage::from_fn(3, 2, |x, y| {
            let v = (y * 3 + x) as u8;
            Rgb([v, v * 10, 200 - v])
        })
    }

    #[test]
    fn test_flip_none_is_identity() {
        let img = numbered_image();
        assert_eq!(flip(&img, 3u8), img);
        assert_eq!(flip(&img, 17u8), img);
    }

    #[test]
    fn test_flip_both_is_vertical_then_horizontal() {
        let img = numbered_image();
        let composed = flip(&flip(&img, 0u8), 1u8);
        assert_eq!(flip(&img, 2u8), composed);
    }

    #[test]
    fn test_flip_directions() {
        let img = numbered_image();

        let vertical = flip(&img, FlipMode::Vertical);
        assert_eq!(vertical.get_pixel(0, 0), img.get_pixel(0, 1));

        let horizontal = flip(&img, FlipMode::Horizontal);
        assert_eq!(horizontal.get_pixel(0, 0), img.get_pixel(2, 0));
    }

    #[test]
    fn test_rotate_counter_clockwise() -> Result<()> {
        // left = red, right = blue; after a CCW quarter turn blue is on top
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));

        let rotated = Rotate90::new(1).apply(img)?;
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(rotated.get_pixel(0, 1), &Rgb([255, 0, 0]));
        Ok(())
    }

    #[test]
    fn test_four_turns_round_trip() -> Result<()> {
        let img = numbered_image();
        let rotated = Rotate90::new(1)
            .then(Rotate90::new(1))
            .then(Rotate90::new(2))
            .apply(img.clone())?;
        assert_eq!(rotated, img);
        assert_eq!(Rotate90::new(4).apply(img.clone())?, img);
        Ok(())
    }

    #[test]
    fn test_ensure_rgb_rejects_other_channel_counts() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([9])));
        assert!(EnsureRgb::strict().apply(gray).is_err());

        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        let err = EnsureRgb::strict().apply(rgba).unwrap_err();
        assert!(err.to_string().contains("3-channel"));
    }

    #[test]
    fn test_ensure_rgb_coerce() -> Result<()> {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([9])));
        let rgb = EnsureRgb::coerce().apply(gray)?;
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([9, 9, 9]));
        Ok(())
    }
}
