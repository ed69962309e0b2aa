use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{Rgb, RgbImage};
use tch::Tensor;

// ============================================================================
// HSV conversion
// ============================================================================

/// Converts one RGB pixel to `[hue, saturation, value]`.
///
/// Hue is in degrees `[0, 360)`. Saturation and value use the 8-bit pixel
/// scale `[0, 255]` and are kept unrounded, so a round trip through
/// [`hsv_to_rgb`] reproduces the input exactly.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [f32; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max > 0.0 { 255.0 * delta / max } else { 0.0 };
    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        let h = 60.0 * (g - b) / delta;
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    [hue, saturation, max]
}

/// Inverse of [`rgb_to_hsv`]. Channels are rounded and clamped to `[0, 255]`.
pub fn hsv_to_rgb([hue, saturation, value]: [f32; 3]) -> Rgb<u8> {
    let chroma = value * saturation / 255.0;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_u8 = |c: f32| (c + m).round().clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

// ============================================================================
// ChangeHsv
// ============================================================================

/// Raises saturation by `saturation` and value by `brightness` on every pixel,
/// saturating both at 255. Hue is untouched.
pub fn change_hsv(image: &RgbImage, saturation: u8, brightness: u8) -> RgbImage {
    let (sat, bright) = (f32::from(saturation), f32::from(brightness));
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [h, s, v] = rgb_to_hsv(*image.get_pixel(x, y));
        hsv_to_rgb([h, (s + sat).min(255.0), (v + bright).min(255.0)])
    })
}

/// [`change_hsv`] as a pipeline stage.
///
/// # Example
/// ```ignore
/// let shifted = ChangeHsv::new(30, 10).apply(rgb)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChangeHsv {
    saturation: u8,
    brightness: u8,
}

impl ChangeHsv {
    pub fn new(saturation: u8, brightness: u8) -> Self {
        Self {
            saturation,
            brightness,
        }
    }
}

impl Transform<RgbImage, RgbImage> for ChangeHsv {
    fn apply(&self, img: RgbImage) -> Result<RgbImage> {
        if self.saturation == 0 && self.brightness == 0 {
            return Ok(img);
        }
        Ok(change_hsv(&img, self.saturation, self.brightness))
    }
}

// ============================================================================
// NormalizeRange
// ============================================================================

/// Linearly rescales `tensor` so its observed minimum maps to `min` and its
/// observed maximum to `max`.
///
/// A constant tensor has no spread to rescale: the division is by zero and the
/// result is all NaN. Callers who may feed flat images must check first.
pub fn normalize_to_range(tensor: &Tensor, max: f64, min: f64) -> Result<Tensor> {
    let lo = tensor.f_min()?.double_value(&[]);
    let hi = tensor.f_max()?.double_value(&[]);
    let scale = (max - min) / (hi - lo);

    Ok(tensor
        .f_sub_scalar(lo)?
        .f_mul_scalar(scale)?
        .f_add_scalar(min)?)
}

/// [`normalize_to_range`] as a pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeRange {
    max: f64,
    min: f64,
}

impl NormalizeRange {
    pub fn new(max: f64, min: f64) -> Result<Self> {
        ensure!(
            max > min,
            "Normalization range is empty (max {} must exceed min {})",
            max,
            min
        );
        Ok(Self { max, min })
    }
}

impl Transform<Tensor, Tensor> for NormalizeRange {
    fn apply(&self, tensor: Tensor) -> Result<Tensor> {
        normalize_to_range(&tensor, self.max, self.min)
    }
}
