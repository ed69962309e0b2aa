//! Random augmentation parameters and the additive-noise helpers.
//!
//! Nothing here touches a global RNG. Every random draw goes through an RNG
//! handed in by the caller, and the drawn values are stored in
//! [`AugmentParams`] so the image stages themselves stay deterministic.

use crate::config::{AugmentConfig, NoiseStage};
use crate::transforms::core::Optional;
use crate::transforms::vision::geometric::{Flip, FlipMode, Rotate90};
use crate::transforms::vision::photometric::ChangeHsv;
use crate::transforms::Transform;
use anyhow::{anyhow, ensure, Context, Result};
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

// ============================================================================
// Noise helpers
// ============================================================================

/// Clamps widened pixel values to `[0, 255]` and narrows them to `u8`.
/// Fractional parts are truncated.
pub fn ceil_floor_image(values: &[f64]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| v.clamp(0.0, 255.0) as u8)
        .collect()
}

fn add_elementwise<D, R>(image: &RgbImage, noise: D, rng: &mut R) -> Result<RgbImage>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    let noisy: Vec<f64> = image
        .as_raw()
        .iter()
        .map(|&p| f64::from(p) + noise.sample(rng))
        .collect();

    let (width, height) = image.dimensions();
    RgbImage::from_raw(width, height, ceil_floor_image(&noisy))
        .ok_or_else(|| anyhow!("Noise output does not fit a {}x{} RGB buffer", width, height))
}

/// Adds per-channel Gaussian noise `N(mean, std)` and clamps to `[0, 255]`.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    image: &RgbImage,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<RgbImage> {
    let normal = Normal::new(mean, std)
        .with_context(|| format!("Invalid Gaussian noise (mean {}, std {})", mean, std))?;
    add_elementwise(image, normal, rng)
}

/// Adds per-channel noise drawn uniformly from `[low, high]` and clamps to
/// `[0, 255]`. `low == high` adds a constant.
pub fn add_uniform_noise<R: Rng + ?Sized>(
    image: &RgbImage,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<RgbImage> {
    ensure!(
        low <= high,
        "Uniform noise bounds are inverted (low {}, high {})",
        low,
        high
    );
    let uniform = Uniform::new_inclusive(low, high)
        .with_context(|| format!("Invalid uniform noise bounds [{}, {}]", low, high))?;
    add_elementwise(image, uniform, rng)
}

/// Noise distribution with its parameters already drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseParams {
    Gaussian { mean: f64, std: f64 },
    Uniform { low: f64, high: f64 },
}

impl NoiseParams {
    /// Draws the distribution parameters for noise `mode`:
    /// - `0`: Gaussian, mean 0, std in `0..=param`
    /// - `1`: uniform, low in `-param..=0`, high in `0..=param`
    /// - anything else: no noise
    pub fn draw<R: Rng + ?Sized>(mode: u8, param: u32, rng: &mut R) -> Option<Self> {
        let param = i64::from(param);
        match mode {
            0 => Some(NoiseParams::Gaussian {
                mean: 0.0,
                std: rng.random_range(0..=param) as f64,
            }),
            1 => {
                let low = rng.random_range(-param..=0) as f64;
                let high = rng.random_range(0..=param) as f64;
                Some(NoiseParams::Uniform { low, high })
            }
            _ => None,
        }
    }

    pub fn apply_to<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> Result<RgbImage> {
        match *self {
            NoiseParams::Gaussian { mean, std } => add_gaussian_noise(image, mean, std, rng),
            NoiseParams::Uniform { low, high } => add_uniform_noise(image, low, high, rng),
        }
    }
}

/// Draws noise parameters for `mode` (see [`NoiseParams::draw`]) and applies
/// them. Modes other than `0` and `1` return an unchanged copy.
pub fn add_noise<R: Rng + ?Sized>(
    image: &RgbImage,
    mode: u8,
    param: u32,
    rng: &mut R,
) -> Result<RgbImage> {
    match NoiseParams::draw(mode, param, rng) {
        Some(noise) => noise.apply_to(image, rng),
        None => Ok(image.clone()),
    }
}

/// Noise as a pipeline stage. The per-pixel samples come from an RNG seeded
/// with `seed`, so the stage is repeatable.
#[derive(Debug, Clone, Copy)]
pub struct AddNoise {
    params: NoiseParams,
    seed: u64,
}

impl AddNoise {
    pub fn new(params: NoiseParams, seed: u64) -> Self {
        Self { params, seed }
    }
}

impl Transform<RgbImage, RgbImage> for AddNoise {
    fn apply(&self, img: RgbImage) -> Result<RgbImage> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.params.apply_to(&img, &mut rng)
    }
}

// ============================================================================
// AugmentParams
// ============================================================================

/// One draw of every random augmentation applied to a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentParams {
    pub flip: FlipMode,
    /// Counter-clockwise quarter turns.
    pub quarter_turns: u8,
    pub noise: Option<AddNoiseParams>,
    pub saturation: u8,
    pub brightness: u8,
}

/// Drawn noise parameters plus the seed for the per-pixel samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddNoiseParams {
    pub params: NoiseParams,
    pub seed: u64,
}

impl AugmentParams {
    /// Draws, in order: flip mode, rotation, noise, saturation, brightness.
    pub fn draw<R: Rng + ?Sized>(config: &AugmentConfig, rng: &mut R) -> Self {
        let flip = if config.flip {
            FlipMode::from(rng.random_range(0..4u8))
        } else {
            FlipMode::Identity
        };
        let quarter_turns = rng.random_range(0..=config.max_quarter_turns);

        let mode = match config.noise {
            NoiseStage::Disabled => None,
            NoiseStage::Random { param } => Some((rng.random_range(0..=2u8), param)),
            NoiseStage::Gaussian { max_std } => Some((0, max_std)),
            NoiseStage::Uniform { bound } => Some((1, bound)),
        };
        let noise = mode
            .and_then(|(mode, param)| NoiseParams::draw(mode, param, rng))
            .map(|params| AddNoiseParams {
                params,
                seed: rng.random(),
            });

        let saturation = rng.random_range(0..=config.saturation_max);
        let brightness = rng.random_range(0..=config.brightness_max);

        Self {
            flip,
            quarter_turns,
            noise,
            saturation,
            brightness,
        }
    }

    /// Image stages for these parameters: flip, rotate, noise, HSV shift.
    pub fn pipeline(&self) -> impl Transform<RgbImage, RgbImage> {
        Flip::new(self.flip)
            .then(Rotate90::new(self.quarter_turns))
            .then(Optional(self.noise.map(|n| AddNoise::new(n.params, n.seed))))
            .then(ChangeHsv::new(self.saturation, self.brightness))
    }
}
