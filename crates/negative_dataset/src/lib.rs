//! Augmented "negative" samples for segmentation training.
//!
//! A [`NegativeSampleDataset`] lists the images in a directory and, on every
//! indexed access, decodes one of them, applies a random flip, quarter-turn
//! rotation and saturation/brightness shift, and returns it as a `[3, H, W]`
//! float tensor together with an all-zero `[H, W]` mask.
//!
//! Randomness is never global: each access derives its own RNG from the
//! configured [`SeedPolicy`], or takes one from the caller through
//! [`NegativeSampleDataset::get_with_rng`].

pub mod config;
pub mod dataset;
pub mod readers;
pub mod sample;
pub mod seed;
pub mod transforms;

pub use config::{AugmentConfig, AugmentConfigBuilder, NoiseStage};
pub use dataset::{Dataset, NegativeSampleDataset};
pub use sample::Sample;
pub use seed::SeedPolicy;
