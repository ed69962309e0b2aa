//! src/transforms/vision/mod.rs
//!
//! Vision stages for loading and augmenting negative samples.
//!
//! # Module Organization
//!
//! ```text
//! transforms/vision/
//! ├── io.rs            → Image loading from disk
//! ├── geometric.rs     → RGB check, flips, quarter-turn rotations
//! ├── photometric.rs   → HSV saturation/brightness shift, range normalization
//! ├── augmentation.rs  → Random parameter draws, additive noise
//! └── conversion.rs    → Image → CHW tensor, zero mask
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::transforms::Transform;
//! use crate::transforms::vision::{ChangeHsv, EnsureRgb, Flip, FlipMode, LoadImage, ToTensor};
//!
//! let pipeline = LoadImage::new()
//!     .then(EnsureRgb::strict())
//!     .then(Flip::new(FlipMode::Horizontal))
//!     .then(ChangeHsv::new(30, 10))
//!     .then(ToTensor);
//! let image = pipeline.apply(path)?;
//! ```

pub mod augmentation;
pub mod conversion;
pub mod geometric;
pub mod io;
pub mod photometric;

pub use augmentation::{
    add_gaussian_noise, add_noise, add_uniform_noise, ceil_floor_image, AddNoise,
    AddNoiseParams, AugmentParams, NoiseParams,
};
pub use conversion::{zero_mask, ToTensor};
pub use geometric::{flip, EnsureRgb, Flip, FlipMode, Rotate90};
pub use io::LoadImage;
pub use photometric::{
    change_hsv, hsv_to_rgb, normalize_to_range, rgb_to_hsv, ChangeHsv, NormalizeRange,
};
