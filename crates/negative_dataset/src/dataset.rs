use crate::config::AugmentConfig;
use crate::readers::ImageDirSource;
use crate::sample::Sample;
use crate::transforms::core::Optional;
use crate::transforms::vision::{
    zero_mask, AugmentParams, EnsureRgb, LoadImage, NormalizeRange, ToTensor,
};
use crate::transforms::Transform;
use anyhow::{ensure, Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Indexed, length-known access to training samples.
///
/// Implementations must be `Send + Sync` so a training loop may fetch from
/// several threads.
pub trait Dataset: Send + Sync {
    /// Returns total number of samples.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produces the sample at `index`. Indices outside `[0, len)` are errors.
    fn get(&self, index: usize) -> Result<Sample>;
}

/// Negative samples: augmented images from a directory, each paired with an
/// all-zero mask (no annotated region).
///
/// Paths are collected once at construction. Pixels are read, augmented and
/// converted on every [`get`](Dataset::get); nothing is cached, so two
/// accesses to the same index may differ depending on the
/// [`SeedPolicy`](crate::seed::SeedPolicy).
///
/// # Example
/// ```ignore
/// let dataset = NegativeSampleDataset::new("data/train/no_panels")?;
/// for index in 0..dataset.len() {
///     let (image, mask) = dataset.get(index)?.into_pair();
///     // image: [3, H, W] f32, mask: [H, W] zeros
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NegativeSampleDataset {
    paths: Vec<PathBuf>,
    config: AugmentConfig,
    loader: LoadImage,
}

impl NegativeSampleDataset {
    /// Scans `dir` for `*.png` files with the default augmentation.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(dir, AugmentConfig::default())
    }

    /// Scans `dir` according to `config`. An empty or missing directory
    /// gives an empty dataset.
    pub fn with_config(dir: impl AsRef<Path>, config: AugmentConfig) -> Result<Self> {
        config.validate()?;

        let dir = dir.as_ref();
        let paths = ImageDirSource::new(dir, &config.extension, config.recursive)
            .case_insensitive(config.case_insensitive)
            .sorted(config.sort_paths)
            .scan()?;

        log::info!(
            "Loaded {} negative samples from {}",
            paths.len(),
            dir.display()
        );

        Ok(Self {
            paths,
            config,
            loader: LoadImage::new(),
        })
    }

    /// The validated configuration this dataset was built with.
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Scanned file paths, in index order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Get the file path of the i-th sample.
    pub fn path_of(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// Same as [`Dataset::get`], but augmentation parameters come from `rng`
    /// instead of the configured seed policy.
    pub fn get_with_rng<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Result<Sample> {
        ensure!(
            index < self.paths.len(),
            "Index {} out of bounds. Dataset has {} samples",
            index,
            self.paths.len()
        );
        let path = &self.paths[index];

        let image = self
            .loader
            .apply(path.clone())
            .with_context(|| format!("Failed to load sample {}", index))?;
        let rgb = if self.config.coerce_rgb {
            EnsureRgb::coerce()
        } else {
            EnsureRgb::strict()
        }
        .apply(image)
        .with_context(|| format!("Unsupported image: {}", path.display()))?;

        let params = AugmentParams::draw(&self.config, rng);
        log::debug!("Sample {} ({}): {:?}", index, path.display(), params);

        let normalize = self
            .config
            .normalize
            .map(|(max, min)| NormalizeRange::new(max, min))
            .transpose()?;

        let image = params
            .pipeline()
            .then(ToTensor)
            .then(Optional(normalize))
            .apply(rgb)
            .with_context(|| format!("Failed to augment image: {}", path.display()))?;
        let mask = zero_mask(&image)?;

        Ok(Sample::new(image, mask))
    }
}

impl Dataset for NegativeSampleDataset {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn get(&self, index: usize) -> Result<Sample> {
        let mut rng = self.config.seed.rng_for(index);
        self.get_with_rng(index, &mut rng)
    }
}
