use crate::transforms::Transform;
use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;

// ============================================================================
// LoadImage
// ============================================================================

/// Reads an image file from disk and decodes it.
///
/// The format is guessed from the file contents, not the extension. A missing
/// file or a decode failure is returned as an error carrying the path; no
/// fallback decoder is tried.
///
/// # Input/Output
/// - **Input**: `PathBuf` - File path to image
/// - **Output**: `DynamicImage` - Decoded pixels in whatever color type the file holds
///
/// # Example
/// ```ignore
/// let image = LoadImage::new().apply(PathBuf::from("tile_0001.png"))?;
/// ```
#[derive(Debug, Clone)]
pub struct LoadImage {
    buffer_size: usize,
}

impl LoadImage {
    /// Creates a loader with an 8KB read buffer.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }
}

impl Default for LoadImage {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform<PathBuf, DynamicImage> for LoadImage {
    fn apply(&self, path: PathBuf) -> Result<DynamicImage> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;

        let file_size = file.metadata()?.len() as usize;
        let mut reader = BufReader::with_capacity(self.buffer_size, file);
        let mut buffer = Vec::with_capacity(file_size);
        reader
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;

        ImageReader::new(Cursor::new(buffer))
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("Failed to decode image: {}", path.display()))
    }
}
