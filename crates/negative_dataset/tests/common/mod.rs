#![allow(dead_code)]

use anyhow::Result;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Width of every fixture tile.
pub const WIDTH: u32 = 8;
/// Height of every fixture tile.
pub const HEIGHT: u32 = 5;

/// A tile whose red channel encodes `marker` and whose other channels vary
/// with position, so flips and rotations are detectable.
pub fn marker_tile(marker: u8) -> RgbImage {
    RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        Rgb([marker, (x * 25) as u8, (y * 40 + 20) as u8])
    })
}

/// Writes `n` marker tiles named `neg_000.png`, `neg_001.png`, ...
pub fn write_tiles(dir: &Path, n: usize) -> Result<()> {
    for i in 0..n {
        marker_tile(i as u8 * 20).save(dir.join(format!("neg_{:03}.png", i)))?;
    }
    Ok(())
}

/// Temp directory holding `n` marker tiles.
pub fn tile_dir(n: usize) -> Result<TempDir> {
    let dir = tempdir()?;
    write_tiles(dir.path(), n)?;
    Ok(dir)
}

/// Writes a 4-channel PNG, which the HSV stage cannot take as-is.
pub fn write_rgba_tile(path: &Path) -> Result<()> {
    RgbaImage::from_pixel(WIDTH, HEIGHT, Rgba([10, 20, 30, 255])).save(path)?;
    Ok(())
}
