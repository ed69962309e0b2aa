use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists image files in a directory, filtered by extension.
///
/// Only paths are collected; pixels are decoded later, one sample at a time.
/// The scan behaves like a `*.<ext>` glob: the extension match is
/// case-sensitive unless [`case_insensitive`](Self::case_insensitive) is set,
/// names starting with `.` are never matched, and a directory that does not
/// exist simply matches nothing.
///
/// # Example
/// ```ignore
/// let paths = ImageDirSource::new("./data/no_panels", "png", false).scan()?;
/// ```
#[derive(Debug, Clone)]
pub struct ImageDirSource {
    dir_path: PathBuf,
    extension: String,
    recurse: bool,
    sort: bool,
    ignore_case: bool,
}

impl ImageDirSource {
    /// Creates a new image directory source.
    ///
    /// # Arguments
    /// - `dir_path`: Directory to scan.
    /// - `extension`: File extension to include (e.g. `"png"`).
    /// - `recurse`: If `true`, scans subdirectories recursively.
    pub fn new(dir_path: impl Into<PathBuf>, extension: &str, recurse: bool) -> Self {
        Self {
            dir_path: dir_path.into(),
            extension: extension.to_string(),
            recurse,
            sort: false,
            ignore_case: false,
        }
    }

    /// Sort the result lexicographically instead of keeping listing order.
    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Also match `a.PNG`, `a.Png`, ... for a `"png"` extension.
    pub fn case_insensitive(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    fn matches(&self, path: &Path) -> bool {
        // hidden files (e.g. `._a.png` sidecars) are skipped like a shell glob does
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(true, |n| n.starts_with('.'));
        if hidden {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                if self.ignore_case {
                    e.eq_ignore_ascii_case(&self.extension)
                } else {
                    e == self.extension
                }
            })
    }

    /// Returns every regular file with the configured extension.
    ///
    /// Errors only when the directory exists but cannot be listed. Unreadable
    /// individual entries are logged and skipped.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.dir_path.is_dir() {
            log::warn!(
                "Image directory {} does not exist or is not a directory; no samples",
                self.dir_path.display()
            );
            return Ok(Vec::new());
        }

        let candidates: Vec<PathBuf> = if self.recurse {
            WalkDir::new(&self.dir_path)
                .min_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(e) => Some(e.into_path()),
                    Err(e) => {
                        log::warn!("Skipping unreadable directory entry: {}", e);
                        None
                    }
                })
                .collect()
        } else {
            fs::read_dir(&self.dir_path)
                .with_context(|| {
                    format!("Failed to read directory: {}", self.dir_path.display())
                })?
                .filter_map(|entry| match entry {
                    Ok(e) => Some(e.path()),
                    Err(e) => {
                        log::warn!(
                            "Skipping unreadable entry in {}: {}",
                            self.dir_path.display(),
                            e
                        );
                        None
                    }
                })
                .collect()
        };

        // Directories named like `x.png` are not samples
        let mut paths: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| self.matches(path) && path.is_file())
            .collect();

        if self.sort {
            paths.sort();
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_filters_by_extension() -> Result<()> {
        let dir = tempdir()?;
        let d = dir.path();

        // zero-byte files are enough, nothing is decoded here
        File::create(d.join("a.png"))?;
        File::create(d.join("b.PNG"))?;
        File::create(d.join("c.jpg"))?;
        File::create(d.join("notes.txt"))?;
        fs::create_dir(d.join("folder.png"))?;

        let files = ImageDirSource::new(d, "png", false).sorted(true).scan()?;
        assert_eq!(names(&files), vec!["a.png"]);
        Ok(())
    }

    #[test]
    fn test_case_insensitive_opt_in() -> Result<()> {
        let dir = tempdir()?;
        let d = dir.path();
        File::create(d.join("a.png"))?;
        File::create(d.join("b.PNG"))?;
        File::create(d.join("c.Png"))?;

        let files = ImageDirSource::new(d, "png", false)
            .case_insensitive(true)
            .sorted(true)
            .scan()?;
        assert_eq!(names(&files), vec!["a.png", "b.PNG", "c.Png"]);
        Ok(())
    }

    #[test]
    fn test_scan_skips_hidden_files() -> Result<()> {
        let dir = tempdir()?;
        let d = dir.path();
        let nested = d.join("nested");
        fs::create_dir(&nested)?;
        File::create(d.join("a.png"))?;
        File::create(d.join("._a.png"))?;
        File::create(d.join(".png"))?;
        File::create(nested.join("._deep.png"))?;

        let flat = ImageDirSource::new(d, "png", false).scan()?;
        assert_eq!(names(&flat), vec!["a.png"]);

        let deep = ImageDirSource::new(d, "png", true)
            .case_insensitive(true)
            .scan()?;
        assert_eq!(names(&deep), vec!["a.png"]);
        Ok(())
    }

    #[test]
    fn test_scan_is_not_recursive_by_default() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("nested");
        fs::create_dir(&nested)?;
        File::create(dir.path().join("top.png"))?;
        File::create(nested.join("deep.png"))?;

        assert_eq!(ImageDirSource::new(dir.path(), "png", false).scan()?.len(), 1);
        assert_eq!(ImageDirSource::new(dir.path(), "png", true).scan()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope");
        assert!(ImageDirSource::new(missing, "png", false).scan()?.is_empty());
        Ok(())
    }
}
