//! Saving single files, the terminal counterpart of a browser download

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Hands one finished file to the user
pub trait Downloader: Send + Sync {
    fn download(&self, filename: &str, media_type: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes downloads into a directory, replacing files of the same name
#[derive(Clone, Debug)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&self, filename: &str, media_type: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;

        let path = self.dir.join(filename);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;

        log::debug!("Saved {} ({}, {} bytes)", path.display(), media_type, bytes.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_directory_and_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(temp.path().join("out"));

        downloader.download("a.env", "text/plain", b"A=1\n").unwrap();
        let path = downloader.download("a.env", "text/plain", b"A=2\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "A=2\n");
    }
}
