//! Delivery of generated artifacts
//!
//! The preferred path is one archive named after the model code. When the
//! archive cannot be built or saved, every file is saved on its own, spaced
//! out by a short stagger. Delivery problems are logged, never returned.

pub mod archive;
pub mod download;

use std::path::PathBuf;
use std::time::Duration;

use crate::artifacts::GeneratedFile;

pub use archive::{ArchiveBuilder, ZipArchiveBuilder};
pub use download::{DirectoryDownloader, Downloader};

pub const ARCHIVE_MEDIA_TYPE: &str = "application/zip";

/// Outcome of a delivery
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Archive(PathBuf),
    Individual {
        saved: Vec<PathBuf>,
        /// Names of files that could not be saved
        failed: Vec<String>,
    },
}

impl Delivery {
    pub fn saved_paths(&self) -> Vec<PathBuf> {
        match self {
            Self::Archive(path) => vec![path.clone()],
            Self::Individual { saved, .. } => saved.clone(),
        }
    }
}

/// Save one generated file with its own name and media type
pub fn download_file(file: &GeneratedFile, downloader: &dyn Downloader) -> anyhow::Result<PathBuf> {
    downloader.download(&file.filename, file.kind.media_type(), file.content.as_bytes())
}

/// Save every file separately, waiting `stagger` between consecutive saves
pub async fn download_individually(
    files: &[GeneratedFile],
    downloader: &dyn Downloader,
    stagger: Duration,
) -> Delivery {
    let mut saved = Vec::new();
    let mut failed = Vec::new();

    for (index, file) in files.iter().enumerate() {
        if index > 0 && !stagger.is_zero() {
            tokio::time::sleep(stagger).await;
        }
        match download_file(file, downloader) {
            Ok(path) => saved.push(path),
            Err(e) => {
                log::error!("Failed to save {}: {:#}", file.filename, e);
                failed.push(file.filename.clone());
            }
        }
    }

    Delivery::Individual { saved, failed }
}

/// Bundle all files into `archive_name`, falling back to individual saves
pub async fn deliver(
    files: &[GeneratedFile],
    archive_name: &str,
    builder: &dyn ArchiveBuilder,
    downloader: &dyn Downloader,
    stagger: Duration,
) -> Delivery {
    let entries = files
        .iter()
        .map(|file| (file.filename.clone(), file.content.clone()))
        .collect();

    let result = match builder.build(entries).await {
        Ok(bytes) => downloader.download(archive_name, ARCHIVE_MEDIA_TYPE, &bytes),
        Err(e) => Err(e),
    };

    match result {
        Ok(path) => {
            log::info!("Saved archive {}", path.display());
            Delivery::Archive(path)
        }
        Err(e) => {
            log::error!("Error creating archive {}: {:#}", archive_name, e);
            download_individually(files, downloader, stagger).await
        }
    }
}
