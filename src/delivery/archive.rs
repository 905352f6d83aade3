//! Bundling generated files into a single archive

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Builds one binary archive from `(filename, content)` pairs
#[async_trait]
pub trait ArchiveBuilder: Send + Sync {
    async fn build(&self, entries: Vec<(String, String)>) -> Result<Vec<u8>>;
}

/// Deflate-compressed zip archive
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipArchiveBuilder;

impl ZipArchiveBuilder {
    fn write_zip(entries: &[(String, String)]) -> Result<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in entries {
            writer
                .start_file(name.as_str(), options)
                .with_context(|| format!("Failed to add {} to archive", name))?;
            writer
                .write_all(content.as_bytes())
                .with_context(|| format!("Failed to write {} into archive", name))?;
        }

        let cursor = writer.finish().context("Failed to finalize archive")?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl ArchiveBuilder for ZipArchiveBuilder {
    async fn build(&self, entries: Vec<(String, String)>) -> Result<Vec<u8>> {
        let count = entries.len();
        let bytes = tokio::task::spawn_blocking(move || Self::write_zip(&entries))
            .await
            .context("Archive task panicked")??;
        log::debug!("Built zip with {} entries ({} bytes)", count, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[tokio::test]
    async fn test_zip_contains_entries() {
        let entries = vec![
            ("a.yaml".to_string(), "key: value\n".to_string()),
            ("b.sql".to_string(), "SELECT 1;\n".to_string()),
        ];
        let bytes = ZipArchiveBuilder.build(entries).await.unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive.by_name("b.sql").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "SELECT 1;\n");
    }
}
