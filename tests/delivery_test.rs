//! End-to-end: generate artifacts, then deliver them to disk
mod common;

use std::io::Read;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use deploy_wizard::artifacts::{Generator, GenerationStatus, archive_name, generate_artifacts};
use deploy_wizard::delivery::{ArchiveBuilder, DirectoryDownloader, Delivery, ZipArchiveBuilder, deliver};

struct FailingBuilder;

#[async_trait]
impl ArchiveBuilder for FailingBuilder {
    async fn build(&self, _entries: Vec<(String, String)>) -> Result<Vec<u8>> {
        bail!("archive library unavailable")
    }
}

#[tokio::test]
async fn test_archive_holds_every_artifact() {
    let temp = tempfile::tempdir().unwrap();
    let data = common::complete_form();
    let files = generate_artifacts(&data, &common::clock());
    let downloader = DirectoryDownloader::new(temp.path().join("out"));

    let delivery = deliver(
        &files,
        &archive_name(&data),
        &ZipArchiveBuilder,
        &downloader,
        Duration::from_millis(100),
    )
    .await;

    let path = temp.path().join("out").join("customer_churn_2_1_0_deployment_files.zip");
    assert_eq!(delivery, Delivery::Archive(path.clone()));

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), files.len());

    for file in &files {
        let mut entry = archive.by_name(&file.filename).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, file.content);
    }
}

#[tokio::test(start_paused = true)]
async fn test_archive_failure_saves_files_individually() {
    let temp = tempfile::tempdir().unwrap();
    let data = common::complete_form();
    let files = generate_artifacts(&data, &common::clock());
    let downloader = DirectoryDownloader::new(temp.path());

    let delivery = deliver(
        &files,
        &archive_name(&data),
        &FailingBuilder,
        &downloader,
        Duration::from_millis(100),
    )
    .await;

    match &delivery {
        Delivery::Individual { saved, failed } => {
            assert_eq!(saved.len(), 8);
            assert!(failed.is_empty());
        }
        other => panic!("expected individual delivery, got {:?}", other),
    }

    let env = std::fs::read_to_string(temp.path().join("deployment.env")).unwrap();
    assert_eq!(env, common::file(&files, "deployment.env"));
    assert!(!temp.path().join(archive_name(&data)).exists());
}

#[tokio::test(start_paused = true)]
async fn test_generator_publishes_after_delay() {
    let generator = Generator::with_clock(Duration::from_secs(2), std::sync::Arc::new(common::clock()));
    assert_eq!(generator.status(), GenerationStatus::Idle);

    let files = generator.generate(&common::complete_form()).await;

    assert_eq!(generator.status(), GenerationStatus::Complete);
    assert_eq!(files.len(), 8);
    assert_eq!(generator.files(), files);
    assert_eq!(files, generate_artifacts(&common::complete_form(), &common::clock()));
}
