//! Helpers shared by several commands

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;

use deploy_wizard::artifacts::{self, GeneratedFile, Generator};
use deploy_wizard::config::Config;
use deploy_wizard::delivery::{self, Delivery, DirectoryDownloader, ZipArchiveBuilder};
use deploy_wizard::form::model::FormData;
use deploy_wizard::form::wizard::Msg;
use deploy_wizard::session::{JsonFileStore, Session, SessionStore};

use crate::cli::ui::show_generation;

/// Open the saved session, or start a new one when `fresh`
pub fn open_session(config: &Config, fresh: bool) -> Result<Session<JsonFileStore>> {
    let store = JsonFileStore::new(config.session_path()?);
    if fresh {
        Session::fresh(store)
    } else {
        Session::open(store)
    }
}

/// Read a form document, JSON or TOML depending on the extension
pub fn load_form(path: &Path) -> Result<FormData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {:?}", path))?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let mut data: FormData = if is_toml {
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML form: {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON form: {:?}", path))?
    };
    data.normalize();
    Ok(data)
}

/// Generate with the progress line up, toggling the submitting flag around it
pub async fn generate_in_session<S: SessionStore>(
    session: &mut Session<S>,
    generator: &Generator,
) -> Vec<GeneratedFile> {
    session.dispatch(Msg::SubmitStarted);
    let data = session.state().data.clone();
    let files = show_generation(generator, &data).await;
    session.dispatch(Msg::SubmitFinished);
    files
}

/// Save the files into `out_dir`, as one archive unless `individual`
pub async fn save_files(
    files: &[GeneratedFile],
    data: &FormData,
    out_dir: PathBuf,
    stagger: Duration,
    individual: bool,
) -> Delivery {
    let downloader = DirectoryDownloader::new(out_dir);
    if individual {
        delivery::download_individually(files, &downloader, stagger).await
    } else {
        let archive_name = artifacts::archive_name(data);
        delivery::deliver(files, &archive_name, &ZipArchiveBuilder, &downloader, stagger).await
    }
}

pub fn print_delivery(delivery: &Delivery) {
    match delivery {
        Delivery::Archive(path) => {
            println!(
                "{} Saved archive {}",
                "✓".bright_green().bold(),
                path.display().to_string().bright_white().bold()
            );
        }
        Delivery::Individual { saved, failed } => {
            for path in saved {
                println!("{} Saved {}", "✓".bright_green().bold(), path.display());
            }
            for name in failed {
                println!("{} Could not save {}", "✗".bright_red().bold(), name.bright_yellow());
            }
        }
    }
}

pub fn print_file_list(files: &[GeneratedFile]) {
    for file in files {
        println!(
            "  {} {} {} {}",
            "•".bright_green(),
            file.filename.bright_white().bold(),
            format!("[{}]", file.kind).dimmed(),
            file.description.dimmed()
        );
    }
}
