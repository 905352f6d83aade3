//! Final step: review and save the generated files

use anyhow::Result;
use colored::*;
use dialoguer::Select;

use deploy_wizard::artifacts::GeneratedFile;
use deploy_wizard::artifacts::context::{model_code, target_directory};
use deploy_wizard::config::Config;
use deploy_wizard::delivery::{DirectoryDownloader, download_file};
use deploy_wizard::form::model::FormData;

use crate::cli::commands::common::{print_delivery, print_file_list, save_files};
use crate::cli::ui::pause_for_user;

pub enum DownloadAction {
    Stay,
    Back,
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum DownloadMenuOption {
    SaveArchive,
    SaveIndividually,
    SaveOne,
    Preview,
    Back,
    Exit,
}

impl std::fmt::Display for DownloadMenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadMenuOption::SaveArchive => write!(f, "📦 {} - {}", "Download all".bright_green().bold(), "Save every file as one ZIP".dimmed()),
            DownloadMenuOption::SaveIndividually => write!(f, "📁 {} - {}", "Download separately".bright_green().bold(), "Save each file on its own".dimmed()),
            DownloadMenuOption::SaveOne => write!(f, "📄 {} - {}", "Download one".bright_cyan().bold(), "Save a single file".dimmed()),
            DownloadMenuOption::Preview => write!(f, "👀 {} - {}", "Preview".bright_blue().bold(), "Show a file's content".dimmed()),
            DownloadMenuOption::Back => write!(f, "🔙 {} - {}", "Back".white().bold(), "Return to infrastructure".dimmed()),
            DownloadMenuOption::Exit => write!(f, "🚪 {} - {}", "Exit".bright_red().bold(), "Save progress and quit".dimmed()),
        }
    }
}

fn print_overview(data: &FormData, files: &[GeneratedFile]) {
    let directory = target_directory(
        &model_code(&data.initiative_name, &data.model_version),
        &data.model_version,
    );

    println!("  {}", "✅ Deployment configuration complete!".bright_green().bold());
    println!("  {} {}", "Target directory:".dimmed(), directory.bright_white());
    println!(
        "  {}",
        "Next steps: review the files and coordinate with the MLOps team for deployment".dimmed()
    );
    println!();
    print_file_list(files);

    let features = data.sorted_features();
    if !features.is_empty() {
        println!();
        println!("  {}", "Features with preprocessing:".bright_white().bold());
        for feature in features {
            println!("    {}", feature.summary().dimmed());
        }
    }
    println!();
}

fn choose_file<'a>(files: &'a [GeneratedFile], prompt: &str) -> Result<&'a GeneratedFile> {
    let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
    let selection = Select::new().with_prompt(prompt).items(&names).default(0).interact()?;
    Ok(&files[selection])
}

pub async fn run_download_menu(
    data: &FormData,
    files: &[GeneratedFile],
    config: &Config,
) -> Result<DownloadAction> {
    print_overview(data, files);

    let options = [
        DownloadMenuOption::SaveArchive,
        DownloadMenuOption::SaveIndividually,
        DownloadMenuOption::SaveOne,
        DownloadMenuOption::Preview,
        DownloadMenuOption::Back,
        DownloadMenuOption::Exit,
    ];
    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&options)
        .default(0)
        .interact()?;

    let settings = config.get_settings();
    match options[selection] {
        DownloadMenuOption::SaveArchive | DownloadMenuOption::SaveIndividually => {
            let individual = matches!(options[selection], DownloadMenuOption::SaveIndividually);
            let delivery = save_files(
                files,
                data,
                settings.output_dir.clone(),
                settings.download_stagger(),
                individual,
            )
            .await;
            print_delivery(&delivery);
            pause_for_user();
        }
        DownloadMenuOption::SaveOne => {
            let file = choose_file(files, "Which file?")?;
            let downloader = DirectoryDownloader::new(settings.output_dir.clone());
            match download_file(file, &downloader) {
                Ok(path) => println!("{} Saved {}", "✓".bright_green().bold(), path.display()),
                Err(e) => println!("{} {:#}", "Error:".bright_red(), e),
            }
            pause_for_user();
        }
        DownloadMenuOption::Preview => {
            let file = choose_file(files, "Preview which file?")?;
            println!();
            println!("{}", format!("── {} ──", file.filename).bright_blue().bold());
            println!("{}", file.content);
            pause_for_user();
        }
        DownloadMenuOption::Back => return Ok(DownloadAction::Back),
        DownloadMenuOption::Exit => return Ok(DownloadAction::Exit),
    }

    Ok(DownloadAction::Stay)
}
