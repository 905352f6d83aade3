//! Main wizard loop

use anyhow::Result;
use colored::*;
use dialoguer::Select;

use deploy_wizard::artifacts::{GeneratedFile, Generator};
use deploy_wizard::config::Config;
use deploy_wizard::form::wizard::{Command, Msg};
use deploy_wizard::session::{Session, SessionStore};

use super::download::{DownloadAction, run_download_menu};
use super::steps::{edit_step, print_step_summary};
use crate::cli::commands::common::generate_in_session;
use crate::cli::ui::{clear_screen, pause_for_user, print_errors, print_step_header};

#[derive(Debug, Clone, Copy)]
enum StepMenuOption {
    Edit,
    Next,
    Back,
    Exit,
}

impl std::fmt::Display for StepMenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepMenuOption::Edit => write!(f, "✏️  {} - {}", "Edit".bright_yellow().bold(), "Fill in this step".dimmed()),
            StepMenuOption::Next => write!(f, "➡️  {} - {}", "Next".bright_green().bold(), "Validate and continue".dimmed()),
            StepMenuOption::Back => write!(f, "🔙 {} - {}", "Back".white().bold(), "Previous step".dimmed()),
            StepMenuOption::Exit => write!(f, "🚪 {} - {}", "Exit".bright_red().bold(), "Save progress and quit".dimmed()),
        }
    }
}

pub async fn run_wizard<S: SessionStore>(mut session: Session<S>, config: &Config) -> Result<()> {
    let generator = Generator::new(config.settings.generation_delay());
    let mut files: Vec<GeneratedFile> = Vec::new();

    // Resumed directly on the last step
    if session.state().current_step.is_last() {
        files = generate_in_session(&mut session, &generator).await;
    }

    loop {
        clear_screen();
        let step = session.state().current_step;
        print_step_header(step);

        if step.is_last() {
            match run_download_menu(&session.state().data, &files, config).await? {
                DownloadAction::Back => {
                    session.dispatch(Msg::Back);
                }
                DownloadAction::Exit => break,
                DownloadAction::Stay => {}
            }
            continue;
        }

        print_errors(&session.state().errors);
        print_step_summary(session.state());

        let mut options = vec![StepMenuOption::Edit, StepMenuOption::Next];
        if step.number() > 1 {
            options.push(StepMenuOption::Back);
        }
        options.push(StepMenuOption::Exit);

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match options[selection] {
            StepMenuOption::Edit => {
                if let Err(e) = edit_step(&mut session) {
                    println!("Error: {}", e);
                    pause_for_user();
                }
            }
            StepMenuOption::Next => match session.dispatch(Msg::Next) {
                Command::Generate => {
                    files = generate_in_session(&mut session, &generator).await;
                }
                Command::Notice(message) => {
                    println!("{}", message.bright_yellow());
                    pause_for_user();
                }
                Command::None => {}
            },
            StepMenuOption::Back => {
                session.dispatch(Msg::Back);
            }
            StepMenuOption::Exit => break,
        }
    }

    println!("{}", "Progress saved. Run the wizard again to resume.".dimmed());
    Ok(())
}
