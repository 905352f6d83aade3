//! Inspect or discard the saved wizard session

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use deploy_wizard::config::Config;
use deploy_wizard::form::fields::ScalarField;
use deploy_wizard::form::steps::Step;

use super::common::open_session;
use super::features::print_feature_table;
use crate::cli::ui::{display_value, print_errors};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print the saved session
    Show {
        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },
    /// Discard the saved session
    Reset,
}

pub fn session_command(cmd: SessionCommands, config: &Config) -> Result<()> {
    match cmd {
        SessionCommands::Show { json } => {
            let session = open_session(config, false)?;
            let state = session.state();

            if json {
                println!("{}", serde_json::to_string_pretty(state)?);
                return Ok(());
            }

            println!("{} {}", "Current step:".dimmed(), state.current_step.to_string().bright_white().bold());
            println!("{} {}", "Started:".dimmed(), state.data.submission_date());
            print_errors(&state.errors);

            for step in Step::ALL {
                let fields = ScalarField::for_step(step);
                if fields.is_empty() {
                    continue;
                }
                println!();
                println!("{}", step.title().bright_blue().bold());
                for field in fields {
                    println!("  {:<28} {}", field.label(), display_value(field.get(&state.data)));
                }
                if step == Step::Features {
                    print_feature_table(&state.data.features);
                }
            }

            println!();
            println!("{}", Step::Uploads.title().bright_blue().bold());
            println!("  {} file(s) attached", state.data.uploaded_files.count());

            println!();
            println!("{}", "Alert emails".bright_blue().bold());
            for email in &state.data.alert_emails {
                println!("  {}", display_value(email));
            }
        }
        SessionCommands::Reset => {
            let session = open_session(config, true)?;
            println!(
                "{} Session reset ({})",
                "✓".bright_green().bold(),
                session.store().path().display()
            );
        }
    }
    Ok(())
}
