//! Report per-step validation for a form document

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use deploy_wizard::form::steps::Step;
use deploy_wizard::form::validate::validate_step;

use super::common::load_form;
use crate::cli::ui::print_errors;

#[derive(Args)]
pub struct ValidateArgs {
    /// Form document (.json or .toml)
    #[arg(short, long)]
    pub input: PathBuf,
}

pub fn validate_command(args: ValidateArgs) -> Result<()> {
    let data = load_form(&args.input)?;
    let mut failing = 0;

    for step in Step::ALL {
        let errors = validate_step(step, &data);
        if errors.is_empty() {
            println!("{} {}", "✓".bright_green().bold(), step);
        } else {
            failing += 1;
            println!("{} {}", "✗".bright_red().bold(), step);
            print_errors(&errors);
        }
    }

    if failing > 0 {
        anyhow::bail!("{} step(s) have missing required fields", failing);
    }
    println!();
    println!("{}", "Form is complete".bright_green().bold());
    Ok(())
}
