//! Small terminal helpers shared by the interactive screens

use std::io::{self, Write};

use colored::*;

use deploy_wizard::form::steps::{Step, TOTAL_STEPS};
use deploy_wizard::form::validate::FieldErrors;

pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

/// Wait for Enter
pub fn pause_for_user() {
    print!("Press Enter to continue...");
    let _ = io::stdout().flush();
    let mut input = String::new();
    let _ = io::stdin().read_line(&mut input);
}

/// Step title, progress bar and step labels
pub fn print_step_header(step: Step) {
    println!();
    println!("  {}", "🚀 MLOps Deployment Request".bright_blue().bold());
    println!("  {}", "══════════════════════════".bright_blue());
    println!();

    let width = 32usize;
    let filled = width * step.number() as usize / TOTAL_STEPS as usize;
    println!(
        "  {}{} {}%",
        "█".repeat(filled).bright_green(),
        "░".repeat(width - filled).dimmed(),
        step.progress_percent()
    );

    let labels: Vec<String> = Step::ALL
        .iter()
        .map(|s| {
            if *s == step {
                s.label().bright_white().bold().to_string()
            } else if s.number() < step.number() {
                s.label().green().to_string()
            } else {
                s.label().dimmed().to_string()
            }
        })
        .collect();
    println!("  {}", labels.join(" › "));
    println!();
    println!("  {}", step.to_string().bright_white().bold());
    println!("  {}", step.subtitle().dimmed());
    println!();
}

pub fn print_errors(errors: &FieldErrors) {
    if errors.is_empty() {
        return;
    }
    println!("  {}", "Please fix the following:".bright_red().bold());
    for (key, message) in errors {
        println!("  {} {} {}", "✗".bright_red(), format!("{}:", key).dimmed(), message);
    }
    println!();
}

/// Render a value or a dimmed placeholder when blank
pub fn display_value(value: &str) -> ColoredString {
    if value.is_empty() {
        "(empty)".dimmed()
    } else {
        value.bright_white()
    }
}
