//! Per-step display and editing

use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use dialoguer::{Input, Select};

use deploy_wizard::form::alerts::AlertEmailCommand;
use deploy_wizard::form::fields::{MACHINE_TYPES, MODEL_TYPES, SCHEDULE_PRESETS, ScalarField};
use deploy_wizard::form::steps::Step;
use deploy_wizard::form::uploads::{UploadSlot, UploadedFile};
use deploy_wizard::form::validate::is_required;
use deploy_wizard::form::wizard::{Command, Msg, WizardState};
use deploy_wizard::session::{Session, SessionStore};

use super::features::run_feature_menu;
use crate::cli::commands::features::print_feature_table;
use crate::cli::ui::{display_value, pause_for_user};

fn field_label(field: ScalarField) -> String {
    if is_required(field) {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

fn print_fields(state: &WizardState, fields: &[ScalarField]) {
    for field in fields {
        println!(
            "  {:<30} {}",
            field_label(*field).bright_white(),
            display_value(field.get(&state.data))
        );
    }
    println!();
}

pub fn print_step_summary(state: &WizardState) {
    let step = state.current_step;
    match step {
        Step::Features => {
            print_feature_table(&state.data.features);
            println!();
            println!("  {:<30} {}", "Feature notes", display_value(&state.data.feature_notes));
            println!();
        }
        Step::Uploads => {
            for slot in UploadSlot::ALL {
                let file = match state.data.uploaded_files.get(slot) {
                    Some(file) => format!("{} ({})", file.name, file.display_size()).bright_white(),
                    None => "(none)".dimmed(),
                };
                println!(
                    "  {:<22} {} {}",
                    slot.label().bright_white(),
                    file,
                    format!("[{}]", slot.accepted_extensions().join(", ")).dimmed()
                );
            }
            println!();
        }
        Step::Infrastructure => {
            print_fields(state, &ScalarField::for_step(step));
            println!("  {}", "Alert emails".bright_white());
            for email in &state.data.alert_emails {
                println!("    {} {}", "•".bright_green(), display_value(email));
            }
            println!();
        }
        _ => print_fields(state, &ScalarField::for_step(step)),
    }
}

pub fn edit_step<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    let step = session.state().current_step;
    match step {
        Step::Features => run_feature_menu(session),
        Step::Uploads => edit_uploads(session),
        Step::Infrastructure => {
            edit_fields(session, step)?;
            edit_alert_emails(session)
        }
        Step::Download => Ok(()),
        _ => edit_fields(session, step),
    }
}

fn edit_fields<S: SessionStore>(session: &mut Session<S>, step: Step) -> Result<()> {
    for field in ScalarField::for_step(step) {
        let current = field.get(&session.state().data).to_string();
        let value = prompt_field(field, &current)?;
        if value != current {
            session.dispatch(Msg::UpdateField(field, value));
        }
    }
    Ok(())
}

pub fn prompt_text(label: &str, current: &str, hint: Option<&str>) -> Result<String> {
    let prompt = match hint {
        Some(hint) => format!("{} {}", label, format!("({})", hint).dimmed()),
        None => label.to_string(),
    };
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Pick from `(value, label)` choices; `Custom` falls through to free text
fn prompt_choice(label: &str, current: &str, choices: &[(&str, &str)]) -> Result<String> {
    let mut items: Vec<String> = choices.iter().map(|(_, text)| text.to_string()).collect();
    items.push("Custom...".to_string());

    let default = choices
        .iter()
        .position(|(value, _)| *value == current)
        .unwrap_or(items.len() - 1);

    let selection = Select::new()
        .with_prompt(label)
        .items(&items)
        .default(default)
        .interact()?;

    match choices.get(selection) {
        Some((value, _)) => Ok(value.to_string()),
        None => prompt_text(label, current, None),
    }
}

fn prompt_field(field: ScalarField, current: &str) -> Result<String> {
    let label = field_label(field);
    match field {
        ScalarField::ModelType => prompt_choice(&label, current, &MODEL_TYPES),
        ScalarField::MachineType => {
            let choices: Vec<(&str, &str)> = MACHINE_TYPES.iter().map(|m| (*m, *m)).collect();
            prompt_choice(&label, current, &choices)
        }
        ScalarField::Schedule => prompt_choice(&label, current, &SCHEDULE_PRESETS),
        ScalarField::TargetDeploymentDate => prompt_text(&label, current, Some("YYYY-MM-DD")),
        _ => prompt_text(&label, current, field.placeholder()),
    }
}

fn edit_uploads<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    loop {
        let mut items: Vec<String> = UploadSlot::ALL
            .iter()
            .map(|slot| format!("{} - {}", slot.label(), slot.description()))
            .collect();
        items.push("Done".to_string());

        let selection = Select::new()
            .with_prompt("Choose a file slot")
            .items(&items)
            .default(0)
            .interact()?;

        let Some(slot) = UploadSlot::ALL.get(selection).copied() else {
            return Ok(());
        };

        let actions = ["Select file", "Clear", "Cancel"];
        let action = Select::new()
            .with_prompt(slot.label())
            .items(&actions)
            .default(0)
            .interact()?;

        let file = match action {
            0 => {
                let path: String = Input::new()
                    .with_prompt(format!("Path ({})", slot.accepted_extensions().join(", ")))
                    .interact_text()?;
                match UploadedFile::from_path(&PathBuf::from(path.trim())) {
                    Ok(file) => Some(file),
                    Err(e) => {
                        println!("{} {:#}", "Error:".bright_red(), e);
                        pause_for_user();
                        continue;
                    }
                }
            }
            1 => None,
            _ => continue,
        };

        if let Command::Notice(message) = session.dispatch(Msg::SetUpload(slot, file)) {
            println!("{}", message.bright_yellow());
            pause_for_user();
        }
    }
}

fn choose_row(prompt: &str, emails: &[String]) -> Result<usize> {
    let items: Vec<String> = emails
        .iter()
        .map(|email| if email.is_empty() { "(empty)".to_string() } else { email.clone() })
        .collect();
    Ok(Select::new().with_prompt(prompt).items(&items).default(0).interact()?)
}

fn edit_alert_emails<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    loop {
        let emails = session.state().data.alert_emails.clone();
        println!();
        for email in &emails {
            println!("    {} {}", "•".bright_green(), display_value(email));
        }

        let actions = ["Edit email", "Add email", "Remove email", "Done"];
        let action = Select::new()
            .with_prompt("Alert emails")
            .items(&actions)
            .default(0)
            .interact()?;

        let command = match action {
            0 => {
                let index = choose_row("Which email?", &emails)?;
                let value = prompt_text("Email", &emails[index], Some("alerts@company.com"))?;
                AlertEmailCommand::Update { index, value }
            }
            1 => AlertEmailCommand::Add,
            2 => AlertEmailCommand::Remove {
                index: choose_row("Remove which email?", &emails)?,
            },
            _ => return Ok(()),
        };

        if let Command::Notice(message) = session.dispatch(Msg::EditAlertEmails(command)) {
            println!("{}", message.bright_yellow());
        }
    }
}
