//! Interactive feature table editor

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, Select};

use deploy_wizard::features::delimited::EXPORT_FILE_NAME;
use deploy_wizard::features::{FeatureCommand, FeatureEdit, FeatureField, StepPart, export_delimited};
use deploy_wizard::form::fields::ScalarField;
use deploy_wizard::form::model::{Feature, FeatureType, PREPROCESSING_CATALOG, StepSlot};
use deploy_wizard::form::wizard::Msg;
use deploy_wizard::session::{Session, SessionStore};

use super::steps::prompt_text;
use crate::cli::commands::features::print_feature_table;
use crate::cli::ui::pause_for_user;

#[derive(Debug, Clone, Copy)]
enum FeatureMenuOption {
    Add,
    Edit,
    MoveUp,
    MoveDown,
    Remove,
    Import,
    Export,
    Notes,
    Done,
}

impl std::fmt::Display for FeatureMenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureMenuOption::Add => write!(f, "➕ {} - {}", "Add".bright_green().bold(), "Append a feature".dimmed()),
            FeatureMenuOption::Edit => write!(f, "✏️  {} - {}", "Edit".bright_yellow().bold(), "Change a feature and its steps".dimmed()),
            FeatureMenuOption::MoveUp => write!(f, "⬆️  {} - {}", "Move up".bright_cyan().bold(), "Raise a feature one position".dimmed()),
            FeatureMenuOption::MoveDown => write!(f, "⬇️  {} - {}", "Move down".bright_cyan().bold(), "Lower a feature one position".dimmed()),
            FeatureMenuOption::Remove => write!(f, "🗑️  {} - {}", "Remove".bright_red().bold(), "Delete a feature".dimmed()),
            FeatureMenuOption::Import => write!(f, "📥 {} - {}", "Import".bright_blue().bold(), "Replace the table from a CSV file".dimmed()),
            FeatureMenuOption::Export => write!(f, "📤 {} - {}", "Export".bright_blue().bold(), "Write the table to a CSV file".dimmed()),
            FeatureMenuOption::Notes => write!(f, "📝 {} - {}", "Notes".white().bold(), "Edit feature notes".dimmed()),
            FeatureMenuOption::Done => write!(f, "🔙 {} - {}", "Done".white().bold(), "Return to the step".dimmed()),
        }
    }
}

fn features<S: SessionStore>(session: &Session<S>) -> &[Feature] {
    &session.state().data.features
}

fn choose_feature<S: SessionStore>(session: &Session<S>, prompt: &str) -> Result<Option<usize>> {
    let rows = features(session);
    if rows.is_empty() {
        println!("{}", "No features yet".bright_yellow());
        pause_for_user();
        return Ok(None);
    }
    let items: Vec<String> = rows.iter().map(|f| format!("{}. {}", f.order, f.summary())).collect();
    Ok(Some(Select::new().with_prompt(prompt).items(&items).default(0).interact()?))
}

fn apply<S: SessionStore>(session: &mut Session<S>, command: FeatureCommand) {
    session.dispatch(Msg::EditFeatures(command));
}

pub fn run_feature_menu<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    loop {
        println!();
        print_feature_table(features(session));
        println!();

        let options = [
            FeatureMenuOption::Add,
            FeatureMenuOption::Edit,
            FeatureMenuOption::MoveUp,
            FeatureMenuOption::MoveDown,
            FeatureMenuOption::Remove,
            FeatureMenuOption::Import,
            FeatureMenuOption::Export,
            FeatureMenuOption::Notes,
            FeatureMenuOption::Done,
        ];
        let selection = Select::new()
            .with_prompt("Feature table")
            .items(&options)
            .default(0)
            .interact()?;

        match options[selection] {
            FeatureMenuOption::Add => {
                apply(session, FeatureCommand::Add);
                let index = features(session).len() - 1;
                edit_feature(session, index)?;
            }
            FeatureMenuOption::Edit => {
                if let Some(index) = choose_feature(session, "Edit which feature?")? {
                    edit_feature(session, index)?;
                }
            }
            FeatureMenuOption::MoveUp => {
                if let Some(index) = choose_feature(session, "Move which feature up?")? {
                    apply(session, FeatureCommand::MoveUp(index));
                }
            }
            FeatureMenuOption::MoveDown => {
                if let Some(index) = choose_feature(session, "Move which feature down?")? {
                    apply(session, FeatureCommand::MoveDown(index));
                }
            }
            FeatureMenuOption::Remove => {
                if let Some(index) = choose_feature(session, "Remove which feature?")? {
                    let id = features(session)[index].id.clone();
                    apply(session, FeatureCommand::Remove(id));
                }
            }
            FeatureMenuOption::Import => import_features(session)?,
            FeatureMenuOption::Export => export_features(session)?,
            FeatureMenuOption::Notes => {
                let current = session.state().data.feature_notes.clone();
                let notes = prompt_text(ScalarField::FeatureNotes.label(), &current, None)?;
                session.dispatch(Msg::UpdateField(ScalarField::FeatureNotes, notes));
            }
            FeatureMenuOption::Done => return Ok(()),
        }
    }
}

fn edit_feature<S: SessionStore>(session: &mut Session<S>, index: usize) -> Result<()> {
    let feature = features(session)[index].clone();
    let id = feature.id.clone();
    let mut edits = Vec::new();

    let name = prompt_text("Feature name", &feature.name, Some("e.g., customer_age"))?;
    edits.push(FeatureEdit::Scalar(FeatureField::Name, name));

    let type_index = FeatureType::ALL
        .iter()
        .position(|t| *t == feature.feature_type)
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Type")
        .items(&FeatureType::ALL)
        .default(type_index)
        .interact()?;
    edits.push(FeatureEdit::Type(FeatureType::ALL[selection]));

    let transformation = prompt_text("Transformation", &feature.transformation, None)?;
    edits.push(FeatureEdit::Scalar(FeatureField::Transformation, transformation));

    let description = prompt_text("Description", &feature.description, None)?;
    edits.push(FeatureEdit::Scalar(FeatureField::Description, description));

    if Confirm::new()
        .with_prompt("Edit preprocessing steps?")
        .default(false)
        .interact()?
    {
        for slot in StepSlot::ALL {
            let current = feature.step(slot).cloned().unwrap_or_default();
            let name = prompt_step_name(slot, &current.name)?;
            let value = if name.is_empty() {
                String::new()
            } else {
                prompt_text(&format!("Step {} value", slot.number()), &current.value, Some("e.g., 0.99"))?
            };
            edits.push(FeatureEdit::Step { slot, part: StepPart::Name, value: name });
            edits.push(FeatureEdit::Step { slot, part: StepPart::Value, value });
        }
    }

    for edit in edits {
        apply(session, FeatureCommand::Update { id: id.clone(), edit });
    }
    Ok(())
}

fn prompt_step_name(slot: StepSlot, current: &str) -> Result<String> {
    let mut items: Vec<&str> = vec!["(none)"];
    items.extend(PREPROCESSING_CATALOG);
    items.push("Custom...");

    let default = if current.is_empty() {
        0
    } else {
        items.iter().position(|item| *item == current).unwrap_or(items.len() - 1)
    };

    let selection = Select::new()
        .with_prompt(format!("Step {}", slot.number()))
        .items(&items)
        .default(default)
        .interact()?;

    match selection {
        0 => Ok(String::new()),
        i if i == items.len() - 1 => prompt_text(&format!("Step {} name", slot.number()), current, None),
        i => Ok(items[i].to_string()),
    }
}

fn import_features<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    let path: String = Input::new().with_prompt("CSV file to import").interact_text()?;
    let path = PathBuf::from(path.trim());
    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;

    if !features(session).is_empty()
        && !Confirm::new()
            .with_prompt("Importing replaces the current table. Continue?")
            .default(true)
            .interact()?
    {
        return Ok(());
    }

    apply(session, FeatureCommand::Import(text));
    println!(
        "{} Imported {} features",
        "✓".bright_green().bold(),
        features(session).len()
    );
    pause_for_user();
    Ok(())
}

fn export_features<S: SessionStore>(session: &Session<S>) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Export to")
        .with_initial_text(EXPORT_FILE_NAME)
        .interact_text()?;
    let path = PathBuf::from(path.trim());
    fs::write(&path, export_delimited(features(session)))
        .with_context(|| format!("Failed to write {:?}", path))?;

    println!("{} Exported to {}", "✓".bright_green().bold(), path.display());
    pause_for_user();
    Ok(())
}
