//! Feature table operations on the saved session

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use deploy_wizard::config::Config;
use deploy_wizard::features::delimited::EXPORT_FILE_NAME;
use deploy_wizard::features::{FeatureCommand, FeatureEdit, FeatureField, export_delimited};
use deploy_wizard::form::model::{Feature, FeatureType};
use deploy_wizard::form::wizard::Msg;
use deploy_wizard::session::{Session, SessionStore};

use super::common::open_session;

#[derive(Subcommand)]
pub enum FeaturesCommands {
    /// List features in order
    List,
    /// Write the table as delimited text
    Export {
        /// Destination file, `-` for stdout
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Replace the table with rows read from delimited text
    Import {
        file: PathBuf,
    },
    /// Append a feature
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        feature_type: Option<String>,
    },
    /// Set one field of a feature, e.g. `set 2 step1.name "Impute Nulls"`
    Set {
        /// Feature order (1-based)
        order: usize,
        /// name, type, description, transformation or stepK.name / stepK.value
        path: String,
        value: String,
    },
    /// Remove a feature
    Remove {
        order: usize,
    },
    /// Move a feature to another position
    Move {
        from: usize,
        to: usize,
    },
}

fn feature_at<'a>(features: &'a [Feature], order: usize) -> Result<&'a Feature> {
    order
        .checked_sub(1)
        .and_then(|index| features.get(index))
        .with_context(|| format!("No feature at position {} (have {})", order, features.len()))
}

pub fn print_feature_table(features: &[Feature]) {
    if features.is_empty() {
        println!("  {}", "No features defined".dimmed());
        return;
    }
    for feature in features {
        let name = if feature.name.is_empty() { "(unnamed)" } else { feature.name.as_str() };
        println!(
            "  {:>3}. {} {} {}",
            feature.order,
            name.bright_white().bold(),
            format!("({})", feature.feature_type).bright_blue(),
            feature.step_chain().dimmed()
        );
    }
}

fn edit<S: SessionStore>(session: &mut Session<S>, command: FeatureCommand) {
    session.dispatch(Msg::EditFeatures(command));
}

pub fn features_command(cmd: FeaturesCommands, config: &Config) -> Result<()> {
    let mut session = open_session(config, false)?;

    match cmd {
        FeaturesCommands::List => {
            print_feature_table(&session.state().data.features);
        }
        FeaturesCommands::Export { out } => {
            let text = export_delimited(&session.state().data.features);
            if out.as_os_str() == "-" {
                println!("{}", text);
            } else {
                fs::write(&out, text).with_context(|| format!("Failed to write {:?}", out))?;
                println!("{} Exported features to {}", "✓".bright_green().bold(), out.display());
            }
        }
        FeaturesCommands::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            edit(&mut session, FeatureCommand::Import(text));
            println!(
                "{} Imported {} features",
                "✓".bright_green().bold(),
                session.state().data.features.len()
            );
        }
        FeaturesCommands::Add { name, feature_type } => {
            edit(&mut session, FeatureCommand::Add);
            let id = session
                .state()
                .data
                .features
                .last()
                .map(|f| f.id.clone())
                .context("Feature was not added")?;
            if let Some(name) = name {
                let edit_cmd = FeatureEdit::Scalar(FeatureField::Name, name);
                edit(&mut session, FeatureCommand::Update { id: id.clone(), edit: edit_cmd });
            }
            if let Some(feature_type) = feature_type {
                let edit_cmd = FeatureEdit::Type(FeatureType::parse_lenient(&feature_type));
                edit(&mut session, FeatureCommand::Update { id, edit: edit_cmd });
            }
            println!("{} Added feature #{}", "✓".bright_green().bold(), session.state().data.features.len());
        }
        FeaturesCommands::Set { order, path, value } => {
            let edit_cmd = FeatureEdit::from_path(&path, value).map_err(anyhow::Error::msg)?;
            let id = feature_at(&session.state().data.features, order)?.id.clone();
            edit(&mut session, FeatureCommand::Update { id, edit: edit_cmd });
            println!("{} Updated feature #{} {}", "✓".bright_green().bold(), order, path);
        }
        FeaturesCommands::Remove { order } => {
            let id = feature_at(&session.state().data.features, order)?.id.clone();
            edit(&mut session, FeatureCommand::Remove(id));
            println!("{} Removed feature #{}", "✓".bright_green().bold(), order);
        }
        FeaturesCommands::Move { from, to } => {
            let count = session.state().data.features.len();
            if from == 0 || to == 0 || from > count || to > count {
                anyhow::bail!("Positions must be between 1 and {}", count);
            }
            edit(&mut session, FeatureCommand::Move { from: from - 1, to: to - 1 });
            print_feature_table(&session.state().data.features);
        }
    }

    Ok(())
}
