use super::commands::features::FeaturesCommands;
use super::commands::generate::GenerateArgs;
use super::commands::session::SessionCommands;
use super::commands::validate::ValidateArgs;
use super::commands::wizard::WizardArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deploy-wizard")]
#[command(about = "Collect an MLOps deployment request and generate its deployment files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Step through the deployment request interactively
    Wizard(WizardArgs),
    /// Generate deployment files from a form document
    Generate(GenerateArgs),
    /// Check a form document against every step's required fields
    Validate(ValidateArgs),
    /// Edit the saved session's feature table
    #[command(subcommand)]
    Features(FeaturesCommands),
    /// Inspect or reset the saved session
    #[command(subcommand)]
    Session(SessionCommands),
}
