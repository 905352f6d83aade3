use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::{Cli, Commands};
use deploy_wizard::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file (truncated on each run) so the terminal UI stays clean
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("deploy-wizard.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    info!("Starting deploy-wizard");

    match cli.command {
        Commands::Wizard(args) => cli::commands::wizard_command(args, &config).await,
        Commands::Generate(args) => cli::commands::generate_command(args, &config).await,
        Commands::Validate(args) => cli::commands::validate_command(args),
        Commands::Features(cmd) => cli::commands::features_command(cmd, &config),
        Commands::Session(cmd) => cli::commands::session_command(cmd, &config),
    }
}
