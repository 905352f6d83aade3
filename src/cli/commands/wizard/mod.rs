//! Interactive deployment request wizard with TTY detection

use anyhow::Result;
use clap::Args;
use is_terminal::IsTerminal;

use deploy_wizard::config::Config;

use super::common::open_session;

mod download;
mod features;
mod interactive;
mod steps;

#[derive(Args)]
pub struct WizardArgs {
    /// Discard the saved session and start from a blank form
    #[arg(long)]
    pub fresh: bool,
}

pub async fn wizard_command(args: WizardArgs, config: &Config) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        println!("The wizard needs an interactive terminal.");
        println!();
        println!("For scripted use, try one of:");
        println!();
        println!("  deploy-wizard validate --input form.json    # Check required fields");
        println!("  deploy-wizard generate --input form.json    # Generate deployment files");
        println!("  deploy-wizard features --help               # Edit the saved feature table");
        return Ok(());
    }

    let session = open_session(config, args.fresh)?;
    interactive::run_wizard(session, config).await
}
