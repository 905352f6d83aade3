//! Non-interactive generation from a form document

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::*;

use deploy_wizard::artifacts::Generator;
use deploy_wizard::config::Config;
use deploy_wizard::form::wizard::{Command, Msg, WizardState};
use deploy_wizard::session::{MemoryStore, Session, SessionStore};

use super::common::{generate_in_session, load_form, print_delivery, print_file_list, save_files};
use crate::cli::ui::print_errors;

#[derive(Args)]
pub struct GenerateArgs {
    /// Form document (.json or .toml)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output directory (defaults to the configured output_dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Save each file separately instead of one zip archive
    #[arg(long)]
    pub individual: bool,
    /// Skip the generation delay
    #[arg(long)]
    pub no_delay: bool,
}

/// Walk the state machine forward until it asks for generation
fn walk_to_download<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    loop {
        let step = session.state().current_step;
        match session.dispatch(Msg::Next) {
            Command::Generate => return Ok(()),
            Command::None if session.state().has_errors() => {
                println!("{} {}", "✗".bright_red().bold(), step.to_string().bright_white().bold());
                print_errors(&session.state().errors);
                anyhow::bail!("Form is incomplete at step {} ({})", step.number(), step.title());
            }
            Command::None | Command::Notice(_) => {}
        }
    }
}

pub async fn generate_command(args: GenerateArgs, config: &Config) -> Result<()> {
    let data = load_form(&args.input)?;
    log::info!("Loaded form from {:?}", args.input);

    let mut store = MemoryStore::default();
    store.commit(&WizardState::new(data))?;
    let mut session = Session::open(store)?;
    walk_to_download(&mut session)?;

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        config.settings.generation_delay()
    };
    let generator = Generator::new(delay);
    let files = generate_in_session(&mut session, &generator).await;

    println!("{}", "Generated files:".bright_white().bold());
    print_file_list(&files);
    println!();

    let out_dir = args.out.unwrap_or_else(|| config.settings.output_dir.clone());
    let delivery = save_files(
        &files,
        &session.state().data,
        out_dir,
        config.settings.download_stagger(),
        args.individual,
    )
    .await;
    print_delivery(&delivery);
    Ok(())
}
