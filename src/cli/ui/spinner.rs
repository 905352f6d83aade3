//! Progress line shown while artifacts are generated
//!
//! The line is redrawn on every tick from `Generator::status()`, so it reports
//! what the generator is doing rather than just that something is pending.

use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use deploy_wizard::artifacts::{GeneratedFile, GenerationStatus, Generator};
use deploy_wizard::form::model::FormData;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(80);

fn status_label(status: GenerationStatus) -> &'static str {
    match status {
        GenerationStatus::Idle => "Preparing deployment files...",
        GenerationStatus::InProgress => "Generating deployment files...",
        GenerationStatus::Complete => "Deployment files ready",
    }
}

fn draw(line: &str) {
    print!("\r\x1b[K{}", line);
    let _ = io::stdout().flush();
}

/// Run one generation pass, animating its status until the files are published
pub async fn show_generation(generator: &Generator, data: &FormData) -> Vec<GeneratedFile> {
    let work = generator.generate(data);
    tokio::pin!(work);

    let mut ticker = tokio::time::interval(TICK);
    let mut tick = 0usize;

    let files = loop {
        tokio::select! {
            files = &mut work => break files,
            _ = ticker.tick() => {
                let frame = FRAMES[tick % FRAMES.len()];
                draw(&format!("{} {}", frame, status_label(generator.status())));
                tick += 1;
            }
        }
    };

    draw(&format!(
        "{} {} ({} files)\n",
        "✓".green(),
        status_label(generator.status()),
        files.len()
    ));
    files
}
