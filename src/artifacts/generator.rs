//! Asynchronous front for artifact rendering
//!
//! Generation runs after a configurable delay so the caller can show an
//! in-progress state. Overlapping requests are allowed; only the most recently
//! started one publishes its files.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::{GeneratedFile, generate_artifacts};
use crate::form::model::FormData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    Idle,
    InProgress,
    Complete,
}

#[derive(Debug)]
struct Published {
    status: GenerationStatus,
    files: Vec<GeneratedFile>,
    latest_ticket: u64,
}

#[derive(Clone)]
pub struct Generator {
    delay: Duration,
    clock: Arc<dyn Clock>,
    published: Arc<Mutex<Published>>,
}

impl Generator {
    pub fn new(delay: Duration) -> Self {
        Self::with_clock(delay, Arc::new(SystemClock))
    }

    pub fn with_clock(delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            delay,
            clock,
            published: Arc::new(Mutex::new(Published {
                status: GenerationStatus::Idle,
                files: Vec::new(),
                latest_ticket: 0,
            })),
        }
    }

    pub fn status(&self) -> GenerationStatus {
        self.lock().status
    }

    /// Files from the latest completed run
    pub fn files(&self) -> Vec<GeneratedFile> {
        self.lock().files.clone()
    }

    /// Render artifacts for `data` after the configured delay.
    ///
    /// Always returns the files rendered by this call. They are published only
    /// when no newer request started in the meantime.
    pub async fn generate(&self, data: &FormData) -> Vec<GeneratedFile> {
        let ticket = {
            let mut published = self.lock();
            published.latest_ticket += 1;
            published.status = GenerationStatus::InProgress;
            published.latest_ticket
        };
        log::info!("Generation #{} started", ticket);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let files = generate_artifacts(data, self.clock.as_ref());

        let mut published = self.lock();
        if published.latest_ticket == ticket {
            published.files = files.clone();
            published.status = GenerationStatus::Complete;
            log::info!("Generation #{} complete", ticket);
        } else {
            log::debug!(
                "Generation #{} superseded by #{}",
                ticket,
                published.latest_ticket
            );
        }
        files
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Published> {
        // Nothing panics while holding the lock, so a poisoned guard is still consistent
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
