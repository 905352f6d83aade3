//! Session handle: the wizard state plus the store it is committed to
//!
//! Every dispatched message is applied and then committed, so the presentation
//! layer only ever reads committed state.

pub mod store;

use anyhow::Result;

use crate::form::wizard::{Command, Msg, WizardState, update};

pub use store::{JsonFileStore, MemoryStore, SessionStore};

pub struct Session<S: SessionStore> {
    state: WizardState,
    store: S,
}

impl<S: SessionStore> Session<S> {
    /// Resume the stored state, or start fresh when nothing is stored
    pub fn open(store: S) -> Result<Self> {
        let state = match store.read()? {
            Some(mut state) => {
                state.is_submitting = false;
                state.data.normalize();
                log::info!("Resumed session at step {}", state.current_step.number());
                state
            }
            None => WizardState::default(),
        };
        Ok(Self { state, store })
    }

    /// Discard anything stored and start from a blank form
    pub fn fresh(mut store: S) -> Result<Self> {
        store.clear()?;
        let mut session = Self {
            state: WizardState::default(),
            store,
        };
        session.commit()?;
        Ok(session)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a message and commit the result.
    ///
    /// A failed commit is logged; the in-memory state is kept either way.
    pub fn dispatch(&mut self, msg: Msg) -> Command {
        let command = update(&mut self.state, msg);
        if let Err(e) = self.commit() {
            log::warn!("Failed to commit session: {:#}", e);
        }
        command
    }

    pub fn commit(&mut self) -> Result<()> {
        self.store.commit(&self.state)
    }
}
