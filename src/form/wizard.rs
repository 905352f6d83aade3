//! Wizard state machine
//!
//! Follows the message/update pattern: the presentation layer sends a `Msg`,
//! `update` mutates the state and returns a `Command` describing the side
//! effect the caller should run. Forward moves are gated by the step validator;
//! backward moves never are.

use serde::{Deserialize, Serialize};

use super::alerts::{self, AlertEmailCommand};
use super::fields::ScalarField;
use super::model::{Feature, FormData};
use super::steps::Step;
use super::uploads::{UploadSlot, UploadedFile, UploadedFiles};
use super::validate::{FieldErrors, validate_step};
use crate::features::FeatureCommand;

/// Complete state of one wizard session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub data: FormData,
    pub current_step: Step,
    pub errors: FieldErrors,
    pub is_submitting: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(FormData::default())
    }
}

/// Events the wizard reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    UpdateField(ScalarField, String),
    SetFeatures(Vec<Feature>),
    EditFeatures(FeatureCommand),
    SetUploadedFiles(UploadedFiles),
    SetUpload(UploadSlot, Option<UploadedFile>),
    SetAlertEmails(Vec<String>),
    EditAlertEmails(AlertEmailCommand),
    Next,
    Back,
    SubmitStarted,
    SubmitFinished,
}

/// Side effects requested by `update`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    None,
    /// The wizard just arrived on the last step; artifacts should be generated
    Generate,
    /// An edit was refused; the message explains why
    Notice(String),
}

impl WizardState {
    pub fn new(data: FormData) -> Self {
        Self {
            data,
            current_step: Step::FIRST,
            errors: FieldErrors::new(),
            is_submitting: false,
        }
    }

    /// Replace one scalar field. Existing errors are kept until the next validation.
    pub fn update_field(&mut self, field: ScalarField, value: impl Into<String>) {
        field.set(&mut self.data, value.into());
    }

    pub fn set_features(&mut self, features: Vec<Feature>) {
        self.data.features = features;
    }

    pub fn set_uploaded_files(&mut self, files: UploadedFiles) {
        self.data.uploaded_files = files;
    }

    /// Replace the alert email rows. An empty list becomes one blank row.
    pub fn set_alert_emails(&mut self, emails: Vec<String>) {
        self.data.alert_emails = alerts::normalize(emails);
    }

    /// Validate the current step and move forward when it passes.
    ///
    /// On failure the error map is replaced and the step is unchanged. On the
    /// last step this is a no-op apart from clearing errors.
    pub fn advance(&mut self) -> Command {
        let errors = validate_step(self.current_step, &self.data);
        if !errors.is_empty() {
            log::debug!(
                "Step {} blocked by {} error(s)",
                self.current_step.number(),
                errors.len()
            );
            self.errors = errors;
            return Command::None;
        }

        self.errors.clear();
        if self.current_step.is_last() {
            return Command::None;
        }

        self.current_step = self.current_step.next();
        log::debug!("Advanced to step {}", self.current_step.number());

        if self.current_step.is_last() {
            Command::Generate
        } else {
            Command::None
        }
    }

    /// Move one step back without validating; always clears errors
    pub fn retreat(&mut self) {
        self.current_step = self.current_step.prev();
        self.errors.clear();
        log::debug!("Retreated to step {}", self.current_step.number());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_for(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(|s| s.as_str())
    }
}

/// Apply a message to the state
pub fn update(state: &mut WizardState, msg: Msg) -> Command {
    match msg {
        Msg::UpdateField(field, value) => {
            state.update_field(field, value);
            Command::None
        }
        Msg::SetFeatures(features) => {
            state.set_features(features);
            Command::None
        }
        Msg::EditFeatures(command) => {
            let features = command.apply(&state.data.features);
            state.set_features(features);
            Command::None
        }
        Msg::SetUploadedFiles(files) => {
            state.set_uploaded_files(files);
            Command::None
        }
        Msg::SetUpload(slot, file) => match state.data.uploaded_files.set(slot, file) {
            Ok(()) => Command::None,
            Err(reason) => Command::Notice(reason),
        },
        Msg::SetAlertEmails(emails) => {
            state.set_alert_emails(emails);
            Command::None
        }
        Msg::EditAlertEmails(command) => {
            if matches!(command, AlertEmailCommand::Remove { .. }) && state.data.alert_emails.len() <= 1 {
                log::warn!("Refusing to remove the last alert email row");
                return Command::Notice("At least one alert email row is required".to_string());
            }
            let emails = command.apply(&state.data.alert_emails);
            state.set_alert_emails(emails);
            Command::None
        }
        Msg::Next => state.advance(),
        Msg::Back => {
            state.retreat();
            Command::None
        }
        Msg::SubmitStarted => {
            state.is_submitting = true;
            Command::None
        }
        Msg::SubmitFinished => {
            state.is_submitting = false;
            Command::None
        }
    }
}
