//! Values derived from the form that several artifacts share

use once_cell::sync::Lazy;
use regex::Regex;

use super::clock::Clock;
use crate::form::alerts;
use crate::form::model::{Feature, FormData, PreprocessingStep};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lower-cased initiative name with whitespace runs replaced by `_`
pub fn name_slug(initiative_name: &str) -> String {
    WHITESPACE
        .replace_all(&initiative_name.to_lowercase(), "_")
        .into_owned()
}

/// Naming key used across all artifacts, e.g. `customer_churn_2_1_0`
pub fn model_code(initiative_name: &str, model_version: &str) -> String {
    format!("{}_{}", name_slug(initiative_name), model_version.replace('.', "_"))
}

/// Repository path the artifacts are meant to be committed under
pub fn target_directory(model_code: &str, model_version: &str) -> String {
    format!("initiatives/{}/deployment/{}/", model_code, model_version)
}

/// `value`, or `fallback` when `value` is empty
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Processed table name, defaulting to `<base>_processed`
pub fn processed_table(processed: &str, base: &str) -> String {
    if processed.is_empty() {
        format!("{}_processed", base)
    } else {
        processed.to_string()
    }
}

/// Everything a template needs, computed once per generation pass
pub struct ArtifactContext<'a> {
    pub data: &'a FormData,
    pub model_code: String,
    pub target_directory: String,
    pub features: Vec<&'a Feature>,
    pub alert_emails: Vec<&'a str>,
    clock: &'a dyn Clock,
}

impl<'a> ArtifactContext<'a> {
    pub fn new(data: &'a FormData, clock: &'a dyn Clock) -> Self {
        let model_code = model_code(&data.initiative_name, &data.model_version);
        let target_directory = target_directory(&model_code, &data.model_version);

        Self {
            data,
            target_directory,
            model_code,
            features: data.sorted_features(),
            alert_emails: alerts::active(&data.alert_emails),
            clock,
        }
    }

    /// Fresh timestamp; each artifact asks for its own
    pub fn timestamp(&self) -> String {
        self.clock.timestamp()
    }

    /// Render every feature (in order) with its active steps and join with newlines
    pub fn render_features<F>(&self, render: F) -> String
    where
        F: Fn(&Feature, &[&PreprocessingStep]) -> String,
    {
        self.features
            .iter()
            .map(|feature| render(feature, &feature.active_steps()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
