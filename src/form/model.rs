//! Data models for the deployment request form
//!
//! One `FormData` exists per wizard session. Scalar fields are plain strings
//! (empty means "not provided"), composite fields are replaced wholesale.

use serde::{Deserialize, Serialize};

use super::alerts;
use super::uploads::UploadedFiles;
use crate::features::editor::renumber;

/// Default machine type offered on the infrastructure step
pub const DEFAULT_MACHINE_TYPE: &str = "n1-standard-4";
/// Default worker ceiling
pub const DEFAULT_MAX_WORKERS: &str = "10";
/// Default disk size in GB
pub const DEFAULT_DISK_SIZE: &str = "100";
/// Daily at 6:00 AM
pub const DEFAULT_SCHEDULE: &str = "0 6 * * *";

/// Identifier of a feature row, stable for the lifetime of the row
pub type FeatureId = String;

/// Every value collected by the wizard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    // Step 1 - basic initiative information
    pub initiative_name: String,
    pub model_version: String,
    pub model_type: String,
    pub business_purpose: String,
    pub data_scientist: String,
    pub target_deployment_date: String,

    // Step 2 - repository
    pub repository_url: String,
    pub branch: String,
    pub commit_hash: String,

    // Step 3 - dataset configuration
    pub project_id: String,
    pub train_table: String,
    pub test_table: String,
    pub val_table: String,
    pub oot_table: String,
    pub processed_train_table: String,
    pub processed_test_table: String,
    pub processed_val_table: String,
    pub processed_oot_table: String,
    pub population_key: String,
    pub target_column: String,
    pub exclusion_criteria: String,

    // Step 4 - performance metrics (numeric values kept as entered)
    pub auc: String,
    pub f1_score: String,
    pub precision: String,
    pub recall: String,
    pub performance_notes: String,

    // Step 5 - features
    pub features: Vec<Feature>,
    pub feature_notes: String,

    // Step 6 - uploads (metadata only)
    pub uploaded_files: UploadedFiles,

    // Step 7 - infrastructure
    pub machine_type: String,
    pub max_workers: String,
    pub disk_size: String,
    pub schedule: String,
    pub alert_emails: Vec<String>,

    /// Set once when the session starts
    submission_date: String,
}

impl Default for FormData {
    fn default() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

impl FormData {
    /// Create a blank form stamped with the given submission date
    pub fn new(submission_date: chrono::NaiveDate) -> Self {
        Self {
            initiative_name: String::new(),
            model_version: String::new(),
            model_type: String::new(),
            business_purpose: String::new(),
            data_scientist: String::new(),
            target_deployment_date: String::new(),
            repository_url: String::new(),
            branch: String::new(),
            commit_hash: String::new(),
            project_id: String::new(),
            train_table: String::new(),
            test_table: String::new(),
            val_table: String::new(),
            oot_table: String::new(),
            processed_train_table: String::new(),
            processed_test_table: String::new(),
            processed_val_table: String::new(),
            processed_oot_table: String::new(),
            population_key: String::new(),
            target_column: String::new(),
            exclusion_criteria: String::new(),
            auc: String::new(),
            f1_score: String::new(),
            precision: String::new(),
            recall: String::new(),
            performance_notes: String::new(),
            features: Vec::new(),
            feature_notes: String::new(),
            uploaded_files: UploadedFiles::default(),
            machine_type: DEFAULT_MACHINE_TYPE.to_string(),
            max_workers: DEFAULT_MAX_WORKERS.to_string(),
            disk_size: DEFAULT_DISK_SIZE.to_string(),
            schedule: DEFAULT_SCHEDULE.to_string(),
            alert_emails: vec![String::new()],
            submission_date: submission_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Date the session was started (YYYY-MM-DD)
    pub fn submission_date(&self) -> &str {
        &self.submission_date
    }

    /// Re-establish the invariants a loaded document may not hold: at least
    /// one alert email row, and feature orders dense 1..N in rank order.
    pub fn normalize(&mut self) {
        self.alert_emails = alerts::normalize(std::mem::take(&mut self.alert_emails));
        self.features.sort_by_key(|f| f.order);
        renumber(&mut self.features);
    }

    /// Features ordered by their `order` rank
    pub fn sorted_features(&self) -> Vec<&Feature> {
        let mut features: Vec<&Feature> = self.features.iter().collect();
        features.sort_by_key(|f| f.order);
        features
    }
}

/// Column type of a model feature
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Numerical,
    Categorical,
    Boolean,
    Datetime,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl FeatureType {
    pub const ALL: [FeatureType; 4] = [
        FeatureType::Numerical,
        FeatureType::Categorical,
        FeatureType::Boolean,
        FeatureType::Datetime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numerical => "numerical",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Unset => "",
        }
    }

    /// Lenient parse used by imports: unknown text maps to `Unset`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "numerical" => Self::Numerical,
            "categorical" => Self::Categorical,
            "boolean" => Self::Boolean,
            "datetime" => Self::Datetime,
            _ => Self::Unset,
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized preprocessing operations. Step names outside this list are still accepted.
pub const PREPROCESSING_CATALOG: [&str; 10] = [
    "Cap & Floor",
    "Impute Nulls",
    "Binning",
    "Weight of Evidence Encoding",
    "Standardization",
    "Normalization",
    "Log Transform",
    "Outlier Removal",
    "One-Hot Encoding",
    "Label Encoding",
];

/// A named preprocessing operation with its parameter value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessingStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl PreprocessingStep {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Both name and value carry non-whitespace text
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// One of the four preprocessing slots on a feature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepSlot {
    One,
    Two,
    Three,
    Four,
}

impl StepSlot {
    pub const ALL: [StepSlot; 4] = [StepSlot::One, StepSlot::Two, StepSlot::Three, StepSlot::Four];

    /// 1-based slot number
    pub fn number(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }
}

/// A model input column with its preprocessing configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default = "new_feature_id")]
    pub id: FeatureId,
    /// 1-based rank, always equal to the row position
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub feature_type: FeatureType,
    #[serde(default)]
    pub transformation: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<PreprocessingStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step2: Option<PreprocessingStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step3: Option<PreprocessingStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step4: Option<PreprocessingStep>,
}

fn new_feature_id() -> FeatureId {
    uuid::Uuid::new_v4().to_string()
}

impl Feature {
    /// Create an empty numerical feature with a fresh id and blank step slots
    pub fn new(order: usize) -> Self {
        Self {
            id: new_feature_id(),
            order,
            name: String::new(),
            feature_type: FeatureType::Numerical,
            transformation: String::new(),
            description: String::new(),
            step1: Some(PreprocessingStep::default()),
            step2: Some(PreprocessingStep::default()),
            step3: Some(PreprocessingStep::default()),
            step4: Some(PreprocessingStep::default()),
        }
    }

    pub fn step(&self, slot: StepSlot) -> Option<&PreprocessingStep> {
        match slot {
            StepSlot::One => self.step1.as_ref(),
            StepSlot::Two => self.step2.as_ref(),
            StepSlot::Three => self.step3.as_ref(),
            StepSlot::Four => self.step4.as_ref(),
        }
    }

    /// Mutable access to a slot, creating an empty step when absent
    pub fn step_mut(&mut self, slot: StepSlot) -> &mut PreprocessingStep {
        let step = match slot {
            StepSlot::One => &mut self.step1,
            StepSlot::Two => &mut self.step2,
            StepSlot::Three => &mut self.step3,
            StepSlot::Four => &mut self.step4,
        };
        step.get_or_insert_with(PreprocessingStep::default)
    }

    /// Steps with both a name and a value, in slot order
    pub fn active_steps(&self) -> Vec<&PreprocessingStep> {
        StepSlot::ALL
            .iter()
            .filter_map(|slot| self.step(*slot))
            .filter(|step| step.is_complete())
            .collect()
    }

    /// Chain of named steps, e.g. "Impute Nulls → Binning"
    pub fn step_chain(&self) -> String {
        let names: Vec<&str> = StepSlot::ALL
            .iter()
            .filter_map(|slot| self.step(*slot))
            .filter(|step| !step.name.is_empty())
            .map(|step| step.name.as_str())
            .collect();

        if names.is_empty() {
            "No preprocessing steps".to_string()
        } else {
            names.join(" → ")
        }
    }

    /// One-line description, e.g. "income (numerical) [Cap & Floor=0.99]"
    pub fn summary(&self) -> String {
        let steps = self.active_steps();
        if steps.is_empty() {
            format!("{} ({})", self.name, self.feature_type)
        } else {
            let rendered: Vec<String> = steps
                .iter()
                .map(|s| format!("{}={}", s.name, s.value))
                .collect();
            format!("{} ({}) [{}]", self.name, self.feature_type, rendered.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_defaults() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let data = FormData::new(date);

        assert_eq!(data.machine_type, "n1-standard-4");
        assert_eq!(data.max_workers, "10");
        assert_eq!(data.disk_size, "100");
        assert_eq!(data.schedule, "0 6 * * *");
        assert_eq!(data.alert_emails, vec![String::new()]);
        assert!(data.features.is_empty());
        assert_eq!(data.submission_date(), "2025-06-01");
    }

    #[test]
    fn test_form_json_uses_camel_case() {
        let data = FormData::new(chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let json = serde_json::to_value(&data).unwrap();

        assert!(json.get("initiativeName").is_some());
        assert!(json.get("processedTrainTable").is_some());
        assert_eq!(json["submissionDate"], "2025-01-02");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let data: FormData =
            serde_json::from_str(r#"{"initiativeName": "Churn", "alertEmails": ["a@x.com"]}"#)
                .unwrap();

        assert_eq!(data.initiative_name, "Churn");
        assert_eq!(data.machine_type, DEFAULT_MACHINE_TYPE);
        assert_eq!(data.alert_emails, vec!["a@x.com".to_string()]);
    }

    #[test]
    fn test_normalize_loaded_document() {
        let mut data: FormData = serde_json::from_str(
            r#"{
                "alertEmails": [],
                "features": [
                    {"id": "c", "order": 7, "name": "third"},
                    {"id": "a", "order": 3, "name": "first"},
                    {"id": "b", "order": 3, "name": "second"}
                ]
            }"#,
        )
        .unwrap();

        data.normalize();

        assert_eq!(data.alert_emails, vec![String::new()]);
        let names: Vec<&str> = data.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        let orders: Vec<usize> = data.features.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_feature_type_serde() {
        assert_eq!(serde_json::to_string(&FeatureType::Unset).unwrap(), "\"\"");
        assert_eq!(
            serde_json::from_str::<FeatureType>("\"categorical\"").unwrap(),
            FeatureType::Categorical
        );
        assert_eq!(FeatureType::parse_lenient("Boolean"), FeatureType::Boolean);
        assert_eq!(FeatureType::parse_lenient("text"), FeatureType::Unset);
    }

    #[test]
    fn test_active_steps_skip_incomplete_slots() {
        let mut feature = Feature::new(1);
        *feature.step_mut(StepSlot::One) = PreprocessingStep::new("Impute Nulls", "");
        *feature.step_mut(StepSlot::Three) = PreprocessingStep::new("Binning", "10");
        *feature.step_mut(StepSlot::Four) = PreprocessingStep::new("  ", "x");

        let active = feature.active_steps();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Binning");
    }

    #[test]
    fn test_step_chain_and_summary() {
        let mut feature = Feature::new(1);
        feature.name = "income".to_string();
        assert_eq!(feature.step_chain(), "No preprocessing steps");

        *feature.step_mut(StepSlot::Two) = PreprocessingStep::new("Cap & Floor", "0.99");
        assert_eq!(feature.step_chain(), "Cap & Floor");
        assert_eq!(feature.summary(), "income (numerical) [Cap & Floor=0.99]");
    }
}
