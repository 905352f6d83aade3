//! Per-step validation of required fields
//!
//! An empty `FieldErrors` map means the step may be left in the forward direction.

use std::collections::BTreeMap;

use super::fields::ScalarField;
use super::model::FormData;
use super::steps::Step;

/// Field key -> message
pub type FieldErrors = BTreeMap<String, String>;

/// Key of the combined performance-metric error on step 4
pub const PERFORMANCE_ERROR_KEY: &str = "performance";

/// Required fields per step with their messages
fn required_fields(step: Step) -> &'static [(ScalarField, &'static str)] {
    match step {
        Step::BasicInfo => &[
            (ScalarField::InitiativeName, "Initiative name is required"),
            (ScalarField::ModelVersion, "Model version is required"),
            (ScalarField::ModelType, "Model type is required"),
            (ScalarField::DataScientist, "Data scientist email is required"),
            (ScalarField::BusinessPurpose, "Business purpose is required"),
        ],
        Step::Repository => &[
            (ScalarField::RepositoryUrl, "Repository URL is required"),
            (ScalarField::Branch, "Branch is required"),
        ],
        Step::Dataset => &[
            (ScalarField::ProjectId, "Project ID is required"),
            (ScalarField::TrainTable, "Training table is required"),
            (ScalarField::TestTable, "Testing table is required"),
            (ScalarField::PopulationKey, "Population key is required"),
            (ScalarField::TargetColumn, "Target column is required"),
        ],
        Step::Infrastructure => &[
            (ScalarField::MachineType, "Machine type is required"),
            (ScalarField::MaxWorkers, "Max workers is required"),
            (ScalarField::DiskSize, "Disk size is required"),
        ],
        Step::Performance | Step::Features | Step::Uploads | Step::Download => &[],
    }
}

/// Whether a field must be filled before leaving its step
pub fn is_required(field: ScalarField) -> bool {
    required_fields(field.step())
        .iter()
        .any(|(required, _)| *required == field)
}

/// Validate the given step against the form data
pub fn validate_step(step: Step, data: &FormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, message) in required_fields(step) {
        if field.get(data).is_empty() {
            errors.insert(field.key().to_string(), message.to_string());
        }
    }

    if step == Step::Performance {
        let metrics = [&data.auc, &data.f1_score, &data.precision, &data.recall];
        if metrics.iter().all(|m| m.is_empty()) {
            errors.insert(
                PERFORMANCE_ERROR_KEY.to_string(),
                "At least one performance metric is required".to_string(),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(errors: &FieldErrors) -> Vec<&str> {
        errors.keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_basic_info_all_missing() {
        let errors = validate_step(Step::BasicInfo, &FormData::default());
        assert_eq!(
            keys(&errors),
            vec!["businessPurpose", "dataScientist", "initiativeName", "modelType", "modelVersion"]
        );
        assert_eq!(errors["initiativeName"], "Initiative name is required");
        assert_eq!(errors["dataScientist"], "Data scientist email is required");
    }

    #[test]
    fn test_repository_partial() {
        let mut data = FormData::default();
        data.repository_url = "https://github.com/acme/churn".to_string();
        let errors = validate_step(Step::Repository, &data);
        assert_eq!(keys(&errors), vec!["branch"]);
    }

    #[test]
    fn test_dataset_optional_tables() {
        let mut data = FormData::default();
        data.project_id = "ds-dev".to_string();
        data.train_table = "ds.train".to_string();
        data.test_table = "ds.test".to_string();
        data.population_key = "customer_id".to_string();
        data.target_column = "target".to_string();
        assert!(validate_step(Step::Dataset, &data).is_empty());
    }

    #[test]
    fn test_performance_needs_one_metric() {
        let mut data = FormData::default();
        let errors = validate_step(Step::Performance, &data);
        assert_eq!(keys(&errors), vec![PERFORMANCE_ERROR_KEY]);
        assert_eq!(errors[PERFORMANCE_ERROR_KEY], "At least one performance metric is required");

        data.recall = "57.84".to_string();
        assert!(validate_step(Step::Performance, &data).is_empty());
    }

    #[test]
    fn test_optional_steps_always_pass() {
        let data = FormData::default();
        assert!(validate_step(Step::Features, &data).is_empty());
        assert!(validate_step(Step::Uploads, &data).is_empty());
        assert!(validate_step(Step::Download, &data).is_empty());
    }

    #[test]
    fn test_infrastructure_defaults_pass() {
        let mut data = FormData::default();
        assert!(validate_step(Step::Infrastructure, &data).is_empty());

        data.max_workers.clear();
        data.disk_size.clear();
        let errors = validate_step(Step::Infrastructure, &data);
        assert_eq!(keys(&errors), vec!["diskSize", "maxWorkers"]);
    }

    #[test]
    fn test_is_required() {
        assert!(is_required(ScalarField::TrainTable));
        assert!(!is_required(ScalarField::ValTable));
        assert!(!is_required(ScalarField::Auc));
    }
}
