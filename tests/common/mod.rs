//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use deploy_wizard::artifacts::FixedClock;
use deploy_wizard::form::model::{Feature, FeatureType, FormData, PreprocessingStep, StepSlot};

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap())
}

pub fn feature(order: usize, name: &str, feature_type: FeatureType, steps: &[(&str, &str)]) -> Feature {
    let mut f = Feature::new(order);
    f.name = name.to_string();
    f.feature_type = feature_type;
    f.description = format!("{} description", name);
    for (slot, (step, value)) in StepSlot::ALL.iter().zip(steps) {
        *f.step_mut(*slot) = PreprocessingStep::new(*step, *value);
    }
    f
}

/// A form that passes every step
pub fn complete_form() -> FormData {
    let mut data = FormData::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

    data.initiative_name = "Customer Churn".to_string();
    data.model_version = "2.1.0".to_string();
    data.model_type = "lightgbm".to_string();
    data.business_purpose = "Predict churn for retention offers".to_string();
    data.data_scientist = "ds@company.com".to_string();
    data.target_deployment_date = "2025-07-01".to_string();

    data.repository_url = "https://github.com/company/churn-model".to_string();
    data.branch = "main".to_string();

    data.project_id = "ds-dev-289802".to_string();
    data.train_table = "churn.train".to_string();
    data.test_table = "churn.test".to_string();
    data.population_key = "customer_id".to_string();
    data.target_column = "churned".to_string();

    data.auc = "67.77".to_string();

    data.features = vec![
        feature(1, "tenure_months", FeatureType::Numerical, &[("Cap & Floor", "0.99"), ("Binning", "10")]),
        feature(2, "region", FeatureType::Categorical, &[("Impute Nulls", "Unknown")]),
        feature(3, "has_contract", FeatureType::Boolean, &[]),
    ];

    data.alert_emails = vec!["a@x.com".to_string(), String::new(), "b@x.com".to_string()];
    data
}

pub fn file<'a>(files: &'a [deploy_wizard::GeneratedFile], name: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.filename == name)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated", name))
}
