//! Model version and catalog metadata documents

use super::context::{ArtifactContext, or_default, processed_table};
use crate::form::model::{Feature, PreprocessingStep};

fn feature_entry(feature: &Feature, steps: &[&PreprocessingStep]) -> String {
    let mut entry = format!(
        "  - name: \"{}\"\n    type: \"{}\"\n    description: \"{}\"",
        feature.name, feature.feature_type, feature.description
    );

    if !feature.transformation.trim().is_empty() {
        entry.push_str(&format!("\n    transformation: \"{}\"", feature.transformation));
    }

    if !steps.is_empty() {
        entry.push_str("\n    preprocessing_steps:");
        for (index, step) in steps.iter().enumerate() {
            entry.push_str(&format!(
                "\n      step_{}:\n        name: \"{}\"\n        value: \"{}\"",
                index + 1,
                step.name,
                step.value
            ));
        }
    }

    entry
}

pub fn model_version_metadata(ctx: &ArtifactContext) -> String {
    let d = ctx.data;
    let code = &ctx.model_code;
    let emails = ctx
        .alert_emails
        .iter()
        .map(|email| format!("    - \"{}\"", email))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# Model Version Metadata
model_cd: "{code}"
model_name: "{name}"
model_version: "{version}"
model_type: "{model_type}"
business_purpose: "{purpose}"
data_scientist: "{scientist}"
target_deployment_date: "{target_date}"
docker_image_name: "gcr.io/mlops-platform/{code}:{version}"

repository:
  url: "{repo}"
  branch: "{branch}"
  commit_hash: "{commit}"

dataset:
  project_id: "{project}"
  train_table: "{train}"
  test_table: "{test}"
  validation_table: "{val}"
  oot_table: "{oot}"
  processed_train_table: "{p_train}"
  processed_test_table: "{p_test}"
  processed_validation_table: "{p_val}"
  processed_oot_table: "{p_oot}"

keys:
  id_keys: ["{pop_key}"]
  target_column: "{target}"
  population_key: "{pop_key}"
  exclusion_criteria: "{exclusion}"

performance_metrics:
  auc: {auc}
  f1_score: {f1}
  precision: {precision}
  recall: {recall}
  notes: "{notes}"

features:
{features}

infrastructure:
  machine_type: "{machine}"
  max_workers: {workers}
  disk_size: "{disk}GB"
  schedule: "{schedule}"
  alert_emails:
{emails}

ranking_intervals:
  daily: true
  weekly: true
  monthly: false

model_artifacts:
  model_file: "{code}_model.pkl"
  config_file: "{code}_config.yaml"
  requirements_file: "requirements.txt"

metadata:
  created_at: "{created_at}"
  created_by: "{scientist}"
  model_directory: "{directory}"
  deployment_status: "pending"
"#,
        name = d.initiative_name,
        version = d.model_version,
        model_type = d.model_type,
        purpose = d.business_purpose,
        scientist = d.data_scientist,
        target_date = d.target_deployment_date,
        repo = d.repository_url,
        branch = d.branch,
        commit = or_default(&d.commit_hash, "latest"),
        project = d.project_id,
        train = d.train_table,
        test = d.test_table,
        val = d.val_table,
        oot = d.oot_table,
        p_train = processed_table(&d.processed_train_table, &d.train_table),
        p_test = processed_table(&d.processed_test_table, &d.test_table),
        p_val = processed_table(&d.processed_val_table, &d.val_table),
        p_oot = processed_table(&d.processed_oot_table, &d.oot_table),
        pop_key = d.population_key,
        target = d.target_column,
        exclusion = or_default(&d.exclusion_criteria, "None"),
        auc = or_default(&d.auc, "null"),
        f1 = or_default(&d.f1_score, "null"),
        precision = or_default(&d.precision, "null"),
        recall = or_default(&d.recall, "null"),
        notes = or_default(&d.performance_notes, "No additional notes"),
        features = ctx.render_features(feature_entry),
        machine = d.machine_type,
        workers = d.max_workers,
        disk = d.disk_size,
        schedule = d.schedule,
        created_at = ctx.timestamp(),
        directory = ctx.target_directory,
    )
}

pub fn model_catalog_metadata(ctx: &ArtifactContext) -> String {
    let d = ctx.data;

    format!(
        r#"# Model Catalog Metadata
catalog_entry:
  model_id: "{code}"
  name: "{name}"
  version: "{version}"
  status: "pending_deployment"

dataset:
  project_id: "{project}"
  train_table: "{train}"
  test_table: "{test}"
  validation_table: "{val}"
  oot_table: "{oot}"
  population_key: "{pop_key}"
  target_column: "{target}"
  exclusion_criteria: "{exclusion}"

deployment:
  target_directory: "{directory}"
  created_by: "{scientist}"
  created_at: "{created_at}"
"#,
        code = ctx.model_code,
        name = d.initiative_name,
        version = d.model_version,
        project = d.project_id,
        train = d.train_table,
        test = d.test_table,
        val = d.val_table,
        oot = d.oot_table,
        pop_key = d.population_key,
        target = d.target_column,
        exclusion = d.exclusion_criteria,
        directory = ctx.target_directory,
        scientist = d.data_scientist,
        created_at = ctx.timestamp(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::clock::FixedClock;
    use crate::form::model::{FeatureType, FormData, StepSlot};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn form() -> FormData {
        let mut data = FormData::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        data.initiative_name = "Customer Churn".to_string();
        data.model_version = "2.1.0".to_string();
        data.train_table = "ds.train".to_string();
        data
    }

    #[test]
    fn test_defaults_substituted() {
        let data = form();
        let clock = clock();
        let text = model_version_metadata(&ArtifactContext::new(&data, &clock));

        assert!(text.contains("processed_train_table: \"ds.train_processed\""));
        assert!(text.contains("processed_test_table: \"_processed\""));
        assert!(text.contains("commit_hash: \"latest\""));
        assert!(text.contains("exclusion_criteria: \"None\""));
        assert!(text.contains("  auc: null\n"));
        assert!(text.contains("notes: \"No additional notes\""));
        assert!(text.contains("docker_image_name: \"gcr.io/mlops-platform/customer_churn_2_1_0:2.1.0\""));
        assert!(text.contains("created_at: \"2025-06-01T12:00:00.000Z\""));
        assert!(text.contains("model_directory: \"initiatives/customer_churn_2_1_0/deployment/2.1.0/\""));
    }

    #[test]
    fn test_feature_steps_renumbered() {
        let mut data = form();
        let mut feature = Feature::new(1);
        feature.name = "income".to_string();
        feature.feature_type = FeatureType::Numerical;
        feature.transformation = "log".to_string();
        *feature.step_mut(StepSlot::Two) = PreprocessingStep::new("Cap & Floor", "0.99");
        *feature.step_mut(StepSlot::Four) = PreprocessingStep::new("Binning", "10");
        data.features.push(feature);

        let clock = clock();
        let text = model_version_metadata(&ArtifactContext::new(&data, &clock));

        assert!(text.contains(
            "  - name: \"income\"\n    type: \"numerical\"\n    description: \"\"\n    transformation: \"log\"\n    preprocessing_steps:\n      step_1:\n        name: \"Cap & Floor\"\n        value: \"0.99\"\n      step_2:\n        name: \"Binning\"\n        value: \"10\""
        ));
    }

    #[test]
    fn test_catalog_keeps_raw_exclusion() {
        let data = form();
        let clock = clock();
        let text = model_catalog_metadata(&ArtifactContext::new(&data, &clock));
        assert!(text.contains("  exclusion_criteria: \"\"\n"));
        assert!(text.contains("  model_id: \"customer_churn_2_1_0\""));
    }
}
