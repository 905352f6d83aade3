//! Generated artifacts checked as parsed documents rather than raw text
mod common;

use deploy_wizard::artifacts::{archive_name, generate_artifacts};
use deploy_wizard::features::FeatureCommand;
use serde::Deserialize;
use serde_yaml::Value;

fn yaml(content: &str) -> Value {
    serde_yaml::from_str(content).expect("artifact should be valid YAML")
}

fn yaml_documents(content: &str) -> Vec<Value> {
    serde_yaml::Deserializer::from_str(content)
        .map(|doc| Value::deserialize(doc).expect("document should be valid YAML"))
        .collect()
}

fn env_pairs(content: &str) -> Vec<(String, String)> {
    dotenvy::from_read_iter(content.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .expect("env file should parse")
}

#[test]
fn test_eight_files_in_fixed_order() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "model_version_metadata.yaml",
            "model_catalog_metadata.yaml",
            "deployment.yaml",
            "deployment.env",
            "prediction.yaml",
            "prediction.py",
            "population.sql",
            "data_ingestion.sql",
        ]
    );
    assert!(files.iter().all(|f| !f.description.is_empty()));
    assert_eq!(
        archive_name(&common::complete_form()),
        "customer_churn_2_1_0_deployment_files.zip"
    );
}

#[test]
fn test_version_metadata_parses() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let doc = yaml(common::file(&files, "model_version_metadata.yaml"));

    assert_eq!(doc["model_cd"].as_str(), Some("customer_churn_2_1_0"));
    assert_eq!(doc["repository"]["commit_hash"].as_str(), Some("latest"));
    assert_eq!(doc["dataset"]["processed_train_table"].as_str(), Some("churn.train_processed"));
    assert_eq!(doc["keys"]["id_keys"][0].as_str(), Some("customer_id"));
    assert_eq!(doc["keys"]["exclusion_criteria"].as_str(), Some("None"));
    assert_eq!(doc["performance_metrics"]["auc"].as_f64(), Some(67.77));
    assert!(doc["performance_metrics"]["recall"].is_null());
    assert_eq!(doc["infrastructure"]["disk_size"].as_str(), Some("100GB"));
    assert_eq!(doc["infrastructure"]["max_workers"].as_u64(), Some(10));
    assert_eq!(
        doc["metadata"]["model_directory"].as_str(),
        Some("initiatives/customer_churn_2_1_0/deployment/2.1.0/")
    );

    let emails = doc["infrastructure"]["alert_emails"].as_sequence().unwrap();
    assert_eq!(emails.len(), 2);

    let features = doc["features"].as_sequence().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(features[0]["name"].as_str(), Some("tenure_months"));
    assert_eq!(
        features[0]["preprocessing_steps"]["step_2"]["name"].as_str(),
        Some("Binning")
    );
    assert!(features[2]["preprocessing_steps"].is_null());
}

#[test]
fn test_catalog_metadata_parses() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let doc = yaml(common::file(&files, "model_catalog_metadata.yaml"));

    assert_eq!(doc["catalog_entry"]["model_id"].as_str(), Some("customer_churn_2_1_0"));
    assert_eq!(doc["catalog_entry"]["status"].as_str(), Some("pending_deployment"));
    assert_eq!(doc["dataset"]["exclusion_criteria"].as_str(), Some(""));
    assert_eq!(doc["deployment"]["created_at"].as_str(), Some("2025-06-01T09:30:00.000Z"));
}

#[test]
fn test_deployment_manifest_has_two_documents() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let docs = yaml_documents(common::file(&files, "deployment.yaml"));

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["metadata"]["name"].as_str(), Some("customer_churn_2_1_0-config"));
    assert_eq!(docs[1]["metadata"]["name"].as_str(), Some("customer_churn_2_1_0-prediction"));
}

#[test]
fn test_pipeline_config_lists_only_active_emails() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let content = common::file(&files, "prediction.yaml");
    yaml(content);

    assert!(content.contains(r#"["a@x.com","b@x.com"]"#));
}

#[test]
fn test_env_file_parses() {
    let mut data = common::complete_form();
    data.initiative_name = "churn".to_string();
    data.business_purpose = "retention".to_string();
    data.schedule.clear();

    let files = generate_artifacts(&data, &common::clock());
    let pairs = env_pairs(common::file(&files, "deployment.env"));
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("{} missing", key))
    };

    assert_eq!(get("MODEL_NAME"), "churn");
    assert_eq!(get("ALERT_EMAILS"), "a@x.com,b@x.com");
    assert_eq!(get("COMMIT_HASH"), "");
    assert_eq!(get("GENERATED_AT"), "2025-06-01T09:30:00.000Z");
    assert_eq!(get("TARGET_DIRECTORY"), "initiatives/churn_2_1_0/deployment/2.1.0/");
}

#[test]
fn test_feature_order_follows_table_moves() {
    let mut data = common::complete_form();
    data.features = FeatureCommand::Move { from: 2, to: 0 }.apply(&data.features);

    let files = generate_artifacts(&data, &common::clock());
    let doc = yaml(common::file(&files, "model_version_metadata.yaml"));
    let names: Vec<&str> = doc["features"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();

    assert_eq!(names, vec!["has_contract", "tenure_months", "region"]);

    let script = common::file(&files, "prediction.py");
    let first = script.find("has_contract").unwrap();
    let second = script.find("tenure_months").unwrap();
    assert!(first < second);
}

#[test]
fn test_explicit_processed_table_wins() {
    let mut data = common::complete_form();
    data.processed_train_table = "churn.train_clean".to_string();

    let files = generate_artifacts(&data, &common::clock());
    let doc = yaml(common::file(&files, "model_version_metadata.yaml"));
    assert_eq!(doc["dataset"]["processed_train_table"].as_str(), Some("churn.train_clean"));
    assert_eq!(doc["dataset"]["processed_test_table"].as_str(), Some("churn.test_processed"));
}

#[test]
fn test_population_query_reads_qualified_train_table() {
    let files = generate_artifacts(&common::complete_form(), &common::clock());
    let sql = common::file(&files, "population.sql");
    assert!(sql.contains("FROM `ds-dev-289802.churn.train`"));
    assert!(sql.contains("    customer_id as population_key,"));

    let ingestion = common::file(&files, "data_ingestion.sql");
    assert!(ingestion.contains("WHERE customer_id IS NOT NULL"));
    assert!(ingestion.contains("ORDER BY customer_id"));
}

#[test]
fn test_regeneration_is_identical_with_fixed_clock() {
    let data = common::complete_form();
    let first = generate_artifacts(&data, &common::clock());
    let second = generate_artifacts(&data, &common::clock());
    assert_eq!(first, second);
}
