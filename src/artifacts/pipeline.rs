//! Prediction pipeline config and its Python entry point

use super::context::{ArtifactContext, name_slug};
use crate::form::model::{Feature, FeatureType, PreprocessingStep};

pub fn pipeline_config(ctx: &ArtifactContext) -> String {
    let d = ctx.data;
    let on_failure = serde_json::to_string(&ctx.alert_emails).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"# Prediction Pipeline Configuration
# This is a placeholder - customize based on your ML pipeline requirements

pipeline:
  name: "{slug}_prediction"
  version: "{version}"

steps:
  - name: "data_ingestion"
    type: "sql_query"
    config:
      query_file: "population.sql"
      output_table: "temp_population"

  - name: "data_preparation"
    type: "sql_query"
    config:
      query_file: "data_ingestion.sql"
      input_table: "temp_population"
      output_table: "prepared_data"

  - name: "model_prediction"
    type: "python_script"
    config:
      script_file: "prediction.py"
      input_table: "prepared_data"
      model_path: "/models/{code}"

  - name: "results_export"
    type: "export"
    config:
      output_format: "csv"
      destination: "gs://mlops-results/{code}/"

schedule: "{schedule}"
alerts:
  on_failure: {on_failure}
"#,
        slug = name_slug(&d.initiative_name),
        version = d.model_version,
        code = ctx.model_code,
        schedule = d.schedule,
    )
}

fn any_step_mentions(steps: &[&PreprocessingStep], needles: &[&str]) -> bool {
    steps.iter().any(|step| {
        let name = step.name.to_lowercase();
        needles.iter().any(|needle| name.contains(needle))
    })
}

/// Commented preprocessing outline for one feature
fn preprocessing_block(feature: &Feature, steps: &[&PreprocessingStep]) -> String {
    let n = &feature.name;
    let mut code = format!(
        "        # {} ({}): {}",
        n, feature.feature_type, feature.description
    );

    if !feature.transformation.trim().is_empty() {
        code.push_str(&format!("\n        # Transformation: {}", feature.transformation));
    }
    for (index, step) in steps.iter().enumerate() {
        code.push_str(&format!("\n        # Step {}: {} = {}", index + 1, step.name, step.value));
    }

    let mut hints: Vec<String> = Vec::new();
    match feature.feature_type {
        FeatureType::Numerical => {
            hints.push(format!("# TODO: Apply numerical preprocessing for {}", n));
            if any_step_mentions(steps, &["cap", "floor"]) {
                hints.push(format!("# df['{n}'] = np.clip(df['{n}'], min_val, max_val)"));
            }
            if any_step_mentions(steps, &["impute"]) {
                hints.push(format!("# df['{n}'] = df['{n}'].fillna(median_value)"));
            }
            if any_step_mentions(steps, &["bin"]) {
                hints.push(format!("# df['{n}_binned'] = pd.cut(df['{n}'], bins=n_bins)"));
            }
        }
        FeatureType::Categorical => {
            hints.push(format!("# TODO: Apply categorical preprocessing for {}", n));
            if any_step_mentions(steps, &["encode"]) {
                hints.push(format!("# df['{n}_encoded'] = label_encoder.transform(df['{n}'])"));
            }
            if any_step_mentions(steps, &["impute"]) {
                hints.push(format!("# df['{n}'] = df['{n}'].fillna('Unknown')"));
            }
        }
        FeatureType::Boolean => {
            hints.push(format!("# TODO: Apply boolean preprocessing for {}", n));
        }
        FeatureType::Datetime => {
            hints.push(format!("# TODO: Apply datetime preprocessing for {}", n));
            if any_step_mentions(steps, &["extract"]) {
                hints.push(format!("# df['{n}_year'] = df['{n}'].dt.year"));
                hints.push(format!("# df['{n}_month'] = df['{n}'].dt.month"));
            }
        }
        FeatureType::Unset => {}
    }

    for hint in hints {
        code.push_str(&format!("\n        {}", hint));
    }
    code
}

pub fn pipeline_script(ctx: &ArtifactContext) -> String {
    let d = ctx.data;

    format!(
        r#"#!/usr/bin/env python3
"""
Prediction pipeline for {name} v{version}
Generated automatically - customize based on your model requirements
"""

import pandas as pd
import numpy as np
from google.cloud import bigquery
import joblib
import logging
from typing import Dict, Any

# Configure logging
logging.basicConfig(level=logging.INFO)
logger = logging.getLogger(__name__)

class ModelPredictor:
    def __init__(self):
        self.model_name = "{name}"
        self.model_version = "{version}"
        self.project_id = "{project}"
        self.target_column = "{target}"
        self.population_key = "{pop_key}"

        # Initialize BigQuery client
        self.client = bigquery.Client(project=self.project_id)

    def load_model(self, model_path: str):
        """Load the trained model"""
        logger.info(f"Loading model from {{model_path}}")
        # TODO: Implement model loading based on your model type
        # Example: self.model = joblib.load(model_path)
        pass

    def load_data(self, table_name: str) -> pd.DataFrame:
        """Load data from BigQuery"""
        query = f"""
        SELECT *
        FROM `{{self.project_id}}.{{table_name}}`
        WHERE {{self.population_key}} IS NOT NULL
        """

        logger.info(f"Loading data from {{table_name}}")
        return self.client.query(query).to_dataframe()

    def preprocess_features(self, df: pd.DataFrame) -> pd.DataFrame:
        """Preprocess features for prediction"""
        logger.info("Preprocessing features")

        # Apply feature transformations and preprocessing steps
{features}

        return df

    def predict(self, df: pd.DataFrame) -> np.ndarray:
        """Generate predictions"""
        logger.info(f"Generating predictions for {{len(df)}} records")

        # TODO: Implement prediction logic
        # Example: predictions = self.model.predict_proba(df)[:, 1]

        # Placeholder - return random predictions
        return np.random.rand(len(df))

    def save_results(self, df: pd.DataFrame, predictions: np.ndarray, output_table: str):
        """Save predictions to BigQuery"""
        logger.info(f"Saving results to {{output_table}}")

        # Add predictions to dataframe
        df['prediction'] = predictions
        df['model_version'] = self.model_version
        df['prediction_date'] = pd.Timestamp.now()

        # TODO: Implement saving logic
        # df.to_gbq(output_table, project_id=self.project_id, if_exists='replace')

    def run_pipeline(self):
        """Run the complete prediction pipeline"""
        logger.info(f"Starting prediction pipeline for {{self.model_name}} v{{self.model_version}}")

        try:
            # Load data
            df = self.load_data("prepared_data")

            # Preprocess features
            df_processed = self.preprocess_features(df)

            # Generate predictions
            predictions = self.predict(df_processed)

            # Save results
            self.save_results(df, predictions, f"{{self.project_id}}.predictions.{{self.model_name.lower().replace(' ', '_')}}")

            logger.info("Pipeline completed successfully")

        except Exception as e:
            logger.error(f"Pipeline failed: {{str(e)}}")
            raise

if __name__ == "__main__":
    predictor = ModelPredictor()
    predictor.run_pipeline()
"#,
        name = d.initiative_name,
        version = d.model_version,
        project = d.project_id,
        target = d.target_column,
        pop_key = d.population_key,
        features = ctx.render_features(preprocessing_block),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::clock::FixedClock;
    use crate::form::model::{FormData, StepSlot};
    use chrono::Utc;

    fn feature(name: &str, feature_type: FeatureType, steps: &[(&str, &str)]) -> Feature {
        let mut f = Feature::new(1);
        f.name = name.to_string();
        f.feature_type = feature_type;
        for (slot, (step, value)) in StepSlot::ALL.iter().zip(steps) {
            *f.step_mut(*slot) = PreprocessingStep::new(*step, *value);
        }
        f
    }

    fn block(f: &Feature) -> String {
        preprocessing_block(f, &f.active_steps())
    }

    #[test]
    fn test_numerical_hints() {
        let f = feature(
            "income",
            FeatureType::Numerical,
            &[("Cap & Floor", "0.99"), ("Impute Nulls", "median"), ("Binning", "10")],
        );
        let text = block(&f);
        assert!(text.contains("        # Step 3: Binning = 10"));
        assert!(text.contains("# TODO: Apply numerical preprocessing for income"));
        assert!(text.contains("# df['income'] = np.clip(df['income'], min_val, max_val)"));
        assert!(text.contains("# df['income'] = df['income'].fillna(median_value)"));
        assert!(text.contains("# df['income_binned'] = pd.cut(df['income'], bins=n_bins)"));
    }

    #[test]
    fn test_categorical_encoding_keyword_is_literal() {
        // "One-Hot Encoding" contains "encod" but not "encode"
        let f = feature("region", FeatureType::Categorical, &[("One-Hot Encoding", "top20")]);
        assert!(!block(&f).contains("label_encoder"));

        let f = feature("region", FeatureType::Categorical, &[("Encode labels", "x")]);
        assert!(block(&f).contains("# df['region_encoded'] = label_encoder.transform(df['region'])"));
    }

    #[test]
    fn test_unset_type_has_no_todo() {
        let f = feature("misc", FeatureType::Unset, &[]);
        assert_eq!(block(&f), "        # misc (): ");
    }

    #[test]
    fn test_pipeline_config_alerts_json() {
        let mut data = FormData::default();
        data.initiative_name = "Customer Churn".to_string();
        data.alert_emails = vec!["a@x.com".into(), " ".into(), "b@x.com".into()];
        let clock = FixedClock(Utc::now());

        let text = pipeline_config(&ArtifactContext::new(&data, &clock));
        assert!(text.contains("  name: \"customer_churn_prediction\"\n"));
        assert!(text.contains("  on_failure: [\"a@x.com\",\"b@x.com\"]\n"));
    }

    #[test]
    fn test_script_keeps_python_fstrings() {
        let data = FormData::default();
        let clock = FixedClock(Utc::now());
        let text = pipeline_script(&ArtifactContext::new(&data, &clock));
        assert!(text.contains("logger.info(f\"Loading model from {model_path}\")"));
        assert!(text.contains("FROM `{self.project_id}.{table_name}`"));
    }
}
