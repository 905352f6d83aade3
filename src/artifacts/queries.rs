//! Population selection and data preparation SQL

use super::context::ArtifactContext;
use crate::form::model::{Feature, FeatureType, PreprocessingStep};

/// Dataset and table parts of a `dataset.table` reference
fn table_parts(table: &str) -> (&str, &str) {
    let mut parts = table.split('.');
    let dataset = parts.next().unwrap_or_default();
    let name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => "population_table",
    };
    (dataset, name)
}

fn population_column(feature: &Feature, steps: &[&PreprocessingStep]) -> String {
    let mut comment = format!(
        "    -- {} ({}): {}",
        feature.name, feature.feature_type, feature.description
    );
    if !steps.is_empty() {
        let rendered: Vec<String> = steps
            .iter()
            .map(|step| format!("{}={}", step.name, step.value))
            .collect();
        comment.push_str(&format!("\n    -- Preprocessing: {}", rendered.join(", ")));
    }
    if !feature.transformation.trim().is_empty() {
        comment.push_str(&format!("\n    -- Transformation: {}", feature.transformation));
    }
    comment
}

pub fn population_query(ctx: &ArtifactContext) -> String {
    let d = ctx.data;
    let (dataset, table) = table_parts(&d.train_table);
    let exclusion = if d.exclusion_criteria.is_empty() {
        String::new()
    } else {
        format!("    -- Exclusion criteria: {}", d.exclusion_criteria)
    };

    format!(
        r#"-- Population Selection Query for {name} v{version}
-- Generated automatically - customize based on your data requirements

WITH base_population AS (
  SELECT
    {pop_key} as population_key,
    -- Add your population selection criteria here
    *
  FROM `{project}.{dataset}.{table}`
  WHERE 1=1
    -- Add date filters, active status, etc.
    AND DATE(_PARTITIONTIME) = CURRENT_DATE()
{exclusion}
),

feature_population AS (
  SELECT
    p.*,
    -- Add feature columns here based on your feature list
{features}
  FROM base_population p
  -- Add JOINs to feature tables as needed
)

SELECT *
FROM feature_population
WHERE {pop_key} IS NOT NULL
  -- Add any final filters
ORDER BY {pop_key}
"#,
        name = d.initiative_name,
        version = d.model_version,
        pop_key = d.population_key,
        project = d.project_id,
        features = ctx.render_features(population_column),
    )
}

fn step_comments(sql: &mut String, steps: &[&PreprocessingStep], render: impl Fn(usize, &PreprocessingStep) -> String) {
    for (index, step) in steps.iter().enumerate() {
        sql.push('\n');
        sql.push_str(&render(index, step));
    }
}

fn cleaned_column(feature: &Feature, steps: &[&PreprocessingStep]) -> String {
    let n = &feature.name;
    let mut sql = match feature.feature_type {
        FeatureType::Numerical => format!("    SAFE_CAST({n} AS FLOAT64) as {n}_raw,"),
        FeatureType::Categorical => format!("    UPPER(TRIM({n})) as {n}_raw,"),
        FeatureType::Boolean => format!(
            "    CASE WHEN UPPER({n}) IN ('TRUE', '1', 'YES') THEN TRUE ELSE FALSE END as {n}_raw,"
        ),
        FeatureType::Datetime => format!("    SAFE_CAST({n} AS TIMESTAMP) as {n}_raw,"),
        FeatureType::Unset => format!("    {n} as {n}_raw,"),
    };

    if !steps.is_empty() {
        sql.push_str(&format!("\n    -- Preprocessing steps for {}:", n));
        step_comments(&mut sql, steps, |index, step| {
            format!("    -- Step {}: {} = {}", index + 1, step.name, step.value)
        });
    }
    sql
}

fn final_column(feature: &Feature, steps: &[&PreprocessingStep]) -> String {
    let n = &feature.name;
    let mut sql = if feature.transformation.trim().is_empty() {
        format!("    {n}_raw as {n},")
    } else {
        format!(
            "    -- {} transformation for {n}\n    {n}_raw as {n},",
            feature.transformation
        )
    };

    if !steps.is_empty() {
        sql.push_str("\n    -- TODO: Apply preprocessing steps:");
        step_comments(&mut sql, steps, |_, step| {
            format!("    -- {}: {}", step.name, step.value)
        });
    }
    sql
}

pub fn ingestion_query(ctx: &ArtifactContext) -> String {
    let d = ctx.data;

    format!(
        r#"-- Data Ingestion and Preparation Query
-- {name} v{version}

WITH raw_data AS (
  SELECT *
  FROM temp_population
),

cleaned_data AS (
  SELECT
    {pop_key},
    -- Clean and transform features with preprocessing steps
{cleaned}

    -- Add derived features
    CURRENT_TIMESTAMP() as processing_timestamp

  FROM raw_data
  WHERE {pop_key} IS NOT NULL
),

final_features AS (
  SELECT
    {pop_key},
{finals}
    processing_timestamp

  FROM cleaned_data
)

SELECT *
FROM final_features
ORDER BY {pop_key}
"#,
        name = d.initiative_name,
        version = d.model_version,
        pop_key = d.population_key,
        cleaned = ctx.render_features(cleaned_column),
        finals = ctx.render_features(final_column),
    )
}
