//! Artifact generator
//!
//! Projects a completed `FormData` into the eight deployment files. Rendering
//! is a pure function of the form and a `Clock`; the only varying content is
//! the generation timestamps stamped into three of the files.

pub mod clock;
pub mod context;
pub mod deployment;
pub mod generator;
pub mod metadata;
pub mod pipeline;
pub mod queries;

use serde::{Deserialize, Serialize};

use crate::form::model::FormData;
use clock::Clock;
use context::ArtifactContext;

pub use clock::{FixedClock, SystemClock};
pub use generator::{GenerationStatus, Generator};

/// Declared format of a generated file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Yaml,
    Py,
    Sql,
    Env,
}

impl ArtifactKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Py => "py",
            Self::Sql => "sql",
            Self::Env => "env",
        }
    }

    /// Media type used when the file is downloaded on its own
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Yaml => "application/x-yaml",
            Self::Py => "text/x-python",
            Self::Sql => "application/sql",
            Self::Env => "text/plain",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One rendered file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
    pub kind: ArtifactKind,
    pub description: String,
}

impl GeneratedFile {
    fn new(filename: &str, kind: ArtifactKind, description: &str, content: String) -> Self {
        Self {
            filename: filename.to_string(),
            content,
            kind,
            description: description.to_string(),
        }
    }
}

/// Name of the bundle holding every artifact
pub fn archive_name(data: &FormData) -> String {
    format!(
        "{}_deployment_files.zip",
        context::model_code(&data.initiative_name, &data.model_version)
    )
}

/// Render all artifacts in their fixed order
pub fn generate_artifacts(data: &FormData, clock: &dyn Clock) -> Vec<GeneratedFile> {
    let ctx = ArtifactContext::new(data, clock);

    let files = vec![
        GeneratedFile::new(
            "model_version_metadata.yaml",
            ArtifactKind::Yaml,
            "Model configuration and metadata",
            metadata::model_version_metadata(&ctx),
        ),
        GeneratedFile::new(
            "model_catalog_metadata.yaml",
            ArtifactKind::Yaml,
            "Registry metadata for model catalog",
            metadata::model_catalog_metadata(&ctx),
        ),
        GeneratedFile::new(
            "deployment.yaml",
            ArtifactKind::Yaml,
            "Deployment configuration",
            deployment::deployment_manifest(&ctx),
        ),
        GeneratedFile::new(
            "deployment.env",
            ArtifactKind::Env,
            "Environment variables",
            deployment::environment_file(&ctx),
        ),
        GeneratedFile::new(
            "prediction.yaml",
            ArtifactKind::Yaml,
            "Pipeline configuration (placeholder)",
            pipeline::pipeline_config(&ctx),
        ),
        GeneratedFile::new(
            "prediction.py",
            ArtifactKind::Py,
            "Pipeline code (placeholder)",
            pipeline::pipeline_script(&ctx),
        ),
        GeneratedFile::new(
            "population.sql",
            ArtifactKind::Sql,
            "Data selection query",
            queries::population_query(&ctx),
        ),
        GeneratedFile::new(
            "data_ingestion.sql",
            ArtifactKind::Sql,
            "Data preparation query",
            queries::ingestion_query(&ctx),
        ),
    ];

    log::info!(
        "Generated {} artifacts for {} into {}",
        files.len(),
        ctx.model_code,
        ctx.target_directory
    );
    files
}
