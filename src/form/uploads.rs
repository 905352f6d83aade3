//! Upload slots for supporting model files
//!
//! Only metadata (name, size, media type) is retained, never file content.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata of a file selected for a slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }

    /// Build metadata from a file on disk. The content is not read.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
        if !metadata.is_file() {
            anyhow::bail!("Not a regular file: {:?}", path);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("Path has no file name: {:?}", path))?;
        let media_type = media_type_for(&name).to_string();

        Ok(Self::new(name, metadata.len(), media_type))
    }

    /// Size formatted for display, e.g. "1.5 MB"
    pub fn display_size(&self) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = KB * 1024.0;

        let size = self.size as f64;
        if size >= MB {
            format!("{:.1} MB", size / MB)
        } else if size >= KB {
            format!("{:.1} KB", size / KB)
        } else {
            format!("{} B", self.size)
        }
    }
}

/// The four named upload slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadSlot {
    SqlQueries,
    ModelPickle,
    Config,
    Notebook,
}

impl UploadSlot {
    pub const ALL: [UploadSlot; 4] = [
        UploadSlot::SqlQueries,
        UploadSlot::ModelPickle,
        UploadSlot::Config,
        UploadSlot::Notebook,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::SqlQueries => "sqlQueries",
            Self::ModelPickle => "modelPickle",
            Self::Config => "config",
            Self::Notebook => "notebook",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SqlQueries => "SQL Queries File",
            Self::ModelPickle => "Model Pickle File",
            Self::Config => "Configuration File",
            Self::Notebook => "Training Notebook",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SqlQueries => "Notebook or script with data preparation queries",
            Self::ModelPickle => "Trained model in pickle format",
            Self::Config => "Model configuration and hyperparameters",
            Self::Notebook => "Jupyter notebook with training process",
        }
    }

    /// Lower-case extensions (with dot) this slot accepts
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::SqlQueries => &[".ipynb", ".sql", ".py"],
            Self::ModelPickle => &[".pkl", ".pickle"],
            Self::Config => &[".yaml", ".yml", ".json"],
            Self::Notebook => &[".ipynb"],
        }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.accepted_extensions()
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

impl std::str::FromStr for UploadSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown upload slot '{}'", s))
    }
}

/// Selected files keyed by slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_queries: Option<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_pickle: Option<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook: Option<UploadedFile>,
}

impl UploadedFiles {
    pub fn get(&self, slot: UploadSlot) -> Option<&UploadedFile> {
        match slot {
            UploadSlot::SqlQueries => self.sql_queries.as_ref(),
            UploadSlot::ModelPickle => self.model_pickle.as_ref(),
            UploadSlot::Config => self.config.as_ref(),
            UploadSlot::Notebook => self.notebook.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: UploadSlot) -> &mut Option<UploadedFile> {
        match slot {
            UploadSlot::SqlQueries => &mut self.sql_queries,
            UploadSlot::ModelPickle => &mut self.model_pickle,
            UploadSlot::Config => &mut self.config,
            UploadSlot::Notebook => &mut self.notebook,
        }
    }

    /// Place a file into a slot. Files with an extension the slot does not
    /// accept are rejected and the slot keeps its previous value.
    pub fn set(&mut self, slot: UploadSlot, file: Option<UploadedFile>) -> Result<(), String> {
        if let Some(file) = &file {
            if !slot.accepts(&file.name) {
                log::warn!("Rejected '{}' for slot {}", file.name, slot.key());
                return Err(format!(
                    "{} accepts {} files only",
                    slot.label(),
                    slot.accepted_extensions().join(", ")
                ));
            }
        }

        *self.slot_mut(slot) = file;
        Ok(())
    }

    pub fn count(&self) -> usize {
        UploadSlot::ALL.iter().filter(|slot| self.get(**slot).is_some()).count()
    }
}

/// Guess a media type from a file name's extension
pub fn media_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "sql" => "application/sql",
        "py" => "text/x-python",
        "ipynb" => "application/x-ipynb+json",
        "json" => "application/json",
        "yaml" | "yml" => "application/x-yaml",
        "pkl" | "pickle" => "application/octet-stream",
        _ => "",
    }
}
