//! Feature table editing operations
//!
//! Every operation takes the current rows and returns a new sequence whose
//! `order` values are dense 1..N in position order.

use serde::{Deserialize, Serialize};

use crate::form::model::{Feature, FeatureId, FeatureType, StepSlot};

/// Which half of a preprocessing step to edit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPart {
    Name,
    Value,
}

/// Free-text fields on a feature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureField {
    Name,
    Transformation,
    Description,
}

/// A single edit applied to one feature
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureEdit {
    Scalar(FeatureField, String),
    Type(FeatureType),
    Step { slot: StepSlot, part: StepPart, value: String },
}

impl FeatureEdit {
    /// Parse a field path such as `name`, `type` or `step2.value` into an edit
    pub fn from_path(path: &str, value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();

        if let Some((step, part)) = path.split_once('.') {
            let slot = step
                .strip_prefix("step")
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(StepSlot::from_number)
                .ok_or_else(|| format!("Unknown preprocessing step '{}' (expected step1..step4)", step))?;
            let part = match part {
                "name" => StepPart::Name,
                "value" => StepPart::Value,
                other => return Err(format!("Unknown step field '{}' (expected name or value)", other)),
            };
            return Ok(Self::Step { slot, part, value });
        }

        match path {
            "name" => Ok(Self::Scalar(FeatureField::Name, value)),
            "transformation" => Ok(Self::Scalar(FeatureField::Transformation, value)),
            "description" => Ok(Self::Scalar(FeatureField::Description, value)),
            "type" => Ok(Self::Type(FeatureType::parse_lenient(&value))),
            other => Err(format!("Unknown feature field '{}'", other)),
        }
    }

    fn apply_to(self, feature: &mut Feature) {
        match self {
            Self::Scalar(FeatureField::Name, value) => feature.name = value,
            Self::Scalar(FeatureField::Transformation, value) => feature.transformation = value,
            Self::Scalar(FeatureField::Description, value) => feature.description = value,
            Self::Type(feature_type) => feature.feature_type = feature_type,
            Self::Step { slot, part, value } => {
                let step = feature.step_mut(slot);
                match part {
                    StepPart::Name => step.name = value,
                    StepPart::Value => step.value = value,
                }
            }
        }
    }
}

/// Operations of the feature table editor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureCommand {
    Add,
    Remove(FeatureId),
    Move { from: usize, to: usize },
    MoveUp(usize),
    MoveDown(usize),
    Update { id: FeatureId, edit: FeatureEdit },
    /// Replace the whole table with rows parsed from delimited text
    Import(String),
}

impl FeatureCommand {
    pub fn apply(self, features: &[Feature]) -> Vec<Feature> {
        match self {
            Self::Add => add(features),
            Self::Remove(id) => remove(features, &id),
            Self::Move { from, to } => move_to(features, from, to),
            Self::MoveUp(index) => move_up(features, index),
            Self::MoveDown(index) => move_down(features, index),
            Self::Update { id, edit } => update(features, &id, edit),
            Self::Import(text) => super::delimited::import_delimited(&text),
        }
    }
}

/// Reassign `order` to match position
pub fn renumber(features: &mut [Feature]) {
    for (index, feature) in features.iter_mut().enumerate() {
        feature.order = index + 1;
    }
}

/// Append a blank feature with the next order
pub fn add(features: &[Feature]) -> Vec<Feature> {
    let mut rows = features.to_vec();
    rows.push(Feature::new(rows.len() + 1));
    rows
}

/// Delete the feature with `id` and renumber the rest
pub fn remove(features: &[Feature], id: &str) -> Vec<Feature> {
    let mut rows: Vec<Feature> = features.iter().filter(|f| f.id != id).cloned().collect();
    if rows.len() == features.len() {
        log::debug!("No feature with id {} to remove", id);
    }
    renumber(&mut rows);
    rows
}

/// Move the feature at `from` to position `to`. Out-of-range targets leave the table unchanged.
pub fn move_to(features: &[Feature], from: usize, to: usize) -> Vec<Feature> {
    if to >= features.len() || from >= features.len() {
        return features.to_vec();
    }

    let mut rows = features.to_vec();
    let moved = rows.remove(from);
    rows.insert(to, moved);
    renumber(&mut rows);
    rows
}

pub fn move_up(features: &[Feature], index: usize) -> Vec<Feature> {
    match index.checked_sub(1) {
        Some(to) => move_to(features, index, to),
        None => features.to_vec(),
    }
}

pub fn move_down(features: &[Feature], index: usize) -> Vec<Feature> {
    move_to(features, index, index + 1)
}

/// Apply an edit to the feature with `id`
pub fn update(features: &[Feature], id: &str, edit: FeatureEdit) -> Vec<Feature> {
    let mut rows = features.to_vec();
    match rows.iter_mut().find(|f| f.id == id) {
        Some(feature) => edit.apply_to(feature),
        None => log::debug!("No feature with id {} to update", id),
    }
    rows
}
