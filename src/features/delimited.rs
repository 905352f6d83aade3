//! Comma-delimited import/export of the feature table
//!
//! Format: one header line, then one line per feature. Every data cell is
//! wrapped in double quotes. Embedded quotes are written as-is (not escaped)
//! and import strips every `"`, so quote characters are lost on a round trip.
//! Commas inside a quoted cell stay in that cell.
//!
//! ```text
//! Order,Feature Name,Type,Description,Step 1 Name,Step 1 Value,...,Step 4 Value
//! "1","income","numerical","Monthly income","Cap & Floor","0.99","","",...
//! ```

use crate::form::model::{Feature, FeatureType, PreprocessingStep, StepSlot};

use super::editor::renumber;

pub const HEADERS: [&str; 12] = [
    "Order",
    "Feature Name",
    "Type",
    "Description",
    "Step 1 Name",
    "Step 1 Value",
    "Step 2 Name",
    "Step 2 Value",
    "Step 3 Name",
    "Step 3 Value",
    "Step 4 Name",
    "Step 4 Value",
];

/// Default file name offered when exporting
pub const EXPORT_FILE_NAME: &str = "features_preprocessing.csv";

/// Serialize the table, header first, rows in sequence order
pub fn export_delimited(features: &[Feature]) -> String {
    let mut lines = Vec::with_capacity(features.len() + 1);
    lines.push(HEADERS.join(","));

    for feature in features {
        let mut cells = vec![
            feature.order.to_string(),
            feature.name.clone(),
            feature.feature_type.as_str().to_string(),
            feature.description.clone(),
        ];
        for slot in StepSlot::ALL {
            let step = feature.step(slot);
            cells.push(step.map(|s| s.name.clone()).unwrap_or_default());
            cells.push(step.map(|s| s.value.clone()).unwrap_or_default());
        }

        let quoted: Vec<String> = cells.iter().map(|cell| format!("\"{}\"", cell)).collect();
        lines.push(quoted.join(","));
    }

    lines.join("\n")
}

/// Parse delimited text into a fresh feature table.
///
/// The first line is always treated as the header and blank lines are skipped.
/// Missing cells become empty strings, a missing or non-numeric order falls
/// back to the row position, and rows are never rejected. Every row gets a new
/// id. Rows are ordered by their order column and renumbered 1..N.
pub fn import_delimited(text: &str) -> Vec<Feature> {
    let mut features: Vec<Feature> = text
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| parse_row(index, line))
        .collect();

    features.sort_by_key(|f| f.order);
    renumber(&mut features);

    log::info!("Imported {} features", features.len());
    features
}

fn parse_row(index: usize, line: &str) -> Feature {
    let cells = split_cells(line);
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

    let mut feature = Feature::new(leading_number(&cell(0)).unwrap_or(index + 1));
    feature.name = cell(1);
    // Missing column defaults to numerical, an empty cell is an unset type
    feature.feature_type = match cells.get(2) {
        Some(value) => FeatureType::parse_lenient(value),
        None => FeatureType::Numerical,
    };
    feature.description = cell(3);

    for slot in StepSlot::ALL {
        let base = 4 + (slot.number() - 1) * 2;
        *feature.step_mut(slot) = PreprocessingStep::new(cell(base), cell(base + 1));
    }

    feature
}

/// Split one line into cells with all double quotes removed
fn split_cells(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();

    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(|cell| cell.replace('"', "")).collect(),
        Ok(false) => Vec::new(),
        Err(e) => {
            log::debug!("Falling back to plain split for line {:?}: {}", line, e);
            line.trim_end_matches('\r')
                .split(',')
                .map(|cell| cell.replace('"', ""))
                .collect()
        }
    }
}

/// Leading positive integer of a cell, e.g. "3" or " 12abc"
fn leading_number(cell: &str) -> Option<usize> {
    let digits: String = cell
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<usize>().ok().filter(|n| *n > 0)
}
