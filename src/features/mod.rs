//! Feature table editor and its delimited exchange format

pub mod delimited;
pub mod editor;

pub use delimited::{export_delimited, import_delimited};
pub use editor::{FeatureCommand, FeatureEdit, FeatureField, StepPart};
