//! Form data model, step validation and the wizard state machine
pub mod alerts;
pub mod fields;
pub mod model;
pub mod steps;
pub mod uploads;
pub mod validate;
pub mod wizard;

pub use fields::ScalarField;
pub use model::{Feature, FeatureType, FormData, PreprocessingStep, StepSlot};
pub use steps::Step;
pub use uploads::{UploadSlot, UploadedFile, UploadedFiles};
pub use validate::{FieldErrors, validate_step};
pub use wizard::{Command, Msg, WizardState, update};
