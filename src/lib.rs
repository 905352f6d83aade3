//! Deployment request wizard for MLOps model releases
//!
//! Collects deployment metadata over eight validated steps and renders the
//! YAML, Python, SQL and dotenv files a model deployment needs.

pub mod artifacts;
pub mod config;
pub mod delivery;
pub mod features;
pub mod form;
pub mod session;

pub use artifacts::{GeneratedFile, generate_artifacts};
pub use form::{FormData, Step, WizardState};
