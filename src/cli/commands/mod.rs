pub mod common;
pub mod features;
pub mod generate;
pub mod session;
pub mod validate;
pub mod wizard;

pub use features::features_command;
pub use generate::generate_command;
pub use session::session_command;
pub use validate::validate_command;
pub use wizard::wizard_command;
