pub mod prompts;
pub mod spinner;

pub use prompts::{clear_screen, display_value, pause_for_user, print_errors, print_step_header};
pub use spinner::show_generation;
