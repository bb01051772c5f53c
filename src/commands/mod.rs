pub mod handlers;
pub mod parser;
pub mod types;

pub use handlers::{CommandOutcome, HELP_TEXT, handle_command};
pub use parser::parse_command;
pub use types::Command;
