pub mod terminal;
pub mod traits;

pub use terminal::TerminalChannel;
pub use traits::{Channel, InboundMessage};
