use crate::config::Settings;
use crate::core::dispatcher::{Dispatcher, TurnSink};

use super::types::Command;

// CommandOutcome — what the runtime does after a handled slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Output (if any) already went through the dispatcher's sink.
    Handled,
    /// Print this text directly; it is tooling output, not a bot turn.
    Reply(String),
    /// Shut the session down.
    Quit,
}

pub const HELP_TEXT: &str = "Commands: /game start a mini-game, /context show session state, \
/username <name> change your name, /help this text, /quit leave.";

/// Apply one slash command to the session. Commands bypass classification
/// and are not charged against the debounce window.
pub fn handle_command<S: TurnSink>(
    command: Command,
    dispatcher: &mut Dispatcher<S>,
    settings: &mut Settings,
) -> CommandOutcome {
    match command {
        Command::Game => {
            dispatcher.start_random_game();
            CommandOutcome::Handled
        }
        Command::Context => {
            let snapshot = dispatcher.context();
            let rendered = serde_json::to_string_pretty(&snapshot)
                .unwrap_or_else(|err| format!("context unavailable: {err}"));
            CommandOutcome::Reply(rendered)
        }
        Command::Username { name: None } => {
            CommandOutcome::Reply("Usage: /username <name>".to_string())
        }
        Command::Username { name: Some(name) } => {
            dispatcher.set_username(name.clone());
            settings.username = name;
            if let Err(err) = settings.save() {
                tracing::warn!(error = %err, "could not persist settings; username kept for this session");
            }
            CommandOutcome::Reply(format!("Okay {}, noted! 💛", settings.username))
        }
        Command::Help => CommandOutcome::Reply(HELP_TEXT.to_string()),
        Command::Quit => CommandOutcome::Quit,
    }
}
