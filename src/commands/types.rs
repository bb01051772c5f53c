use serde::{Deserialize, Serialize};

// Command — the inspection/control surface reachable from any channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Game,
    Context,
    Username { name: Option<String> },
    Help,
    Quit,
}
