use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

use super::category::Category;
use super::games::ActiveGame;

/// Turn history keeps at most this many entries; the oldest is evicted first.
pub const HISTORY_CAP: usize = 200;

// Role — who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded ring of the session's most recent turns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TurnHistory {
    entries: VecDeque<TurnRecord>,
}

impl TurnHistory {
    pub fn push(&mut self, role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) {
        self.entries.push_back(TurnRecord {
            role,
            text: text.into(),
            timestamp,
        });
        if self.entries.len() > HISTORY_CAP {
            self.entries.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<&TurnRecord> {
        self.entries.front()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&TurnRecord> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurnRecord> {
        self.entries.iter()
    }
}

/// Mutable per-session record. Owned by one dispatcher instance and mutated
/// only by it; concurrent sessions get one instance each, never shared.
#[derive(Debug)]
pub struct SessionState {
    pub username: String,
    pub last_emotion: Option<Category>,
    pub active_game: Option<ActiveGame>,
    pub history: TurnHistory,
}

impl SessionState {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            last_emotion: None,
            active_game: None,
            history: TurnHistory::default(),
        }
    }

    /// Immutable deep-copy view, safe to hand to external tooling.
    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            username: self.username.clone(),
            last_emotion: self.last_emotion,
            active_game: self.active_game.clone(),
            turn_history: self.history.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub username: String,
    pub last_emotion: Option<Category>,
    pub active_game: Option<ActiveGame>,
    pub turn_history: Vec<TurnRecord>,
}
