use serde::Serialize;
use strum::Display;

use super::rng::RandomSource;
use super::text::normalize;

// GameId — stable identifier for a mini-game template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameId {
    Riddle,
    Math,
    Animal,
    NumberGuess,
    Rps,
}

/// Immutable mini-game template. `answer` is `None` both for the
/// adversarial game (rock-paper-scissors, resolved against a live bot
/// choice) and for number-guess, which rolls a fresh answer at start.
#[derive(Debug, Clone, Copy)]
pub struct GameDefinition {
    pub id: GameId,
    pub name: &'static str,
    pub prompt: &'static str,
    pub answer: Option<&'static str>,
}

pub static REGISTRY: &[GameDefinition] = &[
    GameDefinition {
        id: GameId::Riddle,
        name: "Riddle",
        prompt: "I speak without a mouth and hear without ears. What am I?",
        answer: Some("echo"),
    },
    GameDefinition {
        id: GameId::Math,
        name: "Math",
        prompt: "What is 15 + 27?",
        answer: Some("42"),
    },
    GameDefinition {
        id: GameId::Animal,
        name: "Guess Animal",
        prompt: "I am small, fluffy, and hop around. What am I?",
        answer: Some("rabbit"),
    },
    GameDefinition {
        id: GameId::NumberGuess,
        name: "Number Guess",
        prompt: "Guess a number between 1 and 10 🎲",
        answer: None,
    },
    GameDefinition {
        id: GameId::Rps,
        name: "Rock Paper Scissors",
        prompt: "Type 'rock', 'paper' or 'scissors' ✊✋✌️",
        answer: None,
    },
];

/// Template lookup by id. The registry covers every `GameId` variant.
#[must_use]
pub fn definition(id: GameId) -> &'static GameDefinition {
    REGISTRY
        .iter()
        .find(|definition| definition.id == id)
        .expect("registry covers every game id")
}

/// Live per-session instance of a game. For number-guess the answer is a
/// fresh roll, distinct from the template.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveGame {
    pub id: GameId,
    pub name: &'static str,
    pub prompt: &'static str,
    pub answer: Option<String>,
}

/// Number-guess answers are rolled uniformly from this inclusive range.
pub const NUMBER_GUESS_RANGE: (u32, u32) = (1, 10);

/// Instantiate a template for a session, rolling the live answer where the
/// game calls for one.
#[must_use]
pub fn spawn(definition: &GameDefinition, rng: &mut RandomSource) -> ActiveGame {
    let answer = match definition.id {
        GameId::NumberGuess => {
            Some(rng.roll(NUMBER_GUESS_RANGE.0, NUMBER_GUESS_RANGE.1).to_string())
        }
        _ => definition.answer.map(|answer| normalize(answer)),
    };
    ActiveGame {
        id: definition.id,
        name: definition.name,
        prompt: definition.prompt,
        answer,
    }
}

pub const RPS_CHOICES: &[&str] = &["rock", "paper", "scissors"];

// RpsOutcome — resolution of one rock-paper-scissors exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsOutcome {
    Tie,
    UserWins,
    BotWins,
}

/// Standard beats-relation: rock beats scissors, scissors beats paper,
/// paper beats rock.
#[must_use]
pub fn rps_outcome(user: &str, bot: &str) -> RpsOutcome {
    if user == bot {
        return RpsOutcome::Tie;
    }
    match (user, bot) {
        ("rock", "scissors") | ("paper", "rock") | ("scissors", "paper") => RpsOutcome::UserWins,
        _ => RpsOutcome::BotWins,
    }
}

// AnswerOutcome — what one game turn did with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Rock-paper-scissors input was not one of the three choices; re-prompt.
    InvalidChoice,
    /// Rock-paper-scissors resolved against a freshly drawn bot choice.
    Resolved {
        bot_choice: &'static str,
        outcome: RpsOutcome,
    },
    /// Answer-based game solved.
    Correct,
    /// Answer-based game not solved; the game stays active.
    Retry,
}

/// Check one normalized input against an active game. The caller owns
/// clearing the game; this only decides the turn.
pub fn check_answer(
    game: &ActiveGame,
    normalized: &str,
    rng: &mut RandomSource,
) -> AnswerOutcome {
    if game.id == GameId::Rps {
        if !RPS_CHOICES.contains(&normalized) {
            return AnswerOutcome::InvalidChoice;
        }
        let bot_choice = *rng.pick(RPS_CHOICES);
        return AnswerOutcome::Resolved {
            bot_choice,
            outcome: rps_outcome(normalized, bot_choice),
        };
    }
    match &game.answer {
        Some(answer) if normalized.contains(answer.as_str()) => AnswerOutcome::Correct,
        _ => AnswerOutcome::Retry,
    }
}
