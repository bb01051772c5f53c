use chrono::{DateTime, Duration, Utc};

use super::category::{self, Category};
use super::classifier::classify;
use super::games::{self, AnswerOutcome, GameDefinition, REGISTRY, RpsOutcome};
use super::rng::RandomSource;
use super::session::{ContextSnapshot, Role, SessionState};
use super::text::normalize;

/// Minimum interval between two accepted user turns.
pub const DEBOUNCE_WINDOW_MS: i64 = 250;

/// Share of unmatched turns answered from the Unknown set; the rest come
/// from the Fallback set. Either reads as equivalent to the user — the
/// split only varies wording.
pub const UNKNOWN_REPLY_SHARE: f64 = 0.4;

/// Probability that one idle tick emits an unprompted message.
pub const IDLE_INTERACTION_CHANCE: f64 = 0.15;

/// Fixed de-escalation reply; emitted verbatim, never randomized.
pub const THREAT_REPLY: &str = "Let's stay safe — I'm here to help.";

pub const SKIP_ACK: &str = "Game skipped.";
pub const CORRECT_REPLY: &str = "🎉 Correct! You got it right!";
pub const RETRY_REPLY: &str = "🤔 Not yet — try again or type 'skip'.";
pub const RPS_REPROMPT: &str = "Please type 'rock', 'paper' or 'scissors'.";

pub const GREETING: &str = "Hi! I'm HappyBot Ultimate 😄 How are you feeling today?";
pub const STARTUP_HINT: &str =
    "Say 'bored' to play a mini-game, 'joke' for a laugh, or 'remember X is Y' to teach me something!";

/// Unprompted messages for the idle-time fun interaction.
pub const FUN_INTERACTIONS: &[&str] = &[
    "🌸 Fun fact: Honey never spoils!",
    "🎵 Hum your favorite song for 30 seconds!",
    "😂 Tiny joke: ask 'joke'!",
    "📚 Quote: 'Small steps every day!'",
];

/// Presentation seam. The dispatcher pushes every rendered turn through
/// this in emission order; the user echo always precedes processing of
/// that turn.
pub trait TurnSink {
    fn on_user_echo(&mut self, text: &str, username: &str);
    fn on_bot_message(&mut self, text: &str);
}

// OutboundTurn — one rendered line waiting to be flushed to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundTurn {
    UserEcho { text: String, username: String },
    Bot(String),
}

/// Sink that buffers turns until the runtime drains them.
#[derive(Debug, Default)]
pub struct BufferedTurnSink {
    turns: Vec<OutboundTurn>,
}

impl BufferedTurnSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<OutboundTurn> {
        std::mem::take(&mut self.turns)
    }

    /// Bot messages buffered so far, oldest first, without draining.
    #[must_use]
    pub fn bot_messages(&self) -> Vec<&str> {
        self.turns
            .iter()
            .filter_map(|turn| match turn {
                OutboundTurn::Bot(text) => Some(text.as_str()),
                OutboundTurn::UserEcho { .. } => None,
            })
            .collect()
    }
}

impl TurnSink for BufferedTurnSink {
    fn on_user_echo(&mut self, text: &str, username: &str) {
        self.turns.push(OutboundTurn::UserEcho {
            text: text.to_string(),
            username: username.to_string(),
        });
    }

    fn on_bot_message(&mut self, text: &str) {
        self.turns.push(OutboundTurn::Bot(text.to_string()));
    }
}

// TurnOutcome — what the runtime should do after one submitted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty or debounced input; nothing happened.
    Ignored,
    /// Turn handled to completion.
    Replied,
    /// Boredom reply emitted; start a game once the pacing delay elapses.
    /// The reply-before-prompt order is the contract, the delay is pacing.
    GamePending,
}

/// Per-session conversation state machine. The two states — idle and
/// awaiting a game answer — are carried by `SessionState::active_game`.
/// Every operation runs synchronously to completion on the caller's task;
/// no dispatch path fails.
pub struct Dispatcher<S> {
    sink: S,
    rng: RandomSource,
    session: SessionState,
    debounce: Duration,
    last_accepted_at: Option<DateTime<Utc>>,
}

impl<S: TurnSink> Dispatcher<S> {
    pub fn new(username: impl Into<String>, rng: RandomSource, sink: S) -> Self {
        Self {
            sink,
            rng,
            session: SessionState::new(username),
            debounce: Duration::milliseconds(DEBOUNCE_WINDOW_MS),
            last_accepted_at: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Immutable deep-copy snapshot of the session.
    #[must_use]
    pub fn context(&self) -> ContextSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.session.username
    }

    /// Update the display username. Persistence is the caller's concern.
    pub fn set_username(&mut self, name: impl Into<String>) {
        self.session.username = name.into();
    }

    #[must_use]
    pub fn game_active(&self) -> bool {
        self.session.active_game.is_some()
    }

    /// Handle one raw user turn against the wall clock.
    pub fn submit_text(&mut self, raw: &str) -> TurnOutcome {
        self.submit_text_at(raw, Utc::now())
    }

    /// Handle one raw user turn at an explicit instant. Tests own the
    /// clock through this entry point.
    pub fn submit_text_at(&mut self, raw: &str, now: DateTime<Utc>) -> TurnOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }
        if let Some(last) = self.last_accepted_at {
            if now - last < self.debounce {
                tracing::trace!("turn inside debounce window, dropped");
                return TurnOutcome::Ignored;
            }
        }
        self.last_accepted_at = Some(now);

        self.session.history.push(Role::User, text, now);
        self.sink.on_user_echo(text, &self.session.username);

        let normalized = normalize(text);

        if self.session.active_game.is_some() {
            if normalized == "skip" || normalized == "s" {
                self.session.active_game = None;
                self.emit(SKIP_ACK, now);
                return TurnOutcome::Replied;
            }
            self.handle_game_answer(&normalized, now);
            return TurnOutcome::Replied;
        }

        // Safety check runs before and independently of classification, so
        // the de-escalation reply wins over any co-occurring keywords.
        if category::keywords(Category::Threats)
            .iter()
            .any(|keyword| normalized.contains(keyword))
        {
            self.emit(THREAT_REPLY, now);
            return TurnOutcome::Replied;
        }

        match classify(&normalized) {
            Some(Category::Boredom) => {
                tracing::debug!(category = %Category::Boredom, "classified turn");
                self.emit_random(Category::Boredom, now);
                TurnOutcome::GamePending
            }
            // Greetings leaves last_emotion untouched, like jokes and
            // yes/no acknowledgements.
            Some(found @ (Category::Greetings | Category::YesNo | Category::Jokes)) => {
                tracing::debug!(category = %found, "classified turn");
                self.emit_random(found, now);
                TurnOutcome::Replied
            }
            Some(found) => {
                tracing::debug!(category = %found, "classified turn");
                self.emit_random(found, now);
                self.session.last_emotion = Some(found);
                TurnOutcome::Replied
            }
            None => {
                let found = if self.rng.chance(UNKNOWN_REPLY_SHARE) {
                    Category::Unknown
                } else {
                    Category::Fallback
                };
                self.emit_random(found, now);
                TurnOutcome::Replied
            }
        }
    }

    /// Force-start a specific game and emit its prompt.
    pub fn start_game(&mut self, definition: &GameDefinition) {
        self.start_game_at(definition, Utc::now());
    }

    pub fn start_game_at(&mut self, definition: &GameDefinition, now: DateTime<Utc>) {
        let game = games::spawn(definition, &mut self.rng);
        tracing::debug!(game = %game.id, "mini-game started");
        let prompt = format!("🎮 Mini-Game: {} — {}", game.name, game.prompt);
        self.session.active_game = Some(game);
        self.emit(&prompt, now);
    }

    /// Uniform pick from the registry, then `start_game`.
    pub fn start_random_game(&mut self) {
        self.start_random_game_at(Utc::now());
    }

    pub fn start_random_game_at(&mut self, now: DateTime<Utc>) {
        let definition = *self.rng.pick(REGISTRY);
        self.start_game_at(&definition, now);
    }

    /// Startup greeting, emitted once when the session opens.
    pub fn greet(&mut self) {
        self.emit(GREETING, Utc::now());
    }

    /// One-shot follow-up hint, scheduled shortly after the greeting.
    pub fn startup_hint(&mut self) {
        self.emit(STARTUP_HINT, Utc::now());
    }

    /// Idle-time fun interaction: skipped entirely while a game is active,
    /// otherwise emits one unprompted message with a small probability.
    /// Returns whether a message was emitted.
    pub fn maybe_idle_interaction(&mut self) -> bool {
        if self.session.active_game.is_some() {
            return false;
        }
        if !self.rng.chance(IDLE_INTERACTION_CHANCE) {
            return false;
        }
        let line = *self.rng.pick(FUN_INTERACTIONS);
        self.emit(line, Utc::now());
        true
    }

    fn handle_game_answer(&mut self, normalized: &str, now: DateTime<Utc>) {
        let Some(game) = self.session.active_game.clone() else {
            return;
        };
        match games::check_answer(&game, normalized, &mut self.rng) {
            AnswerOutcome::InvalidChoice => self.emit(RPS_REPROMPT, now),
            AnswerOutcome::Resolved { bot_choice, outcome } => {
                let reply = match outcome {
                    RpsOutcome::Tie => format!("I chose {bot_choice} — it's a tie!"),
                    RpsOutcome::UserWins => format!("I chose {bot_choice} — you win! 🎉"),
                    RpsOutcome::BotWins => format!("I chose {bot_choice} — I win 😎"),
                };
                self.session.active_game = None;
                self.emit(&reply, now);
            }
            AnswerOutcome::Correct => {
                self.session.active_game = None;
                self.emit(CORRECT_REPLY, now);
            }
            AnswerOutcome::Retry => self.emit(RETRY_REPLY, now),
        }
    }

    fn emit(&mut self, text: &str, at: DateTime<Utc>) {
        self.session.history.push(Role::Bot, text, at);
        self.sink.on_bot_message(text);
    }

    fn emit_random(&mut self, category: Category, at: DateTime<Utc>) {
        let reply = *self.rng.pick(category::responses(category));
        self.emit(reply, at);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::games::{GameId, definition};

    use super::*;

    fn bot(seed: u64) -> Dispatcher<BufferedTurnSink> {
        Dispatcher::new("Friend", RandomSource::seeded(seed), BufferedTurnSink::new())
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn drain_bot(dispatcher: &mut Dispatcher<BufferedTurnSink>) -> Vec<String> {
        dispatcher
            .sink_mut()
            .drain()
            .into_iter()
            .filter_map(|turn| match turn {
                OutboundTurn::Bot(text) => Some(text),
                OutboundTurn::UserEcho { .. } => None,
            })
            .collect()
    }

    #[test]
    fn empty_and_whitespace_turns_are_ignored() {
        let mut bot = bot(1);
        assert_eq!(bot.submit_text_at("", at(0)), TurnOutcome::Ignored);
        assert_eq!(bot.submit_text_at("   ", at(1000)), TurnOutcome::Ignored);
        assert!(bot.sink().bot_messages().is_empty());
        assert!(bot.context().turn_history.is_empty());
    }

    #[test]
    fn echo_precedes_the_reply() {
        let mut bot = bot(1);
        bot.submit_text_at("hi", at(0));
        let turns = bot.sink_mut().drain();
        assert_eq!(turns.len(), 2);
        assert!(matches!(&turns[0], OutboundTurn::UserEcho { text, username }
            if text == "hi" && username == "Friend"));
        assert!(matches!(&turns[1], OutboundTurn::Bot(_)));
    }

    #[test]
    fn debounced_turn_changes_nothing() {
        let mut bot = bot(1);
        assert_eq!(bot.submit_text_at("hi", at(0)), TurnOutcome::Replied);
        assert_eq!(bot.submit_text_at("hello", at(100)), TurnOutcome::Ignored);
        let history = bot.context().turn_history;
        assert_eq!(history.len(), 2); // one user turn, one reply
    }

    #[test]
    fn threat_check_beats_classification() {
        let mut bot = bot(1);
        bot.submit_text_at("I am happy but I will KILL it!", at(0));
        assert_eq!(drain_bot(&mut bot), [THREAT_REPLY]);
        assert!(bot.context().last_emotion.is_none());
    }

    #[test]
    fn skip_token_must_match_exactly() {
        let mut bot = bot(1);
        bot.start_game_at(definition(GameId::Riddle), at(0));
        bot.sink_mut().drain();

        // "skipping" is a game answer attempt, not a skip
        bot.submit_text_at("skipping", at(1000));
        assert_eq!(drain_bot(&mut bot), [RETRY_REPLY]);
        assert!(bot.game_active());

        bot.submit_text_at("SKIP", at(2000));
        assert_eq!(drain_bot(&mut bot), [SKIP_ACK]);
        assert!(!bot.game_active());
    }

    #[test]
    fn single_letter_skip_works() {
        let mut bot = bot(2);
        bot.start_game_at(definition(GameId::Math), at(0));
        bot.submit_text_at("s", at(1000));
        assert!(!bot.game_active());
    }

    #[test]
    fn unmatched_turn_draws_from_unknown_or_fallback() {
        let unknown = category::responses(Category::Unknown);
        let fallback = category::responses(Category::Fallback);
        let mut seen_unknown = false;
        let mut seen_fallback = false;
        for seed in 0..40 {
            let mut bot = bot(seed);
            bot.submit_text_at("qqq zzz xxx", at(0));
            let lines = drain_bot(&mut bot);
            assert_eq!(lines.len(), 1);
            let line = lines[0].as_str();
            if unknown.contains(&line) {
                seen_unknown = true;
            } else if fallback.contains(&line) {
                seen_fallback = true;
            } else {
                panic!("reply from neither catch-all set: {line}");
            }
        }
        assert!(seen_unknown && seen_fallback);
    }

    #[test]
    fn idle_interaction_never_fires_during_a_game() {
        let mut bot = bot(3);
        bot.start_game_at(definition(GameId::Animal), at(0));
        bot.sink_mut().drain();
        for _ in 0..50 {
            assert!(!bot.maybe_idle_interaction());
        }
        assert!(bot.sink().bot_messages().is_empty());
    }

    #[test]
    fn idle_interaction_eventually_fires_when_idle() {
        let mut fired = false;
        for seed in 0..200 {
            let mut bot = bot(seed);
            if bot.maybe_idle_interaction() {
                fired = true;
                let lines = drain_bot(&mut bot);
                assert!(FUN_INTERACTIONS.contains(&lines[0].as_str()));
                break;
            }
        }
        assert!(fired);
    }

    #[test]
    fn greeting_then_hint_in_order() {
        let mut bot = bot(1);
        bot.greet();
        bot.startup_hint();
        assert_eq!(drain_bot(&mut bot), [GREETING, STARTUP_HINT]);
    }

    #[test]
    fn set_username_changes_the_echo() {
        let mut bot = bot(1);
        bot.set_username("Sam");
        bot.submit_text_at("hi", at(0));
        let turns = bot.sink_mut().drain();
        assert!(matches!(&turns[0], OutboundTurn::UserEcho { username, .. }
            if username == "Sam"));
    }
}
