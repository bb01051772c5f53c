use chrono::{DateTime, Utc};

use happybot::core::category::{self, Category};
use happybot::core::classifier::classify;
use happybot::core::dispatcher::{
    BufferedTurnSink, Dispatcher, OutboundTurn, SKIP_ACK, THREAT_REPLY, TurnOutcome,
};
use happybot::core::games::{self, GameId, RPS_CHOICES};
use happybot::core::rng::RandomSource;
use happybot::core::session::{HISTORY_CAP, Role};
use happybot::core::text::normalize;

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
fn threat_input_gets_the_fixed_safety_reply_only() {
    // co-occurring happiness keyword must not matter, nor case/punctuation
    for input in ["I will KILL it!!", "so happy I could kill", "you IDIOT."] {
        let mut bot = bot(5);
        bot.submit_text_at(input, at(0));
        assert_eq!(drain_bot(&mut bot), [THREAT_REPLY], "input: {input}");
        assert!(bot.context().last_emotion.is_none());
    }
}

#[test]
fn classifier_returns_the_single_matching_category() {
    assert_eq!(classify("feeling lonely tonight"), Some(Category::Sadness));
    assert_eq!(classify(&normalize("I am SO worried...")), Some(Category::Stress));
}

#[test]
fn classifier_breaks_ties_by_declaration_order() {
    // sadness is declared before happiness, calm before yesNo
    assert_eq!(classify("sad but happy"), Some(Category::Sadness));
    assert_eq!(classify("ok"), Some(Category::Calm));
}

#[test]
fn normalization_is_idempotent() {
    for raw in ["Hi!", "I think it's an ECHO!", "  what??  ", "ROCK."] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn history_is_bounded_at_the_cap() {
    let mut bot = bot(6);
    // each turn appends a user entry and a bot reply
    for turn in 0..150 {
        bot.submit_text_at(&format!("message number {turn}"), at(turn * 1_000));
    }
    let history = bot.context().turn_history;
    assert_eq!(history.len(), HISTORY_CAP);
    // 300 entries were pushed; the first 100 fell off
    assert_eq!(history[0].text, "message number 50");
    assert_eq!(history[0].role, Role::User);
}

#[test]
fn starting_a_game_sets_the_active_game() {
    let mut bot = bot(7);
    assert!(!bot.game_active());
    bot.start_random_game_at(at(0));
    assert!(bot.game_active());
    let prompt = &drain_bot(&mut bot)[0];
    assert!(prompt.starts_with("🎮 Mini-Game: "), "prompt: {prompt}");
}

#[test]
fn skip_clears_the_game_with_one_acknowledgement() {
    for skip in ["skip", "SKIP", "s", "S"] {
        let mut bot = bot(8);
        bot.start_game_at(games::definition(GameId::Riddle), at(0));
        bot.sink_mut().drain();

        bot.submit_text_at(skip, at(1_000));
        assert_eq!(drain_bot(&mut bot), [SKIP_ACK], "skip token: {skip}");
        assert!(!bot.game_active());
    }
}

#[test]
fn number_guess_answer_is_always_one_to_ten() {
    for seed in 0..30 {
        let mut rng = RandomSource::seeded(seed);
        let game = games::spawn(games::definition(GameId::NumberGuess), &mut rng);
        let answer: u32 = game.answer.as_deref().unwrap().parse().unwrap();
        assert!((1..=10).contains(&answer));
    }
}

#[test]
fn rps_resolves_each_valid_choice_exactly_once() {
    for (seed, user_choice) in [(1, "rock"), (2, "paper"), (3, "scissors")] {
        let mut bot = bot(seed);
        bot.start_game_at(games::definition(GameId::Rps), at(0));
        bot.sink_mut().drain();

        bot.submit_text_at(user_choice, at(1_000));
        let lines = drain_bot(&mut bot);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];

        let bot_choice = line
            .strip_prefix("I chose ")
            .and_then(|rest| rest.split(' ').next())
            .unwrap();
        assert!(RPS_CHOICES.contains(&bot_choice), "line: {line}");

        let expected = match games::rps_outcome(user_choice, bot_choice) {
            games::RpsOutcome::Tie => format!("I chose {bot_choice} — it's a tie!"),
            games::RpsOutcome::UserWins => format!("I chose {bot_choice} — you win! 🎉"),
            games::RpsOutcome::BotWins => format!("I chose {bot_choice} — I win 😎"),
        };
        assert_eq!(line, &expected);
        assert!(!bot.game_active());
    }
}

#[test]
fn rps_reprompts_on_an_invalid_choice() {
    let mut bot = bot(9);
    bot.start_game_at(games::definition(GameId::Rps), at(0));
    bot.sink_mut().drain();

    bot.submit_text_at("lizard", at(1_000));
    assert_eq!(
        drain_bot(&mut bot),
        ["Please type 'rock', 'paper' or 'scissors'."]
    );
    assert!(bot.game_active());
}

#[test]
fn second_turn_inside_the_debounce_window_is_dropped() {
    let mut bot = bot(10);
    assert_eq!(bot.submit_text_at("hi", at(0)), TurnOutcome::Replied);
    assert_eq!(bot.submit_text_at("hello", at(100)), TurnOutcome::Ignored);

    let turns = bot.sink_mut().drain();
    let replies = turns
        .iter()
        .filter(|turn| matches!(turn, OutboundTurn::Bot(_)))
        .count();
    assert_eq!(replies, 1);

    // a turn outside the window is accepted again
    assert_eq!(bot.submit_text_at("hello", at(400)), TurnOutcome::Replied);
}

#[test]
fn greeting_replies_without_touching_last_emotion() {
    let mut bot = bot(11);
    bot.submit_text_at("hi", at(0));
    let lines = drain_bot(&mut bot);
    assert_eq!(lines.len(), 1);
    assert!(category::responses(Category::Greetings).contains(&lines[0].as_str()));
    assert!(bot.context().last_emotion.is_none());

    // an emotion category sets it; a later greeting leaves it alone
    bot.submit_text_at("feeling lonely", at(1_000));
    assert_eq!(bot.context().last_emotion, Some(Category::Sadness));
    bot.submit_text_at("hello again", at(2_000));
    assert_eq!(bot.context().last_emotion, Some(Category::Sadness));
}

#[test]
fn boredom_replies_first_then_the_game_prompt() {
    let mut bot = bot(12);
    let outcome = bot.submit_text_at("I am so bored today", at(0));
    assert_eq!(outcome, TurnOutcome::GamePending);

    let lines = drain_bot(&mut bot);
    assert_eq!(lines.len(), 1);
    assert!(category::responses(Category::Boredom).contains(&lines[0].as_str()));
    assert!(!bot.game_active());

    // the runtime invokes this once the pacing delay elapses
    bot.start_random_game_at(at(600));
    assert!(bot.game_active());
    assert!(drain_bot(&mut bot)[0].starts_with("🎮 Mini-Game: "));
}

#[test]
fn riddle_answer_matches_by_containment() {
    let mut bot = bot(13);
    bot.start_game_at(games::definition(GameId::Riddle), at(0));
    bot.sink_mut().drain();

    bot.submit_text_at("I think it's an ECHO!", at(1_000));
    assert_eq!(drain_bot(&mut bot), ["🎉 Correct! You got it right!"]);
    assert!(!bot.game_active());
}

#[test]
fn wrong_answers_retry_without_limit() {
    let mut bot = bot(14);
    bot.start_game_at(games::definition(GameId::Math), at(0));
    bot.sink_mut().drain();

    for attempt in 0..10 {
        bot.submit_text_at("41?", at(1_000 + attempt * 1_000));
        assert_eq!(
            drain_bot(&mut bot),
            ["🤔 Not yet — try again or type 'skip'."]
        );
        assert!(bot.game_active());
    }

    bot.submit_text_at("it is 42", at(20_000));
    assert!(!bot.game_active());
}

#[test]
fn game_turns_bypass_classification() {
    let mut bot = bot(15);
    bot.start_game_at(games::definition(GameId::Animal), at(0));
    bot.sink_mut().drain();

    // "happy" would normally classify, but an active game consumes the turn
    bot.submit_text_at("a happy rabbit", at(1_000));
    assert_eq!(drain_bot(&mut bot), ["🎉 Correct! You got it right!"]);
    assert!(bot.context().last_emotion.is_none());
}

#[test]
fn context_snapshot_is_immutable() {
    let mut bot = bot(16);
    bot.submit_text_at("hi", at(0));
    let snapshot = bot.context();
    let frozen_len = snapshot.turn_history.len();

    bot.submit_text_at("feeling glad", at(1_000));
    assert_eq!(snapshot.turn_history.len(), frozen_len);
    assert!(snapshot.last_emotion.is_none());
    assert_eq!(bot.context().last_emotion, Some(Category::Happiness));
}

#[test]
fn set_username_reflects_in_the_snapshot() {
    let mut bot = bot(17);
    bot.set_username("Sam");
    assert_eq!(bot.context().username, "Sam");
}
