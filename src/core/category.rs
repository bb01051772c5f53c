use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// Category — classification bucket for user intent, driving reply selection.
// Unknown and Fallback carry no keywords; they are reachable only as the
// dispatcher's default paths for unmatched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Category {
    Greetings,
    Sadness,
    Happiness,
    Anger,
    Boredom,
    Stress,
    Calm,
    Confusion,
    Threats,
    YesNo,
    Jokes,
    Unknown,
    Fallback,
}

// Trigger keywords, matched as substrings of normalized input. Declaration
// order is the tie-break: the first category whose keyword matches wins.
pub const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Greetings,
        &["hi", "hello", "hey", "yo", "sup", "hoi", "hallo"],
    ),
    (
        Category::Sadness,
        &["sad", "unhappy", "depressed", "down", "lonely", "cry", "miserable", "hurt"],
    ),
    (
        Category::Happiness,
        &["happy", "excited", "joy", "glad", "love", "smile", "good", "cheerful"],
    ),
    (
        Category::Anger,
        &["angry", "mad", "furious", "upset", "hate", "boos", "irritated"],
    ),
    (
        Category::Boredom,
        &["bored", "meh", "nothing", "dull", "tired", "verveeld", "saai"],
    ),
    (
        Category::Stress,
        &["stressed", "anxious", "worried", "panic", "druk", "overwhelmed"],
    ),
    (
        Category::Calm,
        &["calm", "relaxed", "peaceful", "ok", "fine", "chill", "rustig"],
    ),
    (
        Category::Confusion,
        &["confused", "huh", "what", "idk", "unsure"],
    ),
    (
        Category::Threats,
        &["kill", "die", "stupid", "hate you", "idiot", "fok", "fuck"],
    ),
    (
        Category::YesNo,
        &["yes", "yeah", "yep", "sure", "ok", "no", "nope", "nah", "ja", "nee"],
    ),
    (Category::Jokes, &["joke", "funny", "lol", "mop", "grap"]),
];

/// Trigger keywords for one category. Empty for the keywordless catch-all
/// categories (Unknown, Fallback).
#[must_use]
pub fn keywords(category: Category) -> &'static [&'static str] {
    KEYWORDS
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(&[], |&(_, entries)| entries)
}

/// Candidate replies for a category. The match is exhaustive, so every
/// category is guaranteed a non-empty response set.
#[must_use]
pub fn responses(category: Category) -> &'static [&'static str] {
    match category {
        Category::Greetings => &[
            "Hello! 😄 How are you today?",
            "Hey! 👋 Good to see you!",
            "Hi there! 😎 Ready to chat?",
            "Yo! 🌸 What's up?",
            "Greetings! 😁 How's your mood?",
        ],
        Category::Sadness => &[
            "I hear you 💛 It's okay to feel sad.",
            "Take your time — I'm listening.",
            "Want to talk about it? I'm here for you.",
            "Even tough days end 💛 You're not alone.",
        ],
        Category::Happiness => &[
            "Yay! 😄 That's great!",
            "Amazing! 😎 Tell me more!",
            "Love to hear that 😁",
            "Fantastic! Want to celebrate with a joke?",
        ],
        Category::Anger => &[
            "I understand 💛 Let's take a deep breath together.",
            "Anger is natural. Want to vent or try a fun distraction?",
            "Whoa 😅 Let's stay calm together.",
        ],
        Category::Boredom => &[
            "Feeling bored? 😅 We can play a mini-game!",
            "How about a riddle or number guessing?",
            "I have some fun challenges — pick one!",
        ],
        Category::Stress => &[
            "Take a deep breath with me: in... out... 💨",
            "Small steps — one thing at a time!",
            "Want a quick relaxation exercise or fun distraction?",
        ],
        Category::Calm => &[
            "Nice! Calm moments are precious 🌸",
            "Feeling relaxed 😄 Want a fun fact?",
            "Peaceful vibes — shall we chat about something light?",
        ],
        Category::Confusion => &[
            "Hmm 😅 Can you explain that differently?",
            "Not sure I understand — help me out?",
            "I'm a bit confused by that 🤔",
        ],
        Category::Threats => &[
            "Let's stay safe — I'm here to help.",
            "Whoa — I care about you, let's stay friendly.",
            "If you're upset, I can listen — but no harm talk.",
        ],
        Category::YesNo => &[
            "Yes! 😄 Great!",
            "No worries, that's fine 👍",
            "Sure thing! 💛",
            "Okay — we can pause if needed",
        ],
        Category::Jokes => &[
            "Why did the computer get cold? It left its Windows open! 😄",
            "What do you call fake spaghetti? An impasta! 🍝",
            "I told a joke to a robot once — it short-circuited 🤖😂",
        ],
        Category::Unknown => &[
            "Sorry, I don't understand 😅 Can you try another phrase?",
            "Haha 😄 That's new — tell me more!",
            "Hmm interesting 🤔 Can you explain?",
        ],
        Category::Fallback => &[
            "Bloop bloop 🤖 I need more info!",
            "HappyBot is dancing 🕺 Tell me more!",
            "🤖 Beep bop — that's puzzling!",
        ],
    }
}
