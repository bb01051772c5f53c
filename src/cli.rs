use std::path::PathBuf;

use clap::Parser;

/// `HappyBot` — keyword-matching chat companion with mini-games.
#[derive(Parser, Debug)]
#[command(name = "happybot")]
#[command(version = "0.1.0")]
#[command(about = "A cheerful keyword-matching chat companion.", long_about = None)]
pub struct Cli {
    /// Username for this session (overrides the stored setting)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Seed for deterministic reply and game selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to an alternate settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,
}
