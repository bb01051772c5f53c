#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use happybot::cli::Cli;
use happybot::config::Settings;
use happybot::core::rng::RandomSource;
use happybot::runtime;
use happybot::transport::channels::TerminalChannel;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    let mut settings = match cli.settings {
        Some(path) => Settings::load_or_init_at(path),
        None => Settings::load_or_init(),
    };
    if let Some(username) = cli.username {
        settings.username = username;
    }

    let rng = match cli.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };

    runtime::run(Arc::new(TerminalChannel::new()), settings, rng).await
}
