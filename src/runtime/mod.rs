use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at, sleep};

use crate::commands::{CommandOutcome, handle_command, parse_command};
use crate::config::Settings;
use crate::core::dispatcher::{BufferedTurnSink, Dispatcher, OutboundTurn, TurnOutcome};
use crate::core::rng::RandomSource;
use crate::transport::channels::{Channel, InboundMessage};

/// Pacing delay between a boredom reply and the mini-game prompt. The
/// reply-before-prompt order is the contract; the delay itself is cosmetic.
pub const GAME_PACING_DELAY: Duration = Duration::from_millis(600);

/// One-shot delay before the startup hint message.
pub const STARTUP_HINT_DELAY: Duration = Duration::from_millis(1200);

/// Cadence of the idle-time fun interaction.
pub const IDLE_INTERVAL: Duration = Duration::from_secs(30);

/// Wire a channel to a fresh dispatcher and run until the channel closes
/// or the user quits.
pub async fn run(channel: Arc<dyn Channel>, settings: Settings, rng: RandomSource) -> Result<()> {
    let (tx, rx) = mpsc::channel::<InboundMessage>(32);
    let listener = {
        let channel = Arc::clone(&channel);
        tokio::spawn(async move { channel.listen(tx).await })
    };

    let dispatcher = Dispatcher::new(settings.username.clone(), rng, BufferedTurnSink::new());
    let result = run_loop(channel, rx, settings, dispatcher).await;

    listener.abort();
    result
}

/// The single logical task: every session mutation happens here, one event
/// at a time — user turns, the idle tick, the startup hint, and the
/// pacing-delayed game start all drain through the same loop.
pub async fn run_loop(
    channel: Arc<dyn Channel>,
    mut rx: mpsc::Receiver<InboundMessage>,
    mut settings: Settings,
    mut dispatcher: Dispatcher<BufferedTurnSink>,
) -> Result<()> {
    dispatcher.greet();
    flush(&mut dispatcher, channel.as_ref()).await?;

    let mut idle = interval_at(Instant::now() + IDLE_INTERVAL, IDLE_INTERVAL);
    let hint = sleep(STARTUP_HINT_DELAY);
    tokio::pin!(hint);
    let mut hint_fired = false;
    let pending_game = sleep(Duration::ZERO);
    tokio::pin!(pending_game);
    let mut game_pending = false;

    loop {
        tokio::select! {
            inbound = rx.recv() => {
                let Some(msg) = inbound else { break };
                tracing::debug!(id = %msg.id, channel = channel.name(), "inbound message");
                if let Some(command) = parse_command(&msg.content) {
                    match handle_command(command, &mut dispatcher, &mut settings) {
                        CommandOutcome::Handled => {}
                        CommandOutcome::Reply(text) => channel.send(&text).await?,
                        CommandOutcome::Quit => break,
                    }
                } else if dispatcher.submit_text_at(&msg.content, msg.received_at)
                    == TurnOutcome::GamePending
                {
                    pending_game.as_mut().reset(Instant::now() + GAME_PACING_DELAY);
                    game_pending = true;
                }
            }
            () = &mut pending_game, if game_pending => {
                game_pending = false;
                dispatcher.start_random_game();
            }
            () = &mut hint, if !hint_fired => {
                hint_fired = true;
                dispatcher.startup_hint();
            }
            _ = idle.tick() => {
                dispatcher.maybe_idle_interaction();
            }
        }
        flush(&mut dispatcher, channel.as_ref()).await?;
    }

    Ok(())
}

/// Forward everything the dispatcher emitted since the last event to the
/// channel, in emission order.
async fn flush(dispatcher: &mut Dispatcher<BufferedTurnSink>, channel: &dyn Channel) -> Result<()> {
    for turn in dispatcher.sink_mut().drain() {
        match turn {
            OutboundTurn::UserEcho { text, username } => {
                channel.send(&format!("{username}: {text}")).await?;
            }
            OutboundTurn::Bot(text) => channel.send(&text).await?,
        }
    }
    Ok(())
}
