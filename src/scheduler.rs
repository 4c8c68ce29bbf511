use std::future::Future;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::board::{BoardView, Scoreboard, clock_text};
use crate::config::ScoreboardConfig;
use crate::error::{ConfigError, FeedError};
use crate::feed::FixtureSource;

/// Receives everything the board publishes.
pub trait BoardSink {
    fn clock(&mut self, text: &str);

    fn board(&mut self, view: &BoardView);
}

/// Writes boards to stdout; clock ticks go to the debug log.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl BoardSink for TerminalSink {
    fn clock(&mut self, text: &str) {
        debug!(clock = %text, "Clock tick");
    }

    fn board(&mut self, view: &BoardView) {
        println!("{}", clock_text(view.generated_at));
        println!("{}", view);
    }
}

/// Venue-local wall clock.
#[derive(Debug, Clone, Copy)]
pub struct VenueClock {
    tz: Tz,
}

impl VenueClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// Drive the board forever.
pub async fn run<S: BoardSink>(
    config: ScoreboardConfig,
    source: Arc<dyn FixtureSource>,
    sink: S,
) -> Result<(), ConfigError> {
    run_until(config, source, sink, std::future::pending::<()>()).await
}

/// Drive the clock, display and feed timers until `shutdown` resolves.
///
/// Feed fetches run on a blocking task and report back over a channel, so a
/// slow feed never holds up the clock or display ticks.
pub async fn run_until<S, F>(
    config: ScoreboardConfig,
    source: Arc<dyn FixtureSource>,
    mut sink: S,
    shutdown: F,
) -> Result<(), ConfigError>
where
    S: BoardSink,
    F: Future<Output = ()>,
{
    config.validate()?;
    let clock = VenueClock::new(config.tz()?);
    let mut board = Scoreboard::new(config.catalog(), config.normalize_options(), clock.now());
    let (tx, mut rx) = mpsc::channel::<Result<String, FeedError>>(4);

    let mut clock_tick = interval(config.intervals.clock());
    let mut display_tick = interval(config.intervals.display());
    let mut feed_tick = interval(config.intervals.feed());
    for tick in [&mut clock_tick, &mut display_tick, &mut feed_tick] {
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    }

    info!(feed = %source.describe(), timezone = %config.timezone, "Starting scoreboard");
    let mut fetch_in_flight = false;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Scoreboard shutting down");
                return Ok(());
            }
            _ = clock_tick.tick() => {
                sink.clock(&clock_text(clock.now()));
            }
            _ = display_tick.tick() => {
                sink.board(board.refresh_display(clock.now()));
            }
            _ = feed_tick.tick() => {
                if fetch_in_flight {
                    warn!("Previous feed fetch still running; skipping this refresh");
                } else {
                    fetch_in_flight = true;
                    spawn_fetch(Arc::clone(&source), tx.clone());
                }
            }
            Some(result) = rx.recv() => {
                fetch_in_flight = false;
                sink.board(board.apply_feed(result, clock.now()));
            }
        }
    }
}

fn spawn_fetch(source: Arc<dyn FixtureSource>, tx: mpsc::Sender<Result<String, FeedError>>) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || source.fetch())
            .await
            .unwrap_or_else(|e| Err(FeedError::Task(e.to_string())));
        if tx.send(result).await.is_err() {
            debug!("Board stopped before feed result arrived");
        }
    });
}
