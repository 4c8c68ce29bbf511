use chrono::NaiveDateTime;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::board::{BoardView, Scoreboard};
use crate::config::{FeedLocation, ScoreboardConfig};
use crate::error::FeedError;
use crate::feed;
use crate::scheduler::VenueClock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Overrides the configured feed location for this invocation.
    #[serde(default)]
    pub feed_url: Option<String>,
    /// Venue-local wall-clock instant to evaluate at; defaults to the current time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub board: BoardView,
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;
    let mut config = ScoreboardConfig::load()?;
    if let Some(url) = payload.feed_url {
        config.feed = FeedLocation::Url(url);
    }
    let now = match payload.now {
        Some(now) => now,
        None => VenueClock::new(config.tz()?).now(),
    };

    // The source is moved into the blocking task, which needs 'static ownership.
    let source = feed::from_config(&config);
    let result = tokio::task::spawn_blocking(move || source.fetch())
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "Feed task join error");
            Err(FeedError::Task(e.to_string()))
        });

    let response = board_response(&config, result, now);
    info!(message = %response.message, "Prepared board");
    Ok(response)
}

/// Build the one-shot board for a fetch outcome.
pub fn board_response(
    config: &ScoreboardConfig,
    result: Result<String, FeedError>,
    now: NaiveDateTime,
) -> Response {
    let mut board = Scoreboard::new(config.catalog(), config.normalize_options(), now);
    let view = board.apply_feed(result, now).clone();

    let message = match &view.warning {
        Some(warning) => warning.clone(),
        None => {
            let showing = view.courts.iter().filter(|c| c.fixture.is_some()).count();
            if showing == 0 {
                format!("No upcoming matches at {}.", now)
            } else {
                format!("{} of {} courts have a match to show at {}.", showing, view.courts.len(), now)
            }
        }
    };

    Response { message, board: view }
}
