use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, info_span, instrument};

use crate::config::{FeedLocation, ScoreboardConfig};
use crate::error::FeedError;

/// Anything that can hand back the raw fixture table.
pub trait FixtureSource: Send + Sync {
    fn fetch(&self) -> Result<String, FeedError>;

    fn describe(&self) -> String;
}

/// Plain HTTP(S) GET of the fixture table.
#[derive(Clone)]
pub struct HttpFeed {
    url: String,
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { url: url.into(), agent }
    }
}

impl FixtureSource for HttpFeed {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> Result<String, FeedError> {
        let response_result = {
            let _span = info_span!("feed_fetch").entered();
            self.agent.get(&self.url).call()
        };
        let response = response_result.map_err(|e| {
            error!(error = %e, url = %self.url, "Feed request failed");
            FeedError::Request { url: self.url.clone(), reason: e.to_string() }
        })?;

        let code = response.status().as_u16();
        if !(200..300).contains(&code) {
            error!(status = code, url = %self.url, "Feed returned non-success status");
            return Err(FeedError::HttpStatus { url: self.url.clone(), status: code });
        }

        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read feed body");
            FeedError::Body { url: self.url.clone(), reason: e.to_string() }
        })?;
        info!(bytes = body.len(), "Fetched fixture feed");
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fixture table read from the local filesystem on every refresh.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FixtureSource for FileFeed {
    fn fetch(&self) -> Result<String, FeedError> {
        std::fs::read_to_string(&self.path).map_err(|source| {
            error!(error = %source, path = %self.path.display(), "Failed to read feed file");
            FeedError::File { path: self.path.display().to_string(), source }
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source named by the config.
pub fn from_config(config: &ScoreboardConfig) -> Box<dyn FixtureSource> {
    match &config.feed {
        FeedLocation::Url(url) => Box::new(HttpFeed::new(url.clone(), config.feed_timeout())),
        FeedLocation::Path(path) => Box::new(FileFeed::new(path.clone())),
    }
}
