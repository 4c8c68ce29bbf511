use thiserror::Error;

/// The fixture feed could not be fetched. Previously displayed data stays valid.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Feed {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read feed body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("Failed to read feed file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
