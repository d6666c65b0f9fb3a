use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("category set must contain at least one category")]
    EmptyCategorySet,
}

/// Startup configuration failures. These are fatal: the process refuses to serve.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Malformed inbound events, surfaced to the caller as 400 responses.
#[derive(Debug, Error)]
pub enum RequestError {
    /// `body` was present but not a JSON-encoded string; carries the reason for logs.
    #[error("Invalid JSON in request body")]
    InvalidBody(String),

    #[error("Missing request type")]
    MissingType,
}
