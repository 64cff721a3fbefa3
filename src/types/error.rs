use thiserror::Error;

/// Errors that can occur when using the live-preview client.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// WebSocket protocol error (handshake failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// General connection error with descriptive message
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid session options or page URL
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error while talking to a collaborator endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error (malformed page URL)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Collaborator endpoint answered with an unexpected status.
    /// `message` is the response body, meant to be shown to the user as-is.
    #[error("Request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The session was torn down and no longer accepts commands
    #[error("Session torn down")]
    TornDown,
}

/// Convenience type alias for `Result<T, PreviewError>`.
pub type Result<T> = std::result::Result<T, PreviewError>;
