use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Message too long: {length} characters (max: {max})")]
    TooLong { length: usize, max: usize },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Failed to write message: {0}")]
    Io(#[from] std::io::Error),
}
