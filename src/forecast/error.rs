use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Completion contained no text")]
    EmptyCompletion,
}
