use thiserror::Error;

/// Service-level error taxonomy. Every failure a caller can observe maps to
/// exactly one of these variants.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Missing or malformed request field; retrying without fixing the input
    /// will not help.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Unknown or expired session identifier; the caller must start over.
    #[error("session not found")]
    SessionNotFound,
    /// An answer was submitted with no question awaiting grading.
    #[error("no active question to grade")]
    NoActiveQuestion,
    /// No more content could be produced even after a top-up.
    #[error("session exhausted")]
    SessionExhausted,
    /// The generator failed or returned nothing at session creation.
    #[error("question generation unavailable")]
    GenerationUnavailable,
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from the question generator boundary.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
    #[error("Malformed generator response: {0}")]
    MalformedResponse(String),
}

/// Errors from the session store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}
