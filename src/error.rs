//! Failures of the text-generation capability.
//!
//! Nothing inside the debate engine catches these. A failed call aborts the
//! whole run and the error reaches the caller unchanged.

use thiserror::Error;

/// The text generator could not produce output.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured for the backend.
    #[error("{var} is not set; export it before starting a debate")]
    MissingCredential { var: &'static str },

    /// The request never produced an HTTP response.
    #[error("request to text generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("text generation backend returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    /// The backend answered successfully but with no text.
    #[error("text generation backend returned an empty completion")]
    EmptyCompletion,

    /// Any other backend-specific failure.
    #[error("text generation failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
