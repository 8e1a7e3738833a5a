use thiserror::Error;

/// Core error type for DeepCite.
#[derive(Debug, Error)]
pub enum CiteError {
    #[error("invalid source IDs: {input}")]
    InvalidSourceIds { input: String },
    #[error("missing environment variable: {0}")]
    MissingSecret(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CiteError {
    pub fn invalid_source_ids(input: impl Into<String>) -> Self {
        Self::InvalidSourceIds {
            input: input.into(),
        }
    }
}
