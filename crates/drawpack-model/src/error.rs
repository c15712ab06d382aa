//! Error types for model parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Mode string is neither `rfq` nor `po`.
    #[error("unrecognized mode '{value}' (expected 'rfq' or 'po')")]
    InvalidMode { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
