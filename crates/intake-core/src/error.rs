//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("UNITS/{0}")]
    UnitsError(String),

    #[error("SERIALIZE/{0}")]
    SerializeError(String),
}

impl IntakeError {
    /// Config loading failure, whatever format the document was in.
    pub fn config(err: impl std::fmt::Display) -> Self {
        IntakeError::ConfigError(err.to_string())
    }
}

impl From<serde_yaml::Error> for IntakeError {
    fn from(err: serde_yaml::Error) -> Self {
        IntakeError::config(err)
    }
}

/// Output serialization failures. JSON config documents go through
/// [`IntakeError::config`] instead.
impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::SerializeError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
