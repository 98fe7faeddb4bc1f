//! Error taxonomy for translation failures.
//!
//! Every variant is fatal: the build aborts and nothing further is written.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid action: {0}")]
    UnknownAction(String),

    #[error("Unknown drive type: {0}")]
    UnknownDrive(String),

    #[error("Invalid Input: {action} action has no arguments")]
    MissingArgument { action: &'static str },

    #[error("Invalid Input: Motor with id {0} not found")]
    MotorNotFound(String),

    #[error("Unknown file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Template has no `{0}` placeholder")]
    MissingPlaceholder(&'static str),
}

pub type Result<T> = std::result::Result<T, BuildError>;
