//! Errors surfaced to script callbacks

use thiserror::Error;

use crate::config::ConfigError;
use crate::ecs::UnknownComponentKind;
use crate::foundation::VectorError;

/// Error that aborts the current script callback
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Vector kernel precondition failed
    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),

    /// Argument has the wrong shape or arity
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Handle does not refer to a usable engine object
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Component key names no known kind
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<UnknownComponentKind> for ScriptError {
    fn from(err: UnknownComponentKind) -> Self {
        Self::UnknownComponent(err.0)
    }
}
