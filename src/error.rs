//! Error types for inventory operations.

use thiserror::Error;

/// Primary error type for stash operations.
#[derive(Error, Debug)]
pub enum StashError {
    // Input errors
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("Refusing to {action} without confirmation")]
    ConfirmationRequired { action: &'static str },

    // Lookup errors
    #[error("Room not found: {room}")]
    RoomNotFound { room: String },

    #[error("Storage '{storage}' not found in room '{room}'")]
    StorageNotFound { room: String, storage: String },

    // File errors
    #[error("Failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    FileWrite { path: String, reason: String },

    // Configuration errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // General errors
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl StashError {
    /// Short, stable tag for the error kind (used in robot output).
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::ConfirmationRequired { .. } => "confirmation_required",
            Self::RoomNotFound { .. } | Self::StorageNotFound { .. } => "not_found",
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::Io(_) => "io",
            Self::ConfigParse(_) | Self::ConfigInvalid(_) => "config",
            Self::Serialize(_) => "serialize",
            Self::Other(_) => "other",
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ConfirmationRequired { .. }
                | Self::RoomNotFound { .. }
                | Self::StorageNotFound { .. }
                | Self::ConfigParse(_)
                | Self::ConfigInvalid(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Validation { .. } => Some("Fill in every field and try again"),
            Self::ConfirmationRequired { .. } => Some("Re-run with --yes"),
            Self::RoomNotFound { .. } => Some("Run: stash list"),
            Self::StorageNotFound { .. } => Some("Run: stash list --room <ROOM>"),
            Self::FileWrite { .. } => Some("Check permissions or pick another path: stash config set-path <PATH>"),
            Self::ConfigParse(_) => Some("Run: stash config reset"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using StashError.
pub type Result<T> = std::result::Result<T, StashError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| StashError::Other(format!("{}: {e}", f().into())))
    }
}
