#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the pact package-action model
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling.

use std::borrow::Cow;

use thiserror::Error;

pub mod action;
pub mod config;
pub mod repository;

// Re-export all error types at the root
pub use action::{ActionError, ActionErrorKind};
pub use config::ConfigError;
pub use repository::RepositoryError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("action error: {0}")]
    Action(#[from] ActionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("I/O error: {message}")]
    Io {
        #[cfg_attr(feature = "serde", serde(with = "io_kind_as_str"))]
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl Error {
    /// The construction failure kind, if this error came from building an action value
    #[must_use]
    pub fn action_kind(&self) -> Option<ActionErrorKind> {
        match self {
            Self::Action(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for pact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Action(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Repository(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Action(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Repository(err) => err.user_hint(),
            Error::Io { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Action(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Repository(err) => err.user_code(),
            Error::Io { .. } => Some("error.io"),
        }
    }
}

#[cfg(feature = "serde")]
mod io_kind_as_str {
    use serde::{Deserialize, Deserializer, Serializer};
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(kind: &std::io::ErrorKind, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&format!("{kind:?}"))
    }
    pub fn deserialize<'de, D>(deserializer: D) -> Result<std::io::ErrorKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Best effort mapping; default to Other
        Ok(match s.as_str() {
            "NotFound" => std::io::ErrorKind::NotFound,
            "PermissionDenied" => std::io::ErrorKind::PermissionDenied,
            "AlreadyExists" => std::io::ErrorKind::AlreadyExists,
            "InvalidInput" => std::io::ErrorKind::InvalidInput,
            "InvalidData" => std::io::ErrorKind::InvalidData,
            "UnexpectedEof" => std::io::ErrorKind::UnexpectedEof,
            _ => std::io::ErrorKind::Other,
        })
    }
}
