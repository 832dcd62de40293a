//! Action construction error types

use std::borrow::Cow;
use std::fmt;

use crate::UserFacingError;
use thiserror::Error;

/// Coarse classification of a construction failure.
///
/// Callers that only care about *why* a constructor refused its input match
/// on this instead of the individual [`ActionError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionErrorKind {
    /// An abstract base was asked to construct itself.
    ConstructionForbidden,
    /// An argument had the wrong concrete type.
    TypeMismatch,
    /// An argument had the right shape but bad content (keys, arity).
    InvalidArgument,
}

impl fmt::Display for ActionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstructionForbidden => write!(f, "construction forbidden"),
            Self::TypeMismatch => write!(f, "type mismatch"),
            Self::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ActionError {
    #[error("{class} is abstract and cannot be constructed")]
    ConstructionForbidden { class: String },

    #[error("no such class: {class}")]
    UnknownClass { class: String },

    #[error("type mismatch for {context}: expected {expected}, got {found}")]
    TypeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    #[error("unrecognized option for {class}: {key}")]
    UnrecognizedOption { class: String, key: String },

    #[error("missing required field for {class}: {field}")]
    MissingField { class: String, field: String },

    #[error("wrong number of arguments for {class}: given {given}, expected {expected}")]
    WrongArity {
        class: String,
        given: usize,
        expected: String,
    },
}

impl ActionError {
    /// Classify this error into one of the three construction failure kinds.
    #[must_use]
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            Self::ConstructionForbidden { .. } => ActionErrorKind::ConstructionForbidden,
            Self::TypeMismatch { .. } => ActionErrorKind::TypeMismatch,
            Self::UnknownClass { .. }
            | Self::UnrecognizedOption { .. }
            | Self::MissingField { .. }
            | Self::WrongArity { .. } => ActionErrorKind::InvalidArgument,
        }
    }

    #[must_use]
    pub fn forbidden(class: impl Into<String>) -> Self {
        Self::ConstructionForbidden {
            class: class.into(),
        }
    }

    #[must_use]
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl UserFacingError for ActionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ConstructionForbidden { .. } => {
                Some("Construct one of the concrete subclasses instead.")
            }
            Self::UnknownClass { .. } => Some("Run `pact new --help` to list known classes."),
            Self::UnrecognizedOption { .. } | Self::MissingField { .. } => {
                Some("Check the option names against the documented keys.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ConstructionForbidden { .. } => "action.construction_forbidden",
            Self::UnknownClass { .. } => "action.unknown_class",
            Self::TypeMismatch { .. } => "action.type_mismatch",
            Self::UnrecognizedOption { .. } => "action.unrecognized_option",
            Self::MissingField { .. } => "action.missing_field",
            Self::WrongArity { .. } => "action.wrong_arity",
        };
        Some(code)
    }
}
