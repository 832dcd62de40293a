//! Fetch failure reporting

use crate::args::{Mapping, MappingReader};
use pact_errors::ActionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why one file could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchActionFailure {
    target_file: String,
    requires_manual_fetching: bool,
    failed_automatic_fetching: bool,
    failed_integrity_checks: String,
}

impl FetchActionFailure {
    pub const CLASS: &'static str = "FetchActionFailure";
    pub const KEYS: [&'static str; 4] = [
        "target_file",
        "requires_manual_fetching",
        "failed_automatic_fetching",
        "failed_integrity_checks",
    ];

    #[must_use]
    pub fn new(
        target_file: impl Into<String>,
        requires_manual_fetching: bool,
        failed_automatic_fetching: bool,
        failed_integrity_checks: impl Into<String>,
    ) -> Self {
        Self {
            target_file: target_file.into(),
            requires_manual_fetching,
            failed_automatic_fetching,
            failed_integrity_checks: failed_integrity_checks.into(),
        }
    }

    /// Named form. All four keys are required.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedOption` for an unknown key, `MissingField` for an
    /// absent one, and `TypeMismatch` for a value of the wrong type.
    pub fn from_mapping(map: &Mapping) -> Result<Self, ActionError> {
        let reader = MappingReader::new(Self::CLASS, map, &Self::KEYS)?;
        Ok(Self {
            target_file: reader.string("target_file")?,
            requires_manual_fetching: reader.bool("requires_manual_fetching")?,
            failed_automatic_fetching: reader.bool("failed_automatic_fetching")?,
            failed_integrity_checks: reader.string("failed_integrity_checks")?,
        })
    }

    #[must_use]
    pub fn target_file(&self) -> &str {
        &self.target_file
    }

    #[must_use]
    pub fn requires_manual_fetching(&self) -> bool {
        self.requires_manual_fetching
    }

    #[must_use]
    pub fn failed_automatic_fetching(&self) -> bool {
        self.failed_automatic_fetching
    }

    /// Free-form description of failed checksum or size checks, empty if none
    #[must_use]
    pub fn failed_integrity_checks(&self) -> &str {
        &self.failed_integrity_checks
    }
}

/// A fetch that did not complete, with one record per problem file
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("fetch failed: {message} ({} file(s) affected)", .failures.len())]
pub struct FetchActionError {
    message: String,
    failures: Vec<FetchActionFailure>,
}

impl FetchActionError {
    #[must_use]
    pub fn new(message: impl Into<String>, failures: Vec<FetchActionFailure>) -> Self {
        Self {
            message: message.into(),
            failures,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn failures(&self) -> &[FetchActionFailure] {
        &self.failures
    }

    /// Whether the user has to download something by hand before retrying
    #[must_use]
    pub fn requires_manual_fetching(&self) -> bool {
        self.failures.iter().any(FetchActionFailure::requires_manual_fetching)
    }

    #[must_use]
    pub fn has_integrity_failures(&self) -> bool {
        self.failures
            .iter()
            .any(|f| !f.failed_integrity_checks().is_empty())
    }
}
