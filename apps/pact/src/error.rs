//! CLI error handling

use std::fmt;

use pact_errors::{ActionErrorKind, UserFacingError};
use serde::Serialize;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Error from one of the library crates
    Pact(pact_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

/// Structured error body printed on stdout in `--json` mode
#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ActionErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a pact_errors::Error>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
enum ErrorOutput<'a> {
    Error(ErrorReport<'a>),
}

impl CliError {
    /// Render the error with the same envelope as successful JSON output
    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = match self {
            CliError::Pact(e) => ErrorReport {
                message: e.user_message().into_owned(),
                kind: e.action_kind(),
                code: e.user_code(),
                hint: e.user_hint(),
                error: Some(e),
            },
            CliError::Io(e) => ErrorReport {
                message: e.to_string(),
                kind: None,
                code: Some("error.io"),
                hint: None,
                error: None,
            },
        };
        serde_json::to_string_pretty(&ErrorOutput::Error(report))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Pact(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(kind) = e.action_kind() {
                    write!(f, "\n  Kind: {kind}")?;
                }
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Pact(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<pact_errors::Error> for CliError {
    fn from(e: pact_errors::Error) -> Self {
        CliError::Pact(e)
    }
}

impl From<pact_errors::ActionError> for CliError {
    fn from(e: pact_errors::ActionError) -> Self {
        CliError::Pact(e.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_errors::ActionError;

    #[test]
    fn test_json_report_carries_kind_and_code() {
        let err = CliError::from(ActionError::forbidden("Action"));
        let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["data"]["kind"], "construction_forbidden");
        assert_eq!(json["data"]["code"], "action.construction_forbidden");
        assert_eq!(
            json["data"]["error"]["Action"]["ConstructionForbidden"]["class"],
            "Action"
        );
    }

    #[test]
    fn test_io_report_has_no_kind() {
        let err = CliError::from(std::io::Error::other("broken pipe"));
        let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();
        assert_eq!(json["data"]["message"], "broken pipe");
        assert!(json["data"].get("kind").is_none());
    }
}
