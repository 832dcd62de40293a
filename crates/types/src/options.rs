//! Options controlling a fetch

use crate::args::{Mapping, MappingReader};
use pact_errors::ActionError;
use serde::{Deserialize, Serialize};

/// Flags passed to a [`FetchAction`](crate::FetchAction)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchActionOptions {
    safe_resume: bool,
    fetch_unneeded: bool,
}

impl FetchActionOptions {
    pub const CLASS: &'static str = "FetchActionOptions";
    pub const KEYS: [&'static str; 2] = ["safe_resume", "fetch_unneeded"];

    /// Positional form: `(safe_resume, fetch_unneeded)`
    #[must_use]
    pub fn new(safe_resume: bool, fetch_unneeded: bool) -> Self {
        Self {
            safe_resume,
            fetch_unneeded,
        }
    }

    /// Named form. Absent keys default to `false`.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedOption` for any key other than `safe_resume` or
    /// `fetch_unneeded`, and `TypeMismatch` for a non-boolean value.
    pub fn from_mapping(map: &Mapping) -> Result<Self, ActionError> {
        let reader = MappingReader::new(Self::CLASS, map, &Self::KEYS)?;
        Ok(Self {
            safe_resume: reader.optional_bool("safe_resume")?.unwrap_or(false),
            fetch_unneeded: reader.optional_bool("fetch_unneeded")?.unwrap_or(false),
        })
    }

    /// Resume partially downloaded files instead of starting over
    #[must_use]
    pub fn safe_resume(&self) -> bool {
        self.safe_resume
    }

    /// Fetch distfiles even for packages that would not otherwise need them
    #[must_use]
    pub fn fetch_unneeded(&self) -> bool {
        self.fetch_unneeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;
    use pact_errors::ActionErrorKind;

    #[test]
    fn test_positional_and_named_agree() {
        let positional = FetchActionOptions::new(false, true);
        let named = FetchActionOptions::from_mapping(&mapping! {
            "safe_resume" => false,
            "fetch_unneeded" => true,
        })
        .unwrap();

        assert_eq!(positional, named);
        assert!(!named.safe_resume());
        assert!(named.fetch_unneeded());
    }

    #[test]
    fn test_named_defaults() {
        let options = FetchActionOptions::from_mapping(&mapping! { "safe_resume" => true }).unwrap();
        assert!(options.safe_resume());
        assert!(!options.fetch_unneeded());

        let empty = FetchActionOptions::from_mapping(&Mapping::new()).unwrap();
        assert_eq!(empty, FetchActionOptions::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FetchActionOptions::from_mapping(&mapping! { "monkey" => false }).unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::InvalidArgument);
        assert!(err.to_string().contains("monkey"));
    }

    #[test]
    fn test_non_bool_rejected() {
        let err =
            FetchActionOptions::from_mapping(&mapping! { "safe_resume" => "yes" }).unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::TypeMismatch);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<FetchActionOptions>(r#"{"monkey":false}"#).is_err());
        let options: FetchActionOptions =
            serde_json::from_str(r#"{"fetch_unneeded":true}"#).unwrap();
        assert_eq!(options, FetchActionOptions::new(false, true));
    }
}
