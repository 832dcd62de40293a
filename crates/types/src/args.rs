//! Loosely typed construction arguments
//!
//! Values arriving from configuration files, the command line, or JSON
//! requests are converted to [`Arg`] before being handed to a constructor.
//! Every type check on an `Arg` reports [`ActionError::TypeMismatch`], and
//! every key-set check on a [`Mapping`] reports an invalid-argument error,
//! so callers see the same taxonomy whichever boundary the value crossed.

use crate::construct::{self, Class, Object};
use crate::{FetchActionFailure, FetchActionOptions};
use pact_errors::ActionError;
use std::collections::BTreeMap;

/// Named arguments
pub type Mapping = BTreeMap<String, Arg>;

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    List(Vec<Arg>),
    Map(Mapping),
    /// An already-constructed value, passed where a typed argument is expected
    Object(Object),
}

impl Arg {
    /// Name of the argument's runtime type, used in mismatch reports
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Bool(_) => "Bool",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Mapping",
            Self::Object(object) => object.class().name(),
        }
    }

    /// # Errors
    ///
    /// Returns `TypeMismatch` if the argument is not a boolean.
    pub fn as_bool(&self, context: &str) -> Result<bool, ActionError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(ActionError::type_mismatch(context, "Bool", other.type_name())),
        }
    }

    /// # Errors
    ///
    /// Returns `TypeMismatch` if the argument is not a string.
    pub fn as_str(&self, context: &str) -> Result<&str, ActionError> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(ActionError::type_mismatch(context, "String", other.type_name())),
        }
    }

    /// Convert a JSON value into an argument.
    ///
    /// A JSON object of the form `{"new": CLASS, "args": [...]}` is
    /// constructed in place and becomes an [`Arg::Object`]; any other
    /// object becomes a [`Arg::Map`]. Any other key alongside `new` is
    /// rejected as an unrecognized option.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested construction fails or carries stray keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ActionError> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => Self::Nil,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Object(mut map) => {
                if let Some(Value::String(class)) = map.get("new").cloned() {
                    let class: Class = class.parse()?;
                    map.remove("new");
                    let args = match map.remove("args") {
                        None => Vec::new(),
                        Some(Value::Array(items)) => items
                            .into_iter()
                            .map(Self::from_json)
                            .collect::<Result<Vec<_>, _>>()?,
                        Some(single) => vec![Self::from_json(single)?],
                    };
                    // Only `new` and `args` are meaningful in a construction request
                    if let Some(key) = map.keys().next() {
                        return Err(ActionError::UnrecognizedOption {
                            class: class.name().to_string(),
                            key: key.clone(),
                        });
                    }
                    return Ok(Self::Object(construct::construct(class, &args)?));
                }
                Self::Map(
                    map.into_iter()
                        .map(|(k, v)| Ok::<_, ActionError>((k, Self::from_json(v)?)))
                        .collect::<Result<Mapping, _>>()?,
                )
            }
        })
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Mapping> for Arg {
    fn from(map: Mapping) -> Self {
        Self::Map(map)
    }
}

impl From<Object> for Arg {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<FetchActionOptions> for Arg {
    fn from(options: FetchActionOptions) -> Self {
        Self::Object(Object::FetchActionOptions(options))
    }
}

impl From<FetchActionFailure> for Arg {
    fn from(failure: FetchActionFailure) -> Self {
        Self::Object(Object::FetchActionFailure(failure))
    }
}

/// Build a [`Mapping`] from `key => value` pairs
#[macro_export]
macro_rules! mapping {
    () => { $crate::Mapping::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Mapping::new();
        $( map.insert(::std::string::String::from($key), $crate::Arg::from($value)); )+
        map
    }};
}

/// Checked reads out of a [`Mapping`] on behalf of one class
pub(crate) struct MappingReader<'a> {
    class: &'static str,
    map: &'a Mapping,
}

impl<'a> MappingReader<'a> {
    /// Reject any key outside `allowed`
    pub(crate) fn new(
        class: &'static str,
        map: &'a Mapping,
        allowed: &[&str],
    ) -> Result<Self, ActionError> {
        if let Some(key) = map.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(ActionError::UnrecognizedOption {
                class: class.to_string(),
                key: key.clone(),
            });
        }
        Ok(Self { class, map })
    }

    fn context(&self, key: &str) -> String {
        format!("{}.{key}", self.class)
    }

    fn required(&self, key: &str) -> Result<&'a Arg, ActionError> {
        self.map.get(key).ok_or_else(|| ActionError::MissingField {
            class: self.class.to_string(),
            field: key.to_string(),
        })
    }

    pub(crate) fn optional_bool(&self, key: &str) -> Result<Option<bool>, ActionError> {
        self.map
            .get(key)
            .map(|v| v.as_bool(&self.context(key)))
            .transpose()
    }

    pub(crate) fn bool(&self, key: &str) -> Result<bool, ActionError> {
        self.required(key)?.as_bool(&self.context(key))
    }

    pub(crate) fn string(&self, key: &str) -> Result<String, ActionError> {
        self.required(key)?
            .as_str(&self.context(key))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_errors::ActionErrorKind;
    use serde_json::json;

    #[test]
    fn test_reader_rejects_unknown_keys() {
        let map = mapping! { "monkey" => false };
        let err = MappingReader::new("FetchActionOptions", &map, &["safe_resume"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ActionErrorKind::InvalidArgument);
    }

    #[test]
    fn test_reader_type_checks() {
        let map = mapping! { "flag" => "yes" };
        let reader = MappingReader::new("Thing", &map, &["flag"]).unwrap();
        let err = reader.bool("flag").unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::TypeMismatch);
        assert_eq!(reader.optional_bool("absent").unwrap(), None);
        assert!(matches!(
            reader.string("absent"),
            Err(ActionError::MissingField { .. })
        ));
    }

    #[test]
    fn test_from_json_scalars_and_maps() {
        let arg = Arg::from_json(json!({"safe_resume": true, "n": 3, "s": "x", "z": null}))
            .unwrap();
        let Arg::Map(map) = arg else {
            panic!("expected a mapping");
        };
        assert_eq!(map["safe_resume"], Arg::Bool(true));
        assert_eq!(map["n"], Arg::Integer(3));
        assert_eq!(map["s"], Arg::Str("x".into()));
        assert_eq!(map["z"], Arg::Nil);
    }

    #[test]
    fn test_from_json_nested_construction() {
        let arg = Arg::from_json(json!({"new": "FetchActionOptions", "args": [true, false]}))
            .unwrap();
        assert_eq!(arg.type_name(), "FetchActionOptions");

        let err = Arg::from_json(json!({"new": "Action"})).unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::ConstructionForbidden);
    }

    #[test]
    fn test_from_json_construction_rejects_stray_keys() {
        let err = Arg::from_json(json!({"new": "InfoAction", "argz": ["x"]})).unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::InvalidArgument);
        assert_eq!(
            err,
            ActionError::UnrecognizedOption {
                class: "InfoAction".into(),
                key: "argz".into(),
            }
        );

        let err = Arg::from_json(json!({"new": "FetchActionOptions", "arg": [true, false]}))
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::UnrecognizedOption { ref key, .. } if key == "arg"
        ));
    }
}
