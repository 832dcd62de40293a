//! Construction by class name
//!
//! The typed constructors (`FetchActionOptions::new`, `InfoAction::new`, ...)
//! cannot be called with the wrong arguments. This module is the boundary
//! for callers that only have a class name and a list of [`Arg`]s, such as
//! the command line. It reproduces the positional/named dual forms and
//! reports failures using [`ActionErrorKind`](pact_errors::ActionErrorKind).

use crate::{
    Action, ActionKind, AnySupportsActionTest, Arg, ConfigAction, FetchAction,
    FetchActionFailure, FetchActionOptions, InfoAction,
};
use pact_errors::ActionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Every class the construction boundary knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Action,
    FetchAction,
    InfoAction,
    ConfigAction,
    FetchActionOptions,
    FetchActionFailure,
    SupportsActionTestBase,
    SupportsFetchActionTest,
    SupportsInfoActionTest,
    SupportsConfigActionTest,
}

impl Class {
    pub const ALL: [Class; 10] = [
        Self::Action,
        Self::FetchAction,
        Self::InfoAction,
        Self::ConfigAction,
        Self::FetchActionOptions,
        Self::FetchActionFailure,
        Self::SupportsActionTestBase,
        Self::SupportsFetchActionTest,
        Self::SupportsInfoActionTest,
        Self::SupportsConfigActionTest,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::FetchAction => "FetchAction",
            Self::InfoAction => "InfoAction",
            Self::ConfigAction => "ConfigAction",
            Self::FetchActionOptions => "FetchActionOptions",
            Self::FetchActionFailure => "FetchActionFailure",
            Self::SupportsActionTestBase => "SupportsActionTestBase",
            Self::SupportsFetchActionTest => "SupportsFetchActionTest",
            Self::SupportsInfoActionTest => "SupportsInfoActionTest",
            Self::SupportsConfigActionTest => "SupportsConfigActionTest",
        }
    }

    /// Abstract classes exist only as supertypes and refuse construction
    #[must_use]
    pub fn is_abstract(self) -> bool {
        matches!(self, Self::Action | Self::SupportsActionTestBase)
    }

    #[must_use]
    pub fn superclass(self) -> Option<Class> {
        match self {
            Self::FetchAction | Self::InfoAction | Self::ConfigAction => Some(Self::Action),
            Self::SupportsFetchActionTest
            | Self::SupportsInfoActionTest
            | Self::SupportsConfigActionTest => Some(Self::SupportsActionTestBase),
            _ => None,
        }
    }

    /// `self` is `other` or inherits from it
    #[must_use]
    pub fn is_subclass_of(self, other: Class) -> bool {
        self == other || self.superclass() == Some(other)
    }

    fn for_action(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Fetch => Self::FetchAction,
            ActionKind::Info => Self::InfoAction,
            ActionKind::Config => Self::ConfigAction,
        }
    }

    fn for_supports_test(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Fetch => Self::SupportsFetchActionTest,
            ActionKind::Info => Self::SupportsInfoActionTest,
            ActionKind::Config => Self::SupportsConfigActionTest,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Class {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| ActionError::UnknownClass {
                class: s.to_string(),
            })
    }
}

/// A value produced by [`construct`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "class", content = "value")]
pub enum Object {
    Action(Action),
    FetchActionOptions(FetchActionOptions),
    FetchActionFailure(FetchActionFailure),
    SupportsActionTest(AnySupportsActionTest),
}

impl Object {
    /// The most derived class of this value
    #[must_use]
    pub fn class(&self) -> Class {
        match self {
            Self::Action(action) => Class::for_action(action.kind()),
            Self::FetchActionOptions(_) => Class::FetchActionOptions,
            Self::FetchActionFailure(_) => Class::FetchActionFailure,
            Self::SupportsActionTest(test) => {
                Class::for_supports_test(crate::SupportsActionTestBase::action_kind(test))
            }
        }
    }

    /// Kind-of check against any class in the hierarchy
    #[must_use]
    pub fn is_a(&self, class: Class) -> bool {
        self.class().is_subclass_of(class)
    }

    #[must_use]
    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Self::Action(action) => Some(action),
            _ => None,
        }
    }
}

impl From<Action> for Object {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

impl From<FetchActionOptions> for Object {
    fn from(options: FetchActionOptions) -> Self {
        Self::FetchActionOptions(options)
    }
}

impl From<FetchActionFailure> for Object {
    fn from(failure: FetchActionFailure) -> Self {
        Self::FetchActionFailure(failure)
    }
}

impl From<AnySupportsActionTest> for Object {
    fn from(test: AnySupportsActionTest) -> Self {
        Self::SupportsActionTest(test)
    }
}

/// Construct an instance of `class` from loosely typed arguments.
///
/// # Errors
///
/// - `ConstructionForbidden` if `class` is abstract, whatever the arguments.
/// - `TypeMismatch` if an argument has the wrong type.
/// - An invalid-argument error for wrong arity or bad mapping keys.
pub fn construct(class: Class, args: &[Arg]) -> Result<Object, ActionError> {
    let result: Result<Object, ActionError> = match class {
        Class::Action | Class::SupportsActionTestBase => Err(ActionError::forbidden(class.name())),
        Class::FetchAction => fetch_action(args).map(|a| Action::from(a).into()),
        Class::InfoAction => {
            no_args(class, args).map(|()| Action::from(InfoAction::new()).into())
        }
        Class::ConfigAction => {
            no_args(class, args).map(|()| Action::from(ConfigAction::new()).into())
        }
        Class::FetchActionOptions => fetch_action_options(args).map(Object::from),
        Class::FetchActionFailure => fetch_action_failure(args).map(Object::from),
        Class::SupportsFetchActionTest => no_args(class, args)
            .map(|()| AnySupportsActionTest::from(ActionKind::Fetch).into()),
        Class::SupportsInfoActionTest => {
            no_args(class, args).map(|()| AnySupportsActionTest::from(ActionKind::Info).into())
        }
        Class::SupportsConfigActionTest => no_args(class, args)
            .map(|()| AnySupportsActionTest::from(ActionKind::Config).into()),
    };

    match &result {
        Ok(_) => debug!(class = class.name(), args = args.len(), "constructed"),
        Err(err) => warn!(class = class.name(), kind = %err.kind(), error = %err, "construction rejected"),
    }
    result
}

fn no_args(class: Class, args: &[Arg]) -> Result<(), ActionError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ActionError::WrongArity {
            class: class.name().to_string(),
            given: args.len(),
            expected: "0".to_string(),
        })
    }
}

fn fetch_action(args: &[Arg]) -> Result<FetchAction, ActionError> {
    match args {
        [Arg::Object(Object::FetchActionOptions(options))] => Ok(FetchAction::new(*options)),
        [other] => Err(ActionError::type_mismatch(
            "FetchAction",
            FetchActionOptions::CLASS,
            other.type_name(),
        )),
        _ => Err(ActionError::WrongArity {
            class: "FetchAction".to_string(),
            given: args.len(),
            expected: "1".to_string(),
        }),
    }
}

fn fetch_action_options(args: &[Arg]) -> Result<FetchActionOptions, ActionError> {
    let context = FetchActionOptions::CLASS;
    match args {
        [Arg::Map(map)] => FetchActionOptions::from_mapping(map),
        [other] => Err(ActionError::type_mismatch(
            context,
            "Mapping or 2 positional arguments",
            other.type_name(),
        )),
        [safe_resume, fetch_unneeded] => Ok(FetchActionOptions::new(
            safe_resume.as_bool(&format!("{context}.safe_resume"))?,
            fetch_unneeded.as_bool(&format!("{context}.fetch_unneeded"))?,
        )),
        _ => Err(ActionError::WrongArity {
            class: context.to_string(),
            given: args.len(),
            expected: "1 or 2".to_string(),
        }),
    }
}

fn fetch_action_failure(args: &[Arg]) -> Result<FetchActionFailure, ActionError> {
    let context = FetchActionFailure::CLASS;
    match args {
        [Arg::Map(map)] => FetchActionFailure::from_mapping(map),
        [other] => Err(ActionError::type_mismatch(
            context,
            "Mapping or 4 positional arguments",
            other.type_name(),
        )),
        [target_file, requires_manual, failed_automatic, failed_integrity] => {
            Ok(FetchActionFailure::new(
                target_file.as_str(&format!("{context}.target_file"))?,
                requires_manual.as_bool(&format!("{context}.requires_manual_fetching"))?,
                failed_automatic.as_bool(&format!("{context}.failed_automatic_fetching"))?,
                failed_integrity.as_str(&format!("{context}.failed_integrity_checks"))?,
            ))
        }
        _ => Err(ActionError::WrongArity {
            class: context.to_string(),
            given: args.len(),
            expected: "1 or 4".to_string(),
        }),
    }
}
