//! The action hierarchy
//!
//! `Action` is the closed set of things a package ID can be asked to do.
//! There is no way to build an `Action` without first building one of the
//! concrete variants, so the abstract base can never exist on its own.

use crate::FetchActionOptions;
use pact_errors::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag identifying a concrete action variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fetch,
    Info,
    Config,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::Fetch, Self::Info, Self::Config];

    /// Short lowercase name used on the command line and in logs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Info => "info",
            Self::Config => "config",
        }
    }

    /// Name of the concrete action class this kind tags
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Fetch => "FetchAction",
            Self::Info => "InfoAction",
            Self::Config => "ConfigAction",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| s.eq_ignore_ascii_case(kind.as_str()) || s == kind.class_name())
            .ok_or_else(|| ActionError::UnknownClass {
                class: s.to_string(),
            })
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::FetchAction {}
    impl Sealed for super::InfoAction {}
    impl Sealed for super::ConfigAction {}
}

/// Capability shared by every concrete action.
///
/// Sealed: the set of actions is closed, and only the variants of [`Action`]
/// implement it.
pub trait ActionType: sealed::Sealed + Into<Action> + Clone + fmt::Debug + Send + Sync {
    const KIND: ActionKind;

    /// Borrow this variant back out of an [`Action`], if it is one
    fn from_action(action: &Action) -> Option<&Self>;
}

/// Fetch the distfiles a package needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAction {
    options: FetchActionOptions,
}

impl FetchAction {
    #[must_use]
    pub fn new(options: FetchActionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &FetchActionOptions {
        &self.options
    }
}

/// Display information about a package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoAction {
    #[serde(skip)]
    _private: (),
}

impl InfoAction {
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

/// Run post-install configuration for an installed package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigAction {
    #[serde(skip)]
    _private: (),
}

impl ConfigAction {
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl ActionType for FetchAction {
    const KIND: ActionKind = ActionKind::Fetch;

    fn from_action(action: &Action) -> Option<&Self> {
        match action {
            Action::Fetch(a) => Some(a),
            _ => None,
        }
    }
}

impl ActionType for InfoAction {
    const KIND: ActionKind = ActionKind::Info;

    fn from_action(action: &Action) -> Option<&Self> {
        match action {
            Action::Info(a) => Some(a),
            _ => None,
        }
    }
}

impl ActionType for ConfigAction {
    const KIND: ActionKind = ActionKind::Config;

    fn from_action(action: &Action) -> Option<&Self> {
        match action {
            Action::Config(a) => Some(a),
            _ => None,
        }
    }
}

/// Any action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Fetch(FetchAction),
    Info(InfoAction),
    Config(ConfigAction),
}

impl Action {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Fetch(_) => ActionKind::Fetch,
            Self::Info(_) => ActionKind::Info,
            Self::Config(_) => ActionKind::Config,
        }
    }

    /// Whether this action is the concrete variant `A`
    #[must_use]
    pub fn is<A: ActionType>(&self) -> bool {
        self.kind() == A::KIND
    }

    #[must_use]
    pub fn downcast_ref<A: ActionType>(&self) -> Option<&A> {
        A::from_action(self)
    }

    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: ActionVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Fetch(a) => visitor.visit_fetch(a),
            Self::Info(a) => visitor.visit_info(a),
            Self::Config(a) => visitor.visit_config(a),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(a) => write!(
                f,
                "fetch (safe_resume={}, fetch_unneeded={})",
                a.options().safe_resume(),
                a.options().fetch_unneeded()
            ),
            Self::Info(_) => f.write_str("info"),
            Self::Config(_) => f.write_str("config"),
        }
    }
}

impl From<FetchAction> for Action {
    fn from(action: FetchAction) -> Self {
        Self::Fetch(action)
    }
}

impl From<InfoAction> for Action {
    fn from(action: InfoAction) -> Self {
        Self::Info(action)
    }
}

impl From<ConfigAction> for Action {
    fn from(action: ConfigAction) -> Self {
        Self::Config(action)
    }
}

/// Per-variant dispatch over an [`Action`]
pub trait ActionVisitor {
    type Output;

    fn visit_fetch(&mut self, action: &FetchAction) -> Self::Output;
    fn visit_info(&mut self, action: &InfoAction) -> Self::Output;
    fn visit_config(&mut self, action: &ConfigAction) -> Self::Output;
}
