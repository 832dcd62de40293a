#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Action value types for the pact package manager
//!
//! This crate provides the closed [`Action`] hierarchy (fetch, info,
//! config), the records those actions carry or report
//! ([`FetchActionOptions`], [`FetchActionFailure`]), the supports-action
//! probes that repositories answer, and a by-name construction boundary
//! for loosely typed callers.
//!
//! Everything here is immutable once built and therefore `Send + Sync`.

pub mod action;
pub mod args;
pub mod construct;
pub mod failure;
pub mod options;
pub mod supports;

// Re-export commonly used types
pub use action::{Action, ActionKind, ActionType, ActionVisitor, ConfigAction, FetchAction, InfoAction};
pub use args::{Arg, Mapping};
pub use construct::{construct, Class, Object};
pub use failure::{FetchActionError, FetchActionFailure};
pub use options::FetchActionOptions;
pub use supports::{
    AnySupportsActionTest, SupportsActionTest, SupportsActionTestBase, SupportsConfigActionTest,
    SupportsFetchActionTest, SupportsInfoActionTest,
};

use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}
