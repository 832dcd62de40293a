//! Capability probes for asking whether something might support an action

use crate::{ActionKind, ActionType, ConfigAction, FetchAction, InfoAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Common interface of every supports-action probe.
///
/// Repositories and package IDs receive probes as `&dyn
/// SupportsActionTestBase` and answer based on [`action_kind`].
///
/// [`action_kind`]: SupportsActionTestBase::action_kind
pub trait SupportsActionTestBase: fmt::Debug + Send + Sync {
    fn action_kind(&self) -> ActionKind;
}

/// Probe for action type `A`
pub struct SupportsActionTest<A: ActionType> {
    _action: PhantomData<fn() -> A>,
}

impl<A: ActionType> SupportsActionTest<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _action: PhantomData,
        }
    }
}

impl<A: ActionType> Default for SupportsActionTest<A> {
    fn default() -> Self {
        Self::new()
    }
}

// A derive would require `A: Clone`
#[allow(clippy::expl_impl_clone_on_copy)]
impl<A: ActionType> Clone for SupportsActionTest<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ActionType> Copy for SupportsActionTest<A> {}

impl<A: ActionType> PartialEq for SupportsActionTest<A> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<A: ActionType> Eq for SupportsActionTest<A> {}

impl<A: ActionType> fmt::Debug for SupportsActionTest<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SupportsActionTest<{}>", A::KIND.class_name())
    }
}

impl<A: ActionType> SupportsActionTestBase for SupportsActionTest<A> {
    fn action_kind(&self) -> ActionKind {
        A::KIND
    }
}

pub type SupportsFetchActionTest = SupportsActionTest<FetchAction>;
pub type SupportsInfoActionTest = SupportsActionTest<InfoAction>;
pub type SupportsConfigActionTest = SupportsActionTest<ConfigAction>;

/// A probe whose action type is only known at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ActionKind", from = "ActionKind")]
pub enum AnySupportsActionTest {
    Fetch(SupportsFetchActionTest),
    Info(SupportsInfoActionTest),
    Config(SupportsConfigActionTest),
}

impl From<ActionKind> for AnySupportsActionTest {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Fetch => Self::Fetch(SupportsActionTest::new()),
            ActionKind::Info => Self::Info(SupportsActionTest::new()),
            ActionKind::Config => Self::Config(SupportsActionTest::new()),
        }
    }
}

impl From<AnySupportsActionTest> for ActionKind {
    fn from(test: AnySupportsActionTest) -> Self {
        test.action_kind()
    }
}

impl SupportsActionTestBase for AnySupportsActionTest {
    fn action_kind(&self) -> ActionKind {
        match self {
            Self::Fetch(t) => t.action_kind(),
            Self::Info(t) => t.action_kind(),
            Self::Config(t) => t.action_kind(),
        }
    }
}
