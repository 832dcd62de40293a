#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Repositories as seen by action dispatch
//!
//! A repository can answer whether any of its package IDs might support a
//! given action without enumerating them. Source repositories hold things
//! that can be fetched; installed repositories hold things that can be
//! configured. Both can report info.

use pact_config::{Repositories, RepositoryFormat};
use pact_errors::{Error, RepositoryError};
use pact_types::{ActionKind, SupportsActionTestBase};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub trait Repository: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn format(&self) -> RepositoryFormat;

    /// Whether any ID in this repository might support the probed action.
    ///
    /// A `false` answer is definitive; `true` only means individual IDs are
    /// worth asking.
    fn some_ids_might_support_action(&self, test: &dyn SupportsActionTestBase) -> bool;
}

/// Repository of installable packages
#[derive(Debug, Clone)]
pub struct SourceRepository {
    name: String,
    location: Option<PathBuf>,
}

impl SourceRepository {
    pub fn new(name: impl Into<String>, location: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

impl Repository for SourceRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self) -> RepositoryFormat {
        RepositoryFormat::Source
    }

    fn some_ids_might_support_action(&self, test: &dyn SupportsActionTestBase) -> bool {
        match test.action_kind() {
            ActionKind::Fetch | ActionKind::Info => true,
            ActionKind::Config => false,
        }
    }
}

/// Repository of packages merged to the live filesystem
#[derive(Debug, Clone)]
pub struct InstalledRepository {
    name: String,
    location: Option<PathBuf>,
}

impl InstalledRepository {
    pub fn new(name: impl Into<String>, location: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

impl Repository for InstalledRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self) -> RepositoryFormat {
        RepositoryFormat::Installed
    }

    fn some_ids_might_support_action(&self, test: &dyn SupportsActionTestBase) -> bool {
        match test.action_kind() {
            ActionKind::Info | ActionKind::Config => true,
            ActionKind::Fetch => false,
        }
    }
}

/// All configured repositories, in name order
#[derive(Debug, Clone, Default)]
pub struct RepositorySet {
    repositories: Vec<Arc<dyn Repository>>,
}

impl RepositorySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &Repositories) -> Self {
        let mut set = Self::new();
        for (name, repo) in config {
            let repository: Arc<dyn Repository> = match repo.format {
                RepositoryFormat::Source => {
                    Arc::new(SourceRepository::new(name.clone(), repo.location.clone()))
                }
                RepositoryFormat::Installed => {
                    Arc::new(InstalledRepository::new(name.clone(), repo.location.clone()))
                }
            };
            debug!(name = %name, format = ?repo.format, "registered repository");
            set.add(repository);
        }
        set
    }

    pub fn add(&mut self, repository: Arc<dyn Repository>) {
        self.repositories.push(repository);
    }

    /// Look up a repository by name
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no repository has that name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Repository>, Error> {
        self.repositories
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| {
                RepositoryError::NotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Repository>> {
        self.repositories.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Names of repositories whose IDs might support the probed action
    #[must_use]
    pub fn might_support(&self, test: &dyn SupportsActionTestBase) -> Vec<&str> {
        self.repositories
            .iter()
            .filter(|r| r.some_ids_might_support_action(test))
            .map(|r| r.name())
            .collect()
    }
}
