//! Navigation state machine over a decoded model.
//!
//! ```text
//! Idle ──select_package──▶ PackageSelected ──select_class──▶ PackageAndClassSelected
//!  ▲                          │    ▲                              │
//!  └─────deselect_package─────┘    └────────deselect_class────────┘
//! ```
//!
//! `navigate_to_import` jumps to any class from any state. Every transition
//! validates its arguments first; a failed transition leaves the state as it
//! was.

use std::fmt;

use serde::Serialize;

use crate::analytics::{Analytics, PackageDetail};
use crate::domain::{ClassKey, PackageId};
use crate::error::{Error, Result};
use crate::model::GraphModel;

/// Current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A package is selected, no class.
    PackageSelected(PackageId),
    /// A class (and so its package) is selected.
    PackageAndClassSelected(ClassKey),
}

impl NavState {
    /// The selected package, if any.
    #[must_use]
    pub fn package(self) -> Option<PackageId> {
        match self {
            Self::Idle => None,
            Self::PackageSelected(p) => Some(p),
            Self::PackageAndClassSelected(key) => Some(key.package),
        }
    }

    /// The selected class, if any.
    #[must_use]
    pub fn class(self) -> Option<ClassKey> {
        match self {
            Self::PackageAndClassSelected(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "nothing is selected"),
            Self::PackageSelected(p) => write!(f, "package {p} is selected"),
            Self::PackageAndClassSelected(key) => write!(f, "class {key} is selected"),
        }
    }
}

/// One row of the class list panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    /// The class.
    pub key: ClassKey,
    /// Simple name.
    pub name: String,
    /// `pkg.Class (imports)`.
    pub label: String,
    /// Whether any direct import lands in a cyclic package.
    pub in_cycle: bool,
}

/// One row of the import list panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    /// The imported class.
    pub key: ClassKey,
    /// `pkg.Class`.
    pub qualified_name: String,
    /// Whether the imported class's package belongs to a cycle.
    pub in_cycle: bool,
}

/// Drives selection over a model. Borrows the model and analytics; owns only
/// the selection.
#[derive(Debug)]
pub struct Navigator<'a> {
    model: &'a GraphModel,
    analytics: &'a Analytics,
    state: NavState,
}

impl<'a> Navigator<'a> {
    /// Start idle.
    #[must_use]
    pub fn new(model: &'a GraphModel, analytics: &'a Analytics) -> Self {
        Self {
            model,
            analytics,
            state: NavState::Idle,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// The model being navigated.
    #[must_use]
    pub fn model(&self) -> &'a GraphModel {
        self.model
    }

    /// The analytics of the model.
    #[must_use]
    pub fn analytics(&self) -> &'a Analytics {
        self.analytics
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }

    /// Select `package`, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if `package` is out of range.
    pub fn select_package(&mut self, package: PackageId) -> Result<()> {
        let model = self.model;
        let name = model.package_name(package)?;
        if self.state.package().is_some() {
            self.clear();
        }
        self.state = NavState::PackageSelected(package);
        tracing::debug!(%package, name, "package selected");
        Ok(())
    }

    /// Clear the selection.
    ///
    /// # Errors
    ///
    /// Returns an invalid transition error if no package is selected.
    pub fn deselect_package(&mut self) -> Result<()> {
        if self.state.package().is_none() {
            return Err(self.invalid("deselect package"));
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        if let NavState::PackageAndClassSelected(key) = self.state {
            self.state = NavState::PackageSelected(key.package);
            tracing::debug!(class = %key, "class deselected");
        }
        if let NavState::PackageSelected(package) = self.state {
            self.state = NavState::Idle;
            tracing::debug!(%package, "package deselected");
        }
    }

    /// Select class `class` of `package`, which must be the selected package.
    ///
    /// # Errors
    ///
    /// Returns an invalid transition error if `package` is not selected, or a
    /// lookup error if the class is out of range.
    pub fn select_class(&mut self, package: PackageId, class: u32) -> Result<()> {
        if self.state.package() != Some(package) {
            return Err(self.invalid("select class"));
        }
        let key = self.model.check_class(ClassKey::in_package(package, class))?;
        if let Some(previous) = self.state.class() {
            tracing::debug!(class = %previous, "class deselected");
        }
        self.state = NavState::PackageAndClassSelected(key);
        tracing::debug!(class = %key, "class selected");
        Ok(())
    }

    /// Drop the class selection, keeping its package.
    ///
    /// # Errors
    ///
    /// Returns an invalid transition error if no class is selected.
    pub fn deselect_class(&mut self) -> Result<()> {
        let Some(key) = self.state.class() else {
            return Err(self.invalid("deselect class"));
        };
        self.state = NavState::PackageSelected(key.package);
        tracing::debug!(class = %key, "class deselected");
        Ok(())
    }

    /// Jump to an imported class: its package and the class get selected.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if `target` is out of range.
    pub fn navigate_to_import(&mut self, target: ClassKey) -> Result<()> {
        self.model.check_class(target)?;
        tracing::debug!(%target, "following import");
        self.select_package(target.package)?;
        self.select_class(target.package, target.class)
    }

    /// Follow a cycle step from the selected package to `next`.
    ///
    /// # Errors
    ///
    /// Returns an invalid transition error if no package is selected, or a
    /// lookup error if `next` is not one of its next hops.
    pub fn navigate_to_next_hop(&mut self, next: PackageId) -> Result<()> {
        let Some(current) = self.state.package() else {
            return Err(self.invalid("follow a cycle step"));
        };
        if !self.analytics.next_hops(current).contains(&next) {
            return Err(Error::lookup(format!(
                "package {next} is not a next hop of package {current}"
            )));
        }
        tracing::debug!(from = %current, to = %next, "following cycle step");
        self.select_package(next)
    }

    /// Classes of the selected package; empty when idle.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the model and selection disagree.
    pub fn class_list(&self) -> Result<Vec<ClassEntry>> {
        let Some(package) = self.state.package() else {
            return Ok(Vec::new());
        };
        self.model
            .class_keys(package)?
            .map(|key| {
                Ok(ClassEntry {
                    key,
                    name: self.model.class_name(key)?.to_string(),
                    label: self.model.class_label(key)?,
                    in_cycle: self.analytics.class_in_cycle(self.model, key)?,
                })
            })
            .collect()
    }

    /// Imports of the selected class in input order, duplicates kept; empty
    /// when no class is selected.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the model and selection disagree.
    pub fn import_list(&self) -> Result<Vec<ImportEntry>> {
        let Some(key) = self.state.class() else {
            return Ok(Vec::new());
        };
        self.model
            .imports(key)?
            .iter()
            .map(|&target| {
                Ok(ImportEntry {
                    key: target,
                    qualified_name: self.model.qualified_name(target)?,
                    in_cycle: self.analytics.in_cycle(target.package),
                })
            })
            .collect()
    }

    /// Detail panel of the selected package, if any.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the model and selection disagree.
    pub fn detail(&self) -> Result<Option<PackageDetail>> {
        self.state
            .package()
            .map(|p| self.analytics.detail(self.model, p))
            .transpose()
    }
}
