//! Incremental construction of a [`GraphModel`] from decoded records.

use std::collections::BTreeMap;

use jdx_data::{Record, RecordCounts};

use super::GraphModel;
use crate::domain::{ClassKey, Cycle, Edge, Metadata, PackageId};
use crate::error::{Error, Result};

/// Default data file suffix stripped from the file name to form the basename.
pub const DEFAULT_DATA_SUFFIX: &str = ".data";

/// Accumulates records into a model, validating references as it goes.
///
/// Packages and classes must be declared before any edge or cycle refers to
/// them; indices are never renumbered.
#[derive(Debug)]
pub struct ModelBuilder {
    data_suffix: String,
    comments: Vec<String>,
    packages: Vec<String>,
    classes: Vec<Vec<String>>,
    dependencies: Vec<Edge>,
    edges_by_source: BTreeMap<ClassKey, Vec<ClassKey>>,
    cycles: Vec<Cycle>,
    counts: RecordCounts,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_suffix: DEFAULT_DATA_SUFFIX.to_string(),
            comments: Vec::new(),
            packages: Vec::new(),
            classes: Vec::new(),
            dependencies: Vec::new(),
            edges_by_source: BTreeMap::new(),
            cycles: Vec::new(),
            counts: RecordCounts::default(),
        }
    }

    /// Use a different suffix when deriving the basename from the file name.
    #[must_use]
    pub fn with_data_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.data_suffix = suffix.into();
        self
    }

    /// Record tallies so far.
    #[must_use]
    pub fn counts(&self) -> RecordCounts {
        self.counts
    }

    /// Add one record read from `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when a class is declared before any package,
    /// or an edge or cycle refers to a package or class not yet declared.
    pub fn push(&mut self, line: usize, record: Record) -> Result<()> {
        match &record {
            Record::Comment(text) => self.comments.push(text.clone()),
            Record::Package(name) => {
                self.packages.push(name.clone());
                self.classes.push(Vec::new());
            }
            Record::Source(name) => {
                let Some(classes) = self.classes.last_mut() else {
                    return Err(Error::format(
                        line,
                        format!("class '{name}' declared before any package"),
                    ));
                };
                classes.push(name.clone());
            }
            Record::Dependency { source, target } => {
                let edge = Edge {
                    source: (*source).into(),
                    target: (*target).into(),
                };
                self.check_class(line, edge.source)?;
                self.check_class(line, edge.target)?;
                self.edges_by_source
                    .entry(edge.source)
                    .or_default()
                    .push(edge.target);
                self.dependencies.push(edge);
            }
            Record::Cycle(raw) => {
                let packages = raw
                    .iter()
                    .map(|&p| self.check_package(line, PackageId(p)))
                    .collect::<Result<Vec<_>>>()?;
                self.cycles.push(Cycle::new(packages));
            }
        }
        self.counts.record(&record);
        Ok(())
    }

    fn check_package(&self, line: usize, package: PackageId) -> Result<PackageId> {
        if package.index() < self.packages.len() {
            Ok(package)
        } else {
            Err(Error::format(
                line,
                format!(
                    "package {package} is not declared ({} packages so far)",
                    self.packages.len()
                ),
            ))
        }
    }

    fn check_class(&self, line: usize, key: ClassKey) -> Result<()> {
        let package = self.check_package(line, key.package)?;
        let declared = self.classes[package.index()].len();
        if key.class_index() < declared {
            Ok(())
        } else {
            Err(Error::format(
                line,
                format!(
                    "class {key} is not declared (package {} has {declared} classes)",
                    self.packages[package.index()]
                ),
            ))
        }
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> GraphModel {
        let n_classes = self.classes.iter().map(Vec::len).sum::<usize>();
        debug_assert_eq!(self.counts.packages, self.packages.len());
        debug_assert_eq!(self.counts.sources, n_classes);
        debug_assert_eq!(self.counts.dependencies, self.dependencies.len());
        debug_assert_eq!(self.counts.cycles, self.cycles.len());

        let metadata = Metadata::from_comments(&self.comments, &self.data_suffix);
        tracing::debug!(
            packages = self.packages.len(),
            classes = n_classes,
            dependencies = self.dependencies.len(),
            cycles = self.cycles.len(),
            "built dependency model"
        );

        GraphModel {
            metadata,
            comments: self.comments,
            packages: self.packages,
            classes: self.classes,
            dependencies: self.dependencies,
            edges_by_source: self.edges_by_source,
            cycles: self.cycles,
            counts: self.counts,
        }
    }
}
