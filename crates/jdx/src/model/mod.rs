//! The decoded dependency graph.
//!
//! [`GraphModel`] is built once from a data file and is read-only afterwards.
//! Decoding is a pure function of declaration order: identical input always
//! yields identical indices.

mod builder;

pub use builder::{DEFAULT_DATA_SUFFIX, ModelBuilder};

use std::collections::BTreeMap;

use jdx_data::{Record, RecordCounts, RecordReader};
use tokio::io::AsyncRead;

use crate::domain::{ClassKey, Cycle, Edge, Metadata, PackageId};
use crate::error::{Error, Result};

/// Packages, per-package classes, dependency edges and cycles of one project.
#[derive(Debug, Clone)]
pub struct GraphModel {
    metadata: Metadata,
    comments: Vec<String>,
    packages: Vec<String>,
    classes: Vec<Vec<String>>,
    dependencies: Vec<Edge>,
    edges_by_source: BTreeMap<ClassKey, Vec<ClassKey>>,
    cycles: Vec<Cycle>,
    counts: RecordCounts,
}

impl GraphModel {
    /// Decode a data file held in memory.
    ///
    /// # Errors
    ///
    /// Returns a format error for the first malformed or inconsistent line.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(ModelBuilder::new(), text)
    }

    /// Decode with a preconfigured builder.
    ///
    /// # Errors
    ///
    /// Returns a format error for the first malformed or inconsistent line.
    pub fn parse_with(mut builder: ModelBuilder, text: &str) -> Result<Self> {
        for (i, line) in text.lines().enumerate() {
            if let Some(record) = jdx_data::parse_line(i + 1, line)? {
                builder.push(i + 1, record)?;
            }
        }
        Ok(builder.build())
    }

    /// Build from records already decoded. Errors refer to record positions.
    ///
    /// # Errors
    ///
    /// Returns a format error for the first inconsistent record.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let mut builder = ModelBuilder::new();
        for (i, record) in records.into_iter().enumerate() {
            builder.push(i + 1, record)?;
        }
        Ok(builder.build())
    }

    /// Decode from an async reader, line by line.
    ///
    /// # Errors
    ///
    /// Returns an IO error or a format error for the first bad line.
    pub async fn read<R: AsyncRead + Unpin>(builder: ModelBuilder, reader: R) -> Result<Self> {
        let mut builder = builder;
        let mut reader = RecordReader::new(reader);
        while let Some(record) = reader.next_record().await? {
            builder.push(reader.line_number(), record)?;
        }
        Ok(builder.build())
    }

    /// Metadata from the leading comments.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// All comments in file order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Record tallies accumulated while decoding.
    #[must_use]
    pub fn counts(&self) -> RecordCounts {
        self.counts
    }

    /// Package names; the position is the [`PackageId`].
    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Class names per package, in package order.
    #[must_use]
    pub fn classes_by_package(&self) -> &[Vec<String>] {
        &self.classes
    }

    /// Number of packages.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of classes across all packages.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    /// All package ids in order.
    pub fn package_ids(&self) -> impl Iterator<Item = PackageId> + use<> {
        let n = u32::try_from(self.packages.len()).unwrap_or(u32::MAX);
        (0..n).map(PackageId)
    }

    /// Dependency edges in input order.
    #[must_use]
    pub fn dependencies(&self) -> &[Edge] {
        &self.dependencies
    }

    /// Import lists keyed by importing class.
    #[must_use]
    pub fn edges_by_source(&self) -> &BTreeMap<ClassKey, Vec<ClassKey>> {
        &self.edges_by_source
    }

    /// Cycles in input order.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Validate a package id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is out of range.
    pub fn check_package(&self, package: PackageId) -> Result<PackageId> {
        if package.index() < self.packages.len() {
            Ok(package)
        } else {
            Err(Error::lookup(format!(
                "package {package} (have {})",
                self.packages.len()
            )))
        }
    }

    /// Validate a class key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the package or class is out of range.
    pub fn check_class(&self, key: ClassKey) -> Result<ClassKey> {
        let classes = self.classes(key.package)?;
        if key.class_index() < classes.len() {
            Ok(key)
        } else {
            Err(Error::lookup(format!(
                "class {key} (package has {})",
                classes.len()
            )))
        }
    }

    /// Name of a package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is out of range.
    pub fn package_name(&self, package: PackageId) -> Result<&str> {
        self.check_package(package)?;
        Ok(&self.packages[package.index()])
    }

    /// Class names of a package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is out of range.
    pub fn classes(&self, package: PackageId) -> Result<&[String]> {
        self.check_package(package)?;
        Ok(&self.classes[package.index()])
    }

    /// Keys of all classes of a package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is out of range.
    pub fn class_keys(&self, package: PackageId) -> Result<impl Iterator<Item = ClassKey> + use<>> {
        let n = u32::try_from(self.classes(package)?.len()).unwrap_or(u32::MAX);
        Ok((0..n).map(move |c| ClassKey::in_package(package, c)))
    }

    /// Simple name of a class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the key is out of range.
    pub fn class_name(&self, key: ClassKey) -> Result<&str> {
        self.check_class(key)?;
        Ok(&self.classes[key.package.index()][key.class_index()])
    }

    /// Fully qualified class name, e.g. `com.acme.Widget`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the key is out of range.
    pub fn qualified_name(&self, key: ClassKey) -> Result<String> {
        Ok(format!(
            "{}.{}",
            self.package_name(key.package)?,
            self.class_name(key)?
        ))
    }

    /// Classes imported by `key`, in input order, duplicates kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the key is out of range.
    pub fn imports(&self, key: ClassKey) -> Result<&[ClassKey]> {
        self.check_class(key)?;
        Ok(self
            .edges_by_source
            .get(&key)
            .map_or(&[][..], Vec::as_slice))
    }

    /// List label for a package: `name (class count)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is out of range.
    pub fn package_label(&self, package: PackageId) -> Result<String> {
        Ok(format!(
            "{} ({})",
            self.package_name(package)?,
            self.classes(package)?.len()
        ))
    }

    /// List label for a class: `package.Class (import count)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the key is out of range.
    pub fn class_label(&self, key: ClassKey) -> Result<String> {
        Ok(format!(
            "{} ({})",
            self.qualified_name(key)?,
            self.imports(key)?.len()
        ))
    }

    /// Find a package by its dotted name.
    #[must_use]
    pub fn resolve_package(&self, name: &str) -> Option<PackageId> {
        self.packages
            .iter()
            .position(|p| p == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(PackageId)
    }

    /// Find a class by its simple name within a package.
    #[must_use]
    pub fn resolve_class_in(&self, package: PackageId, name: &str) -> Option<ClassKey> {
        self.classes
            .get(package.index())?
            .iter()
            .position(|c| c == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(|c| ClassKey::in_package(package, c))
    }

    /// Find a class by its fully qualified name.
    #[must_use]
    pub fn resolve_class(&self, qualified: &str) -> Option<ClassKey> {
        let (package, class) = qualified.rsplit_once('.')?;
        self.resolve_class_in(self.resolve_package(package)?, class)
    }

    /// Find a package by index or dotted name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if nothing matches.
    pub fn find_package(&self, arg: &str) -> Result<PackageId> {
        match arg.parse::<u32>() {
            Ok(index) => self.check_package(PackageId(index)),
            Err(_) => self
                .resolve_package(arg)
                .ok_or_else(|| Error::lookup(format!("package '{arg}'"))),
        }
    }

    /// Find a class of `package` by index or simple name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if nothing matches.
    pub fn find_class(&self, package: PackageId, arg: &str) -> Result<ClassKey> {
        match arg.parse::<u32>() {
            Ok(index) => self.check_class(ClassKey::in_package(package, index)),
            Err(_) => self.resolve_class_in(package, arg).ok_or_else(|| {
                Error::lookup(format!(
                    "class '{arg}' in package {}",
                    self.package_name(package).unwrap_or("?")
                ))
            }),
        }
    }

    /// The model as the three data blocks: packages with their classes,
    /// dependencies, cycles.
    #[must_use]
    pub fn to_record_blocks(&self) -> [Vec<Record>; 3] {
        let declarations = self
            .packages
            .iter()
            .zip(&self.classes)
            .flat_map(|(package, classes)| {
                std::iter::once(Record::Package(package.clone()))
                    .chain(classes.iter().cloned().map(Record::Source))
            })
            .collect();
        let dependencies = self
            .dependencies
            .iter()
            .map(|edge| Record::Dependency {
                source: edge.source.into(),
                target: edge.target.into(),
            })
            .collect();
        let cycles = self
            .cycles
            .iter()
            .map(|cycle| Record::Cycle(cycle.packages().iter().map(|p| p.0).collect()))
            .collect();
        [declarations, dependencies, cycles]
    }
}
