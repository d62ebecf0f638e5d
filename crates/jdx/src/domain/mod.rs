//! Domain types for the dependency graph.
//!
//! Packages and classes are addressed by dense indices assigned in
//! declaration order. A class is always addressed together with its package
//! through [`ClassKey`].

use jdx_data::ClassRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a package, in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PackageId(pub u32);

impl PackageId {
    /// The index as a `usize`, for slice access.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PackageId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Composite key of a class: its package and its index within that package.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClassKey {
    /// Owning package.
    pub package: PackageId,
    /// Index within the package.
    pub class: u32,
}

impl ClassKey {
    /// Create a class key from raw indices.
    #[must_use]
    pub fn new(package: u32, class: u32) -> Self {
        Self::in_package(PackageId(package), class)
    }

    /// Create a class key for a class of `package`.
    #[must_use]
    pub fn in_package(package: PackageId, class: u32) -> Self {
        Self { package, class }
    }

    /// The class index as a `usize`, for slice access.
    #[must_use]
    pub fn class_index(self) -> usize {
        self.class as usize
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.class)
    }
}

impl From<ClassRef> for ClassKey {
    fn from(r: ClassRef) -> Self {
        Self::new(r.package, r.class)
    }
}

impl From<ClassKey> for ClassRef {
    fn from(key: ClassKey) -> Self {
        ClassRef::new(key.package.0, key.class)
    }
}

/// A directed class-to-class dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Importing class.
    pub source: ClassKey,
    /// Imported class.
    pub target: ClassKey,
}

impl Edge {
    /// The coded form, e.g. `0.1>2.0`.
    #[must_use]
    pub fn coded(&self) -> String {
        format!("{}>{}", self.source, self.target)
    }
}

/// A directed package-to-package step of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Segment {
    /// Package the step leaves.
    pub from: PackageId,
    /// Package the step reaches.
    pub to: PackageId,
}

/// A package-level dependency cycle.
///
/// Stored in declaration order; the last package implicitly depends on the
/// first. A package may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(Vec<PackageId>);

impl Cycle {
    /// Wrap a non-empty package list.
    #[must_use]
    pub fn new(packages: Vec<PackageId>) -> Self {
        debug_assert!(!packages.is_empty(), "cycles are never empty");
        Self(packages)
    }

    /// Packages in cycle order.
    #[must_use]
    pub fn packages(&self) -> &[PackageId] {
        &self.0
    }

    /// Number of positions in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cycle has no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The package reached from position `i`: `packages[(i + 1) % len]`.
    #[must_use]
    pub fn next_hop(&self, i: usize) -> PackageId {
        self.0[(i + 1) % self.0.len()]
    }

    /// Each step of the cycle, including the closing step back to the start.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.0.len()).map(|i| Segment {
            from: self.0[i],
            to: self.next_hop(i),
        })
    }

    /// Whether `package` appears anywhere in the cycle.
    #[must_use]
    pub fn contains(&self, package: PackageId) -> bool {
        self.0.contains(&package)
    }

    /// The coded form, e.g. `0}3}1}`.
    #[must_use]
    pub fn coded(&self) -> String {
        let raw: Vec<u32> = self.0.iter().map(|p| p.0).collect();
        jdx_data::record::encode_cycle(&raw)
    }
}

/// Positional metadata from the leading comments of a data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// First comment.
    pub title: String,
    /// Second comment.
    pub date: String,
    /// Third comment: the data file name.
    pub file: String,
    /// File name without the `.data` suffix.
    pub basename: String,
}

impl Metadata {
    /// Build metadata from the comments in file order. Missing positions are
    /// left empty.
    #[must_use]
    pub fn from_comments(comments: &[String], data_suffix: &str) -> Self {
        let at = |i: usize| comments.get(i).cloned().unwrap_or_default();
        let file = at(2);
        let basename = file.strip_suffix(data_suffix).unwrap_or(&file).to_string();
        Self {
            title: at(0),
            date: at(1),
            file,
            basename,
        }
    }
}
