//! Derived analytics over a [`GraphModel`].
//!
//! [`Analytics::compute`] runs once after decoding. Everything except
//! [`Analytics::class_in_cycle`] is precomputed.

mod cycles;
mod graph;
mod roots;

pub use cycles::{CycleMembership, longest_cycle};
pub use graph::{Finding, PackageGraph};
pub use roots::compute_roots;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{ClassKey, PackageId, Segment};
use crate::error::Result;
use crate::model::GraphModel;

/// Summary counts of a model and its analytics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of packages.
    pub n_packages: usize,
    /// Number of classes.
    pub n_classes: usize,
    /// Number of dependency edges, duplicates included.
    pub n_dependencies: usize,
    /// Number of declared cycles.
    pub n_cycles: usize,
    /// Number of root packages.
    pub n_roots: usize,
}

/// Aggregated facts about one package, as shown in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    /// The package.
    pub package: PackageId,
    /// Its dotted name.
    pub name: String,
    /// Number of classes it declares.
    pub class_count: usize,
    /// Whether no class of the package imports anything.
    pub is_root: bool,
    /// Indices of the cycles it belongs to.
    pub cycles: Vec<usize>,
    /// Packages reachable in one cycle step.
    pub next_hops: Vec<PackageId>,
    /// Number of distinct packages it depends on.
    pub dependency_count: usize,
    /// Number of distinct cycle segments across its cycles.
    pub segment_count: usize,
}

/// Roots, cycle membership and package dependencies of one model.
#[derive(Debug, Clone)]
pub struct Analytics {
    roots: Vec<PackageId>,
    membership: CycleMembership,
    packages: PackageGraph,
    longest: Option<usize>,
    summary: Summary,
}

impl Analytics {
    /// Compute all analytics for `model`.
    #[must_use]
    pub fn compute(model: &GraphModel) -> Self {
        let roots = compute_roots(model);
        let membership = CycleMembership::compute(model.package_count(), model.cycles());
        let packages = PackageGraph::build(model);
        let longest = longest_cycle(model.cycles());

        let summary = Summary {
            n_packages: model.package_count(),
            n_classes: model.class_count(),
            n_dependencies: model.dependencies().len(),
            n_cycles: model.cycles().len(),
            n_roots: roots.len(),
        };
        tracing::debug!(
            roots = summary.n_roots,
            segments = membership.segments().len(),
            package_edges = packages.edge_count(),
            "computed analytics"
        );

        Self {
            roots,
            membership,
            packages,
            longest,
            summary,
        }
    }

    /// Root packages, ascending.
    #[must_use]
    pub fn roots(&self) -> &[PackageId] {
        &self.roots
    }

    /// Whether `package` is a root.
    #[must_use]
    pub fn is_root(&self, package: PackageId) -> bool {
        self.roots.binary_search(&package).is_ok()
    }

    /// Summary counts.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Per-package cycle membership.
    #[must_use]
    pub fn membership(&self) -> &CycleMembership {
        &self.membership
    }

    /// Indices of the cycles `package` belongs to, ascending.
    #[must_use]
    pub fn package_cycles(&self, package: PackageId) -> Vec<usize> {
        self.membership.cycles_of(package)
    }

    /// Whether `package` belongs to any cycle.
    #[must_use]
    pub fn in_cycle(&self, package: PackageId) -> bool {
        self.membership.is_cyclic(package)
    }

    /// Next hops of `package` over all its cycles, ascending.
    #[must_use]
    pub fn next_hops(&self, package: PackageId) -> Vec<PackageId> {
        self.membership.next_hops(package)
    }

    /// Packages `package` depends on.
    #[must_use]
    pub fn package_dependencies(&self, package: PackageId) -> Vec<PackageId> {
        self.packages
            .targets(package)
            .map(|t| t.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Distinct segments over all cycles.
    #[must_use]
    pub fn segments(&self) -> &BTreeSet<Segment> {
        self.membership.segments()
    }

    /// Index of the cycle with the most distinct segments.
    #[must_use]
    pub fn longest_cycle(&self) -> Option<usize> {
        self.longest
    }

    /// The package-level dependency graph.
    #[must_use]
    pub fn package_graph(&self) -> &PackageGraph {
        &self.packages
    }

    /// Cross-check declared cycles against the dependency edges.
    #[must_use]
    pub fn check(&self, model: &GraphModel) -> Vec<Finding> {
        self.packages.check(model.cycles())
    }

    /// Whether any class imported by `key` lives in a package that belongs to
    /// a cycle. Only direct imports are considered.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if `key` is out of range.
    pub fn class_in_cycle(&self, model: &GraphModel, key: ClassKey) -> Result<bool> {
        Ok(model
            .imports(key)?
            .iter()
            .any(|target| self.in_cycle(target.package)))
    }

    /// Detail panel facts for `package`.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if `package` is out of range.
    pub fn detail(&self, model: &GraphModel, package: PackageId) -> Result<PackageDetail> {
        let name = model.package_name(package)?.to_string();
        Ok(PackageDetail {
            package,
            name,
            class_count: model.classes(package)?.len(),
            is_root: self.is_root(package),
            cycles: self.package_cycles(package),
            next_hops: self.next_hops(package),
            dependency_count: self.packages.targets(package).map_or(0, BTreeSet::len),
            segment_count: self
                .membership
                .segments_of(package)
                .map_or(0, BTreeSet::len),
        })
    }
}
