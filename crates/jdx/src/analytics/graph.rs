//! Package-level dependency graph using petgraph.
//!
//! Class edges are folded into package edges. The graph is used to cross-check
//! the declared cycles against the edges they should be made of:
//! - Declared segments with no package edge behind them
//! - Strongly connected components that no declared cycle touches

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::domain::{Cycle, PackageId, Segment};
use crate::model::GraphModel;

/// Deduplicated package-to-package dependencies.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    graph: DiGraph<PackageId, ()>,
    targets: Vec<BTreeSet<PackageId>>,
}

/// A disagreement between the declared cycles and the dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    /// A declared cycle step with no class edge between the two packages.
    MissingEdge {
        /// Index of the declaring cycle.
        cycle: usize,
        /// The unsupported step.
        segment: Segment,
    },
    /// Packages that depend on each other without any declared cycle.
    UndeclaredCycle {
        /// Members of the strongly connected component, ascending.
        packages: Vec<PackageId>,
    },
}

impl PackageGraph {
    /// Fold the model's class edges into package edges.
    #[must_use]
    pub fn build(model: &GraphModel) -> Self {
        let mut graph = DiGraph::with_capacity(model.package_count(), 0);
        for package in model.package_ids() {
            graph.add_node(package);
        }

        let mut targets = vec![BTreeSet::new(); model.package_count()];
        for edge in model.dependencies() {
            let (from, to) = (edge.source.package, edge.target.package);
            if targets[from.index()].insert(to) {
                graph.add_edge(node(from), node(to), ());
            }
        }

        Self { graph, targets }
    }

    /// Packages that `package` depends on, self included when it has
    /// intra-package edges.
    #[must_use]
    pub fn targets(&self, package: PackageId) -> Option<&BTreeSet<PackageId>> {
        self.targets.get(package.index())
    }

    /// Whether any class of `from` imports a class of `to`.
    #[must_use]
    pub fn depends_on(&self, from: PackageId, to: PackageId) -> bool {
        self.targets(from).is_some_and(|t| t.contains(&to))
    }

    /// Number of distinct package edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Strongly connected components with more than one package, each sorted
    /// ascending, ordered by their smallest member.
    #[must_use]
    pub fn cyclic_components(&self) -> Vec<Vec<PackageId>> {
        let mut components: Vec<Vec<PackageId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut packages: Vec<PackageId> =
                    scc.into_iter().map(|n| self.graph[n]).collect();
                packages.sort_unstable();
                packages
            })
            .collect();
        components.sort();
        components
    }

    /// Compare declared cycles against the edges.
    ///
    /// Single-package self dependencies are ordinary and never reported.
    #[must_use]
    pub fn check(&self, cycles: &[Cycle]) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (index, cycle) in cycles.iter().enumerate() {
            let mut seen = BTreeSet::new();
            for segment in cycle.segments() {
                if seen.insert(segment) && !self.depends_on(segment.from, segment.to) {
                    findings.push(Finding::MissingEdge {
                        cycle: index,
                        segment,
                    });
                }
            }
        }

        for packages in self.cyclic_components() {
            let declared = cycles
                .iter()
                .any(|c| packages.iter().any(|&p| c.contains(p)));
            if !declared {
                findings.push(Finding::UndeclaredCycle { packages });
            }
        }

        for finding in &findings {
            tracing::warn!(?finding, "declared cycles disagree with dependencies");
        }
        findings
    }
}

fn node(package: PackageId) -> NodeIndex {
    NodeIndex::new(package.index())
}
