//! Cycle membership, next hops and cycle segments.
//!
//! For a cycle `c` and a package `p` at position `i`, the next hop of `p` via
//! `c` is `c[(i + 1) % len(c)]`. A package repeated within one cycle gets one
//! next hop per occurrence.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Cycle, PackageId, Segment};

/// Per-package view of the declared cycles.
#[derive(Debug, Clone, Default)]
pub struct CycleMembership {
    /// For each package: cycle index -> next hops, one per occurrence.
    via: Vec<BTreeMap<usize, Vec<PackageId>>>,
    /// For each package: segments of every cycle it belongs to.
    segments_of: Vec<BTreeSet<Segment>>,
    /// Distinct segments over all cycles.
    segments: BTreeSet<Segment>,
}

impl CycleMembership {
    /// Compute membership for `package_count` packages.
    ///
    /// Cycle entries are assumed valid package ids; the model builder rejects
    /// anything else.
    #[must_use]
    pub fn compute(package_count: usize, cycles: &[Cycle]) -> Self {
        let mut via = vec![BTreeMap::<usize, Vec<PackageId>>::new(); package_count];
        let mut segments_of = vec![BTreeSet::new(); package_count];
        let mut segments = BTreeSet::new();

        for (index, cycle) in cycles.iter().enumerate() {
            let cycle_segments: BTreeSet<Segment> = cycle.segments().collect();
            for (position, &package) in cycle.packages().iter().enumerate() {
                via[package.index()]
                    .entry(index)
                    .or_default()
                    .push(cycle.next_hop(position));
                segments_of[package.index()].extend(cycle_segments.iter().copied());
            }
            segments.extend(cycle_segments);
        }

        Self {
            via,
            segments_of,
            segments,
        }
    }

    /// Whether the package belongs to at least one cycle.
    #[must_use]
    pub fn is_cyclic(&self, package: PackageId) -> bool {
        self.via
            .get(package.index())
            .is_some_and(|cycles| !cycles.is_empty())
    }

    /// Indices of the cycles the package belongs to, ascending.
    #[must_use]
    pub fn cycles_of(&self, package: PackageId) -> Vec<usize> {
        self.via
            .get(package.index())
            .map(|cycles| cycles.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Distinct next hops of the package over all its cycles, ascending.
    #[must_use]
    pub fn next_hops(&self, package: PackageId) -> Vec<PackageId> {
        let Some(cycles) = self.via.get(package.index()) else {
            return Vec::new();
        };
        let hops: BTreeSet<PackageId> = cycles.values().flatten().copied().collect();
        hops.into_iter().collect()
    }

    /// Next hops of the package via one cycle, one per occurrence, in
    /// position order.
    #[must_use]
    pub fn next_hops_via(&self, package: PackageId, cycle: usize) -> &[PackageId] {
        self.via
            .get(package.index())
            .and_then(|cycles| cycles.get(&cycle))
            .map_or(&[], Vec::as_slice)
    }

    /// Segments of every cycle the package belongs to.
    #[must_use]
    pub fn segments_of(&self, package: PackageId) -> Option<&BTreeSet<Segment>> {
        self.segments_of.get(package.index())
    }

    /// Distinct segments over all cycles.
    #[must_use]
    pub fn segments(&self) -> &BTreeSet<Segment> {
        &self.segments
    }
}

/// Index of the cycle with the most distinct segments. Ties keep the first
/// declared.
#[must_use]
pub fn longest_cycle(cycles: &[Cycle]) -> Option<usize> {
    let mut longest: Option<(usize, usize)> = None;
    for (index, cycle) in cycles.iter().enumerate() {
        let size = cycle.segments().collect::<BTreeSet<_>>().len();
        if longest.is_none_or(|(_, best)| size > best) {
            longest = Some((index, size));
        }
    }
    longest.map(|(index, _)| index)
}
