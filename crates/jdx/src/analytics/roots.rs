//! Root packages: packages that are never the source of a dependency edge.
//!
//! "Root" here means no *outgoing* edge: none of the package's classes import
//! anything known to the model. Incoming edges do not matter.

use std::collections::BTreeSet;

use crate::domain::PackageId;
use crate::model::GraphModel;

/// Compute the sorted root set from the full edge set.
#[must_use]
pub fn compute_roots(model: &GraphModel) -> Vec<PackageId> {
    let non_roots: BTreeSet<PackageId> = model
        .dependencies()
        .iter()
        .map(|edge| edge.source.package)
        .collect();

    model
        .package_ids()
        .filter(|p| !non_roots.contains(p))
        .collect()
}
