//! Data handed to the page renderer.
//!
//! The renderer only needs names, coded edges and cycles, roots and counts;
//! it re-derives everything else itself.

use serde::Serialize;

use crate::analytics::{Analytics, Summary};
use crate::domain::{Metadata, PackageId};
use crate::error::Result;
use crate::model::GraphModel;

/// Serializable explorer payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerData {
    /// Title, date, file and basename.
    pub meta: Metadata,
    /// Package names by id.
    pub packages: Vec<String>,
    /// Class names per package.
    pub classes_by_package: Vec<Vec<String>>,
    /// Edges as `p.c>p.c`, input order.
    pub coded_dependencies: Vec<String>,
    /// Cycles as `p}q}`, input order.
    pub coded_cycles: Vec<String>,
    /// Root packages, ascending.
    pub roots: Vec<PackageId>,
    /// Counts.
    #[serde(flatten)]
    pub summary: Summary,
}

impl ExplorerData {
    /// Assemble the payload.
    #[must_use]
    pub fn new(model: &GraphModel, analytics: &Analytics) -> Self {
        Self {
            meta: model.metadata().clone(),
            packages: model.packages().to_vec(),
            classes_by_package: model.classes_by_package().to_vec(),
            coded_dependencies: model.dependencies().iter().map(|e| e.coded()).collect(),
            coded_cycles: model.cycles().iter().map(|c| c.coded()).collect(),
            roots: analytics.roots().to_vec(),
            summary: analytics.summary(),
        }
    }

    /// Serialize to JSON, indented unless `compact`.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let json = if compact {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(json)
    }
}
