//! jdx - Java package dependency explorer.
//!
//! This crate decodes the compact JDX data format (see [`jdx_data`]) into a
//! [`GraphModel`], derives [`Analytics`] (root packages, cycle membership,
//! next hops, package dependencies) and drives a [`Navigator`] over the
//! result. The `jdx` binary is a thin command-line adapter over these.
//!
//! ```
//! use jdx::{Analytics, GraphModel, Navigator, PackageId};
//!
//! let model = GraphModel::parse("Pa\nSX\nPb\nSY\nD0.0>1.0\nC0}1}\n")?;
//! let analytics = Analytics::compute(&model);
//! assert_eq!(analytics.roots(), [PackageId(1)]);
//!
//! let mut nav = Navigator::new(&model, &analytics);
//! nav.select_package(PackageId(0))?;
//! nav.navigate_to_next_hop(PackageId(1))?;
//! # Ok::<(), jdx::Error>(())
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analytics;
pub mod domain;
pub mod encode;
pub mod error;
pub mod export;
pub mod model;
pub mod navigation;

// Public CLI modules (needed by binary)
pub mod app;
pub mod cli;
pub mod config;
pub mod output;

pub use analytics::{Analytics, PackageDetail, Summary};
pub use domain::{ClassKey, Cycle, Edge, Metadata, PackageId, Segment};
pub use error::{Error, Result};
pub use model::{GraphModel, ModelBuilder};
pub use navigation::{NavState, Navigator};
