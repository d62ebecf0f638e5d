//! Reader and writer for the compact JDX dependency data format.
//!
//! A data file is a sequence of tagged lines describing Java packages, their
//! classes, class-to-class dependency edges and package-level cycles. Packages
//! and classes are referred to by dense indices assigned in declaration order.
//!
//! ```text
//! ;Java Package Dependency Data
//! ;Thu Jul 16 10:21:44 2020
//! ;myproject.data
//! Pcom.acme
//! SWidget
//! Pcom.acme.util
//! SStrings
//! D0.0>1.0
//! C0}1}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod record;
pub mod writer;

pub use error::{Error, Result};
pub use reader::RecordReader;
pub use record::{ClassRef, Record, RecordCounts, RecordTag, parse_line, parse_str};
pub use writer::RecordWriter;
