//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use std::path::PathBuf;

use clap::Parser;

/// Arguments shared by commands that only need the data file
#[derive(Parser, Debug, Clone)]
pub struct DataArgs {
    /// Data file, or its basename (`.data` is appended when missing)
    pub data: PathBuf,
}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone)]
pub struct CyclesArgs {
    /// Data file, or its basename
    pub data: PathBuf,

    /// Only show the cycle with the most distinct segments
    #[arg(long)]
    pub longest: bool,

    /// Cross-check declared cycles against the dependency edges
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Data file, or its basename
    pub data: PathBuf,

    /// Package index or dotted name
    pub package: String,

    /// Class index or simple name within the package
    pub class: Option<String>,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Data file, or its basename
    pub data: PathBuf,

    /// Output file (defaults to `<basename>.jdx.json` next to the data file;
    /// `-` writes to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of indented
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `encode` command
#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Data file, or its basename
    pub data: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
