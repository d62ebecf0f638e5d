//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for jdx using clap's derive API.
//!
//! # Commands
//!
//! - `summary`: Show metadata and counts
//! - `roots`: List packages that import nothing
//! - `cycles`: List package cycles, optionally checking them against the edges
//! - `show`: Show a package's detail panel and optionally one class's imports
//! - `export`: Write the explorer data as JSON
//! - `encode`: Re-encode a data file with a fresh header
//! - `explore`: Navigate interactively from stdin
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (summary, roots, cycles, show)
//! - `-v`: Verbosity, repeatable
//! - `--config <path>`: Configuration file (defaults to `./jdx.yaml` if present)
//! - `--no-color`: Disable colored output
//!
//! # Example
//!
//! ```bash
//! jdx summary onos
//! jdx cycles onos.data --longest
//! jdx show onos org.onosproject.net Device
//! jdx export onos -o onos.json
//! ```

mod args;
mod execute;
mod explore;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CyclesArgs, DataArgs, EncodeArgs, ExportArgs, ShowArgs};
pub use explore::{ExploreCommand, run_session};

use crate::app::App;
use crate::config::JdxConfig;
use crate::output::{OutputConfig, OutputMode};

/// jdx - Java package dependency explorer
///
/// Decodes a compact package/class dependency data file and reports roots,
/// cycles and per-package details, or lets you navigate the graph.
#[derive(Parser, Debug)]
#[command(name = "jdx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./jdx.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show metadata and counts
    ///
    /// Prints the title, date and file name from the data header together
    /// with package, class, dependency, cycle and root counts.
    Summary(DataArgs),

    /// List root packages
    ///
    /// A root package has no outgoing dependency: none of its classes import
    /// anything known to the data file.
    Roots(DataArgs),

    /// List package cycles
    ///
    /// Prints each declared cycle as a closed path. With `--check`, also
    /// reports cycle steps with no dependency behind them and mutually
    /// dependent packages that no cycle declares.
    Cycles(CyclesArgs),

    /// Show a package and optionally one of its classes
    ///
    /// Prints the package detail panel and class list. With a class, also
    /// prints the classes it imports.
    Show(ShowArgs),

    /// Export the explorer data as JSON
    Export(ExportArgs),

    /// Re-encode a data file
    ///
    /// Writes the decoded graph back in the data format with a fresh header.
    Encode(EncodeArgs),

    /// Navigate the graph interactively
    ///
    /// Reads navigation commands from stdin. Type `help` for the list.
    Explore(DataArgs),
}

impl Commands {
    /// The data file argument of the command.
    #[must_use]
    pub fn data(&self) -> &std::path::Path {
        match self {
            Self::Summary(args) | Self::Roots(args) | Self::Explore(args) => &args.data,
            Self::Cycles(args) => &args.data,
            Self::Show(args) => &args.data,
            Self::Export(args) => &args.data,
            Self::Encode(args) => &args.data,
        }
    }
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns a clap error if the arguments do not parse.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Tracing filter matching the verbosity flag.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the data file cannot be loaded,
    /// a lookup fails, or output cannot be written.
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let config = JdxConfig::discover(self.config.as_deref(), &std::env::current_dir()?).await?;
        let mut output = OutputConfig::from_env().with_display(&config.display);
        if self.no_color {
            output = output.without_colors();
        }
        colored::control::set_override(output.use_colors);

        let app = App::load(config, self.command.data()).await?;
        let stdout = io::stdout();
        let mut w = stdout.lock();

        match &self.command {
            Commands::Summary(_) => execute::execute_summary(&mut w, &app, output_mode, &output)?,
            Commands::Roots(_) => execute::execute_roots(&mut w, &app, output_mode, &output)?,
            Commands::Cycles(args) => {
                execute::execute_cycles(&mut w, &app, args, output_mode, &output)?;
            }
            Commands::Show(args) => {
                execute::execute_show(&mut w, &app, args, output_mode, &output)?;
            }
            Commands::Export(args) => execute::execute_export(&mut w, &app, args).await?,
            Commands::Encode(args) => execute::execute_encode(&mut w, &app, args).await?,
            Commands::Explore(_) => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                run_session(app.navigator(), stdin, &mut w, &output).await?;
            }
        }

        w.flush()?;
        Ok(())
    }
}
