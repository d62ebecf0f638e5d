//! Line-oriented exploration loop.
//!
//! Each input line is one command driving a [`Navigator`]. Failed commands
//! print an error and leave the selection as it was; the loop ends on `q` or
//! end of input.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::navigation::{NavState, Navigator};
use crate::output::{self, OutputConfig};

const PROMPT: &str = "jdx> ";

const HELP: &str = "\
Commands:
  p <index|name>   select a package
  c <index|name>   select a class of the selected package
  i <index>        follow the i-th import of the selected class
  n <index|name>   follow a cycle step to a next-hop package
  up               deselect the class, or the package
  ls               show the current view
  help             show this help
  q                quit";

/// One parsed explore command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreCommand {
    /// Select a package by index or name.
    Package(String),
    /// Select a class of the selected package by index or name.
    Class(String),
    /// Follow an import of the selected class by its list position.
    Import(usize),
    /// Follow a cycle step to a package by index or name.
    NextHop(String),
    /// Go up one level.
    Up,
    /// Show the current view.
    List,
    /// Show help.
    Help,
    /// Leave the loop.
    Quit,
}

impl ExploreCommand {
    /// Parse one input line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns a message for unknown commands or missing arguments.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let arg = words.collect::<Vec<_>>().join(" ");
        let required = |arg: String| {
            if arg.is_empty() {
                Err(format!("'{verb}' needs an argument"))
            } else {
                Ok(arg)
            }
        };

        let command = match verb {
            "p" | "package" => Self::Package(required(arg)?),
            "c" | "class" => Self::Class(required(arg)?),
            "i" | "import" => {
                let arg = required(arg)?;
                Self::Import(
                    arg.parse()
                        .map_err(|_| format!("'{arg}' is not an import index"))?,
                )
            }
            "n" | "next" => Self::NextHop(required(arg)?),
            "up" | "u" => Self::Up,
            "ls" | "l" => Self::List,
            "help" | "h" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Run the loop until `q` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run_session<R, W>(
    mut nav: Navigator<'_>,
    reader: R,
    w: &mut W,
    config: &OutputConfig,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    writeln!(w, "{HELP}")?;

    loop {
        write!(w, "{PROMPT}")?;
        w.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ExploreCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(w, "{}", output::error(&message, config))?;
                continue;
            }
        };
        tracing::trace!(?command, "explore command");

        match command {
            ExploreCommand::Quit => break,
            ExploreCommand::Help => writeln!(w, "{HELP}")?,
            command => match apply(&mut nav, command) {
                Ok(()) => render(w, &nav, config)?,
                Err(e) => writeln!(w, "{}", output::error(&e.to_string(), config))?,
            },
        }
    }

    writeln!(w)?;
    Ok(())
}

fn apply(nav: &mut Navigator<'_>, command: ExploreCommand) -> crate::Result<()> {
    let model = nav.model();
    match command {
        ExploreCommand::Package(arg) => nav.select_package(model.find_package(&arg)?),
        ExploreCommand::Class(arg) => {
            let Some(package) = nav.state().package() else {
                return Err(crate::Error::InvalidTransition {
                    action: "select class",
                    state: nav.state().to_string(),
                });
            };
            let key = model.find_class(package, &arg)?;
            nav.select_class(package, key.class)
        }
        ExploreCommand::Import(index) => {
            if nav.state().class().is_none() {
                return Err(crate::Error::InvalidTransition {
                    action: "follow an import",
                    state: nav.state().to_string(),
                });
            }
            let imports = nav.import_list()?;
            let target = imports.get(index).map(|entry| entry.key).ok_or_else(|| {
                crate::Error::lookup(format!("import {index} (have {})", imports.len()))
            })?;
            nav.navigate_to_import(target)
        }
        ExploreCommand::NextHop(arg) => nav.navigate_to_next_hop(model.find_package(&arg)?),
        ExploreCommand::Up => match nav.state() {
            NavState::PackageAndClassSelected(_) => nav.deselect_class(),
            _ => nav.deselect_package(),
        },
        ExploreCommand::List | ExploreCommand::Help | ExploreCommand::Quit => Ok(()),
    }
}

fn render<W: Write>(w: &mut W, nav: &Navigator<'_>, config: &OutputConfig) -> Result<()> {
    let model = nav.model();
    match nav.state() {
        NavState::Idle => output::print_package_list(w, model, nav.analytics(), config)?,
        NavState::PackageSelected(_) => {
            if let Some(detail) = nav.detail()? {
                output::print_detail(w, model, &detail, config)?;
            }
            output::print_class_list(w, &nav.class_list()?, config)?;
        }
        NavState::PackageAndClassSelected(key) => {
            output::print_import_list(w, &model.qualified_name(key)?, &nav.import_list()?, config)?;
        }
    }
    Ok(())
}
