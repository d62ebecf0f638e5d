//! Output formatting for CLI commands.
//!
//! Every printer writes to a caller-supplied writer so commands and the
//! explore loop can share them and tests can capture the text.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, markers)

pub mod color;

use std::collections::BTreeSet;
use std::env;
use std::io::{self, Write};

use serde::Serialize;

pub use color::{error, info, success, warning};

use color::{arrow, bold, cycle_marker, dimmed};

use crate::analytics::{Analytics, Finding, PackageDetail, Summary};
use crate::config::{DEFAULT_MAX_ITEMS, DisplayConfig};
use crate::domain::{Cycle, Metadata, PackageId};
use crate::model::GraphModel;
use crate::navigation::{ClassEntry, ImportEntry};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for wrapping cycle paths.
    pub max_width: usize,
    /// Whether to use ASCII-only arrows and markers instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
    /// Rows listed per section before truncating.
    pub max_items: usize,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `JDX_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `JDX_ASCII`: Set to "1" or "true" for ASCII-only output (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `JDX_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("JDX_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "JDX_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env::var("JDX_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "JDX_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // NO_COLOR (https://no-color.org/) wins over JDX_COLOR
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("JDX_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Apply the display section of the configuration file. ASCII output is
    /// used when either the file or the environment asks for it.
    #[must_use]
    pub fn with_display(mut self, display: &DisplayConfig) -> Self {
        self.use_ascii |= display.ascii;
        self.max_items = display.max_items;
        self
    }

    /// Disable colors.
    #[must_use]
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Width available for wrapped content.
    fn content_width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, false, true)
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Print a JSON document for any serializable value.
///
/// # Errors
///
/// Returns an IO error if serialization or writing fails.
pub fn print_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

/// Print "... and N more" when a list was truncated.
fn print_more<W: Write>(
    w: &mut W,
    total: usize,
    shown: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if total > shown {
        writeln!(w, "    {}", dimmed(&format!("... and {} more", total - shown), config))?;
    }
    Ok(())
}

fn package_name(model: &GraphModel, package: PackageId) -> &str {
    model.package_name(package).unwrap_or("?")
}

/// Render a cycle as `a → b → a`, wrapped to `width` with a hanging indent.
#[must_use]
pub fn cycle_path(
    model: &GraphModel,
    cycle: &Cycle,
    width: usize,
    config: &OutputConfig,
) -> Vec<String> {
    let mut names: Vec<&str> = cycle
        .packages()
        .iter()
        .map(|&p| package_name(model, p))
        .collect();
    if let Some(&first) = names.first() {
        names.push(first);
    }
    let path = names.join(&format!(" {} ", arrow(config)));

    let options = textwrap::Options::new(width.max(20))
        .initial_indent("    ")
        .subsequent_indent("      ");
    textwrap::wrap(&path, options)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

// ============================================================================
// Command Output
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryJson<'a> {
    meta: &'a Metadata,
    #[serde(flatten)]
    summary: Summary,
    longest_cycle: Option<usize>,
}

/// Print metadata and counts.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_summary<W: Write>(
    w: &mut W,
    model: &GraphModel,
    analytics: &Analytics,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    let summary = analytics.summary();
    if mode == OutputMode::Json {
        return print_json(
            w,
            &SummaryJson {
                meta: model.metadata(),
                summary,
                longest_cycle: analytics.longest_cycle(),
            },
        );
    }

    let meta = model.metadata();
    if !meta.title.is_empty() {
        writeln!(w, "{}", bold(&meta.title, config))?;
    }
    if !meta.file.is_empty() {
        writeln!(w, "{} {}  {}", dimmed("File:", config), meta.file, dimmed(&meta.date, config))?;
    }
    writeln!(w)?;
    writeln!(w, "  {:<14}{}", "Packages:", summary.n_packages)?;
    writeln!(w, "  {:<14}{}", "Classes:", summary.n_classes)?;
    writeln!(w, "  {:<14}{}", "Dependencies:", summary.n_dependencies)?;
    let cycles = summary.n_cycles.to_string();
    let cycles = if summary.n_cycles == 0 {
        success(&cycles, config)
    } else {
        warning(&cycles, config)
    };
    writeln!(w, "  {:<14}{}", "Cycles:", cycles)?;
    writeln!(w, "  {:<14}{}", "Roots:", summary.n_roots)?;
    Ok(())
}

#[derive(Serialize)]
struct PackageJson<'a> {
    id: PackageId,
    name: &'a str,
}

/// Print the root packages.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_roots<W: Write>(
    w: &mut W,
    model: &GraphModel,
    analytics: &Analytics,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    let roots = analytics.roots();
    if mode == OutputMode::Json {
        let items: Vec<PackageJson<'_>> = roots
            .iter()
            .map(|&id| PackageJson {
                id,
                name: package_name(model, id),
            })
            .collect();
        return print_json(w, &items);
    }

    if roots.is_empty() {
        writeln!(w, "{}", warning("No root packages: every package imports something.", config))?;
        return Ok(());
    }

    writeln!(w, "Found {} root package(s):", success(&roots.len().to_string(), config))?;
    writeln!(w)?;
    for &root in roots.iter().take(config.max_items) {
        writeln!(
            w,
            "  {} {}",
            info(&format!("{:>4}", root.0), config),
            model.package_label(root).unwrap_or_default()
        )?;
    }
    print_more(w, roots.len(), config.max_items, config)
}

#[derive(Serialize)]
struct CycleJson<'a> {
    index: usize,
    packages: Vec<PackageJson<'a>>,
    segments: usize,
}

#[derive(Serialize)]
struct CycleReportJson<'a> {
    cycles: Vec<CycleJson<'a>>,
    findings: &'a [Finding],
}

/// Print declared cycles, or only the longest one, followed by consistency
/// findings when a check was run.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_cycles<W: Write>(
    w: &mut W,
    model: &GraphModel,
    analytics: &Analytics,
    longest_only: bool,
    findings: Option<&[Finding]>,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    let selected: Vec<usize> = if longest_only {
        analytics.longest_cycle().into_iter().collect()
    } else {
        (0..model.cycles().len()).collect()
    };

    if mode == OutputMode::Json {
        let cycles: Vec<CycleJson<'_>> = selected
            .iter()
            .map(|&index| {
                let cycle = &model.cycles()[index];
                CycleJson {
                    index,
                    packages: cycle
                        .packages()
                        .iter()
                        .map(|&id| PackageJson {
                            id,
                            name: package_name(model, id),
                        })
                        .collect(),
                    segments: cycle.segments().collect::<BTreeSet<_>>().len(),
                }
            })
            .collect();
        return match findings {
            Some(findings) => print_json(w, &CycleReportJson { cycles, findings }),
            None => print_json(w, &cycles),
        };
    }

    if selected.is_empty() {
        writeln!(w, "{}", success("No package cycles declared.", config))?;
    } else {
        if longest_only {
            writeln!(w, "Longest of {} cycle(s):", model.cycles().len())?;
        } else {
            writeln!(
                w,
                "Found {} package cycle(s):",
                warning(&selected.len().to_string(), config)
            )?;
        }
        writeln!(w)?;

        let width = config.content_width();
        for &index in selected.iter().take(config.max_items) {
            let cycle = &model.cycles()[index];
            writeln!(
                w,
                "  {} {} {}",
                bold(&warning("Cycle", config), config),
                index,
                dimmed(&format!("({} packages)", cycle.len()), config)
            )?;
            for line in cycle_path(model, cycle, width, config) {
                writeln!(w, "{line}")?;
            }
        }
        print_more(w, selected.len(), config.max_items, config)?;
    }

    match findings {
        Some(findings) => print_findings(w, model, findings, config),
        None => Ok(()),
    }
}

/// Print consistency findings between declared cycles and edges.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_findings<W: Write>(
    w: &mut W,
    model: &GraphModel,
    findings: &[Finding],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w)?;
    if findings.is_empty() {
        writeln!(w, "{}", success("Declared cycles agree with the dependency edges.", config))?;
        return Ok(());
    }

    writeln!(w, "{} consistency finding(s):", warning(&findings.len().to_string(), config))?;
    let arrow = arrow(config);
    for finding in findings {
        match finding {
            Finding::MissingEdge { cycle, segment } => writeln!(
                w,
                "  cycle {cycle}: no dependency {} {arrow} {}",
                package_name(model, segment.from),
                package_name(model, segment.to)
            )?,
            Finding::UndeclaredCycle { packages } => {
                let names: Vec<&str> = packages.iter().map(|&p| package_name(model, p)).collect();
                writeln!(w, "  undeclared cycle among: {}", names.join(", "))?;
            }
        }
    }
    Ok(())
}

/// Print the detail panel of a package.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_detail<W: Write>(
    w: &mut W,
    model: &GraphModel,
    detail: &PackageDetail,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} {}", info(&detail.package.to_string(), config), bold(&detail.name, config))?;
    let root = if detail.is_root { success("yes", config) } else { "no".to_string() };
    writeln!(
        w,
        "{} {}    {} {}    {} {}",
        dimmed("Classes:", config),
        detail.class_count,
        dimmed("Root:", config),
        root,
        dimmed("Depends on:", config),
        detail.dependency_count
    )?;

    if !detail.cycles.is_empty() {
        let cycles: Vec<String> = detail.cycles.iter().map(ToString::to_string).collect();
        writeln!(
            w,
            "{} {}    {} {}",
            dimmed("Cycles:", config),
            warning(&cycles.join(", "), config),
            dimmed("Segments:", config),
            detail.segment_count
        )?;
        writeln!(w, "{}:", bold("Next hops", config))?;
        let arrow = arrow(config);
        for &hop in &detail.next_hops {
            writeln!(
                w,
                "  {} {} {}",
                info(arrow, config),
                info(&format!("{:>4}", hop.0), config),
                package_name(model, hop)
            )?;
        }
    }
    Ok(())
}

/// Print every package with its index, class count and markers for roots
/// and cycle members.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_package_list<W: Write>(
    w: &mut W,
    model: &GraphModel,
    analytics: &Analytics,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({}):", bold("Packages", config), model.package_count())?;
    for package in model.package_ids() {
        let label = model.package_label(package).unwrap_or_default();
        let label = if analytics.is_root(package) {
            success(&label, config)
        } else {
            label
        };
        writeln!(
            w,
            "  {} {} {}",
            cycle_marker(analytics.in_cycle(package), config),
            info(&format!("{:>4}", package.0), config),
            label
        )?;
    }
    Ok(())
}

/// Print a class list panel.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_class_list<W: Write>(
    w: &mut W,
    entries: &[ClassEntry],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({}):", bold("Classes", config), entries.len())?;
    if entries.is_empty() {
        writeln!(w, "    {}", dimmed("(none)", config))?;
    }
    for entry in entries {
        writeln!(
            w,
            "  {} {} {}",
            cycle_marker(entry.in_cycle, config),
            info(&format!("{:>4}", entry.key.class), config),
            entry.label
        )?;
    }
    Ok(())
}

/// Print an import list panel.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn print_import_list<W: Write>(
    w: &mut W,
    class: &str,
    entries: &[ImportEntry],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} {} ({}):", bold("Imports of", config), class, entries.len())?;
    if entries.is_empty() {
        writeln!(w, "    {}", dimmed("(none)", config))?;
    }
    for (i, entry) in entries.iter().enumerate() {
        writeln!(
            w,
            "  {} {} {} {}",
            cycle_marker(entry.in_cycle, config),
            info(&format!("{i:>4}"), config),
            entry.qualified_name,
            dimmed(&format!("[{}]", entry.key), config)
        )?;
    }
    Ok(())
}
