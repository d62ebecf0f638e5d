//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (roots, clean checks)
//!   - Warning:   yellow  (cycle members, consistency findings)
//!   - Error:     red     (errors)
//!   - Info:      cyan    (indices, arrows)
//!   - Muted:     dimmed  (field labels, counts)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
#[must_use]
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
#[must_use]
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
#[must_use]
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
#[must_use]
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Arrow between packages of a cycle path.
pub(crate) fn arrow(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "->" } else { "→" }
}

/// Marker shown next to entries that touch a cycle, with ASCII fallback.
pub(crate) fn cycle_marker(in_cycle: bool, config: &OutputConfig) -> String {
    if !in_cycle {
        return " ".to_string();
    }
    let icon = if config.use_ascii { "*" } else { "↻" };
    warning(icon, config)
}
