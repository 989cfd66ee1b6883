//! Warning formatting for terminal and log output.

use std::fmt::Write;

use super::warning::Warning;

// ============================================================================
// Options
// ============================================================================

/// Options for controlling warning formatting.
///
/// # Example
///
/// ```ignore
/// use syntax_highlight::diagnostic::WarningOptions;
///
/// // Default: colored output with details
/// let opts = WarningOptions::default();
///
/// // Plain text (no ANSI colors) for logging
/// let opts = WarningOptions::plain();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WarningOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Whether to include the detail line (e.g. the I/O error).
    pub details: bool,
    /// Plugin name prefix, e.g. `[syntax-highlight]`.
    pub prefix: bool,
}

impl Default for WarningOptions {
    fn default() -> Self {
        Self {
            colored: true,
            details: true,
            prefix: true,
        }
    }
}

impl WarningOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self::default()
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set whether to include detail lines.
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    /// Set whether to print the plugin name prefix.
    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }
}

// ============================================================================
// Coloring
// ============================================================================

#[cfg(feature = "colored-diagnostics")]
fn paint_label(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.yellow().bold().to_string()
}

#[cfg(feature = "colored-diagnostics")]
fn paint_detail(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.dimmed().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn paint_label(text: &str) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn paint_detail(text: &str) -> String {
    text.to_owned()
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a single warning.
///
/// ```text
/// warning[syntax-highlight]: "./a.css?syntax" couldn't be resolved, falling back to default
/// ```
pub fn format_warning(warning: &Warning, options: &WarningOptions) -> String {
    let mut out = String::new();
    write_warning(&mut out, warning, options);
    out
}

/// Format several warnings, one per line (details indented below).
pub fn format_warnings(warnings: &[Warning], options: &WarningOptions) -> String {
    let mut out = String::new();
    for warning in warnings {
        write_warning(&mut out, warning, options);
        out.push('\n');
    }
    out
}

fn write_warning(out: &mut String, warning: &Warning, options: &WarningOptions) {
    let label = if options.prefix {
        format!("warning[{}]", crate::PLUGIN_NAME)
    } else {
        "warning".to_string()
    };
    let label = if options.colored { paint_label(&label) } else { label };
    let _ = write!(out, "{label}: {warning}");

    if options.details
        && let Some(detail) = warning.detail()
    {
        let line = format!("  = {detail}");
        let line = if options.colored { paint_detail(&line) } else { line };
        let _ = write!(out, "\n{line}");
    }
}
