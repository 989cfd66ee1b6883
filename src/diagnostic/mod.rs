//! Warnings and errors reported by the plugin.

mod error;
mod format;
mod warning;

pub use error::{ConfigError, PluginError, Result};
pub(crate) use error::json_type;
pub use format::{format_warning, format_warnings, WarningOptions};
pub use warning::{Warning, WarningKind};
