//! Error types.

use thiserror::Error;

/// Result type for hook and handler operations.
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors that escape the plugin hooks.
///
/// Expected misses (unresolvable request, unreadable file, missing extension)
/// are not errors: they become a [`Warning`](super::Warning) and a fallback
/// result. Everything here is surfaced to the host as a build error.
///
/// # Example
///
/// ```ignore
/// match plugin.load(&ctx, id, &LoadOptions::default()).await {
///     Ok(outcome) => { /* hand to the host */ }
///     Err(PluginError::UnknownLanguage { language }) => {
///         eprintln!("no grammar for {language}");
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PluginError {
    /// The host's own resolution procedure failed.
    #[error("host resolution failed for \"{specifier}\": {message}")]
    Host {
        /// Specifier passed to the host.
        specifier: String,
        /// Message reported by the host.
        message: String,
    },

    /// The highlighting engine has no grammar for the language.
    #[error("language \"{language}\" is not loaded")]
    UnknownLanguage {
        /// Requested language identifier.
        language: String,
    },

    /// A custom language registration was rejected by the engine.
    #[error("invalid language registration \"{id}\": {reason}")]
    InvalidGrammar {
        /// Identifier of the rejected language.
        id: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Any other engine failure (initialization, tokenization).
    #[error("highlighter error: {0}")]
    Engine(String),

    /// Rendered markup could not be serialized into a module body.
    #[error("failed to emit module: {0}")]
    Emit(#[from] serde_json::Error),
}

impl PluginError {
    /// Create a host resolution error.
    pub fn host(specifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            specifier: specifier.into(),
            message: message.into(),
        }
    }

    /// Create an engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}

/// Errors raised while building plugin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options must be a JSON object.
    #[error("expected an options object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// `mapExtension` is present but malformed.
    #[error(
        "invalid mapExtension entry \"{extension}\": expected a string language, found {found}"
    )]
    InvalidMapping {
        /// Offending key (empty when `mapExtension` itself is not an object).
        extension: String,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A required field of a custom language is missing or mistyped.
    #[error("invalid custom language: field \"{field}\" {reason}")]
    InvalidLanguage {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = PluginError::host("./a.css", "boom");
        assert_eq!(err.to_string(), "host resolution failed for \"./a.css\": boom");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidMapping {
            extension: "svg".into(),
            found: "number",
        };
        assert!(err.to_string().contains("\"svg\""));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_json_type() {
        assert_eq!(json_type(&serde_json::json!([])), "array");
        assert_eq!(json_type(&serde_json::json!(1)), "number");
    }
}
