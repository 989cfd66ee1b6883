//! Plugin configuration.
//!
//! Options are captured once at construction and never mutated afterwards.
//! Build them with [`ConfigBuilder`], or from a JSON options object with
//! [`SyntaxHighlightOptions::from_json`]:
//!
//! ```ignore
//! use syntax_highlight::config::{ConfigBuilder, SyntaxHighlightOptions};
//! use serde_json::json;
//!
//! let options = ConfigBuilder::new()
//!     .map_extension("svg", "markup")
//!     .option("theme", "nord")
//!     .build();
//!
//! // Same thing from JSON: `mapExtension` is split off, the rest is passed
//! // through to the highlighting engine.
//! let options = SyntaxHighlightOptions::from_json(&json!({
//!     "mapExtension": { "svg": "markup" },
//!     "theme": "nord",
//! }))?;
//! ```

use serde_json::{Map, Value};

use crate::diagnostic::{json_type, ConfigError};
use crate::language::ExtensionMap;

/// JSON key holding extension overrides.
pub const MAP_EXTENSION_KEY: &str = "mapExtension";

// =============================================================================
// HighlightOptions
// =============================================================================

/// Opaque options bag for the highlighting engine.
///
/// The plugin never reads it; it is handed to the content handler unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightOptions(Map<String, Value>);

impl HighlightOptions {
    /// Create an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for HighlightOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// =============================================================================
// LanguageRegistration
// =============================================================================

/// A custom language loaded into the engine before each transform.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRegistration {
    /// Language identifier, e.g. `"mylang"`.
    pub id: String,
    /// TextMate-style root scope, e.g. `"source.mylang"`.
    pub scope_name: String,
    /// Additional identifiers resolving to this language.
    pub aliases: Vec<String>,
    /// Engine-specific grammar definition.
    pub grammar: Value,
}

impl LanguageRegistration {
    /// Create a registration with no aliases and an empty grammar.
    pub fn new(id: impl Into<String>, scope_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scope_name: scope_name.into(),
            aliases: Vec::new(),
            grammar: Value::Object(Map::new()),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the grammar definition.
    pub fn with_grammar(mut self, grammar: Value) -> Self {
        self.grammar = grammar;
        self
    }

    /// Parse `{ "id", "scopeName", "aliases"?, "grammar"? }`.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject {
            found: json_type(value),
        })?;

        let string_field = |field: &'static str| -> Result<String, ConfigError> {
            match object.get(field) {
                Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
                Some(Value::String(_)) => Err(ConfigError::InvalidLanguage {
                    field,
                    reason: "must not be empty",
                }),
                Some(_) => Err(ConfigError::InvalidLanguage {
                    field,
                    reason: "must be a string",
                }),
                None => Err(ConfigError::InvalidLanguage {
                    field,
                    reason: "is required",
                }),
            }
        };

        let aliases = match object.get("aliases") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or(ConfigError::InvalidLanguage {
                        field: "aliases",
                        reason: "must contain only strings",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ConfigError::InvalidLanguage {
                    field: "aliases",
                    reason: "must be an array",
                });
            }
        };

        Ok(Self {
            id: string_field("id")?,
            scope_name: string_field("scopeName")?,
            aliases,
            grammar: object.get("grammar").cloned().unwrap_or(Value::Object(Map::new())),
        })
    }

    /// The id followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// =============================================================================
// LoadOptions
// =============================================================================

/// Per-call flags from the host's load hook, forwarded uninterpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// The module is being loaded for server-side rendering.
    pub ssr: bool,
}

impl LoadOptions {
    /// Options for a server-side render load.
    pub fn ssr() -> Self {
        Self { ssr: true }
    }
}

// =============================================================================
// SyntaxHighlightOptions
// =============================================================================

/// Construction options: extension overrides plus pass-through engine options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxHighlightOptions {
    /// Default mapping overlaid with user overrides.
    pub map_extension: ExtensionMap,
    /// Everything else, for the engine.
    pub highlight: HighlightOptions,
}

impl SyntaxHighlightOptions {
    /// Default options: `svg` → `xml`, no engine options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON options object.
    ///
    /// `mapExtension` (an object of strings) is merged over the defaults; all
    /// other keys become [`HighlightOptions`]. `null` yields the defaults.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let object = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(object) => object,
            other => {
                return Err(ConfigError::NotAnObject {
                    found: json_type(other),
                });
            }
        };

        let mut options = Self::default();
        for (key, value) in object {
            if key == MAP_EXTENSION_KEY {
                options.map_extension.merge(parse_mapping(value)?);
            } else {
                options.highlight.insert(key.clone(), value.clone());
            }
        }
        Ok(options)
    }
}

fn parse_mapping(value: &Value) -> Result<Vec<(String, String)>, ConfigError> {
    let object = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(object) => object,
        other => {
            return Err(ConfigError::InvalidMapping {
                extension: String::new(),
                found: json_type(other),
            });
        }
    };

    object
        .iter()
        .map(|(extension, language)| match language {
            Value::String(language) => Ok((extension.clone(), language.clone())),
            other => Err(ConfigError::InvalidMapping {
                extension: extension.clone(),
                found: json_type(other),
            }),
        })
        .collect()
}

// =============================================================================
// ConfigBuilder
// =============================================================================

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    overrides: Vec<(String, String)>,
    highlight: HighlightOptions,
    no_defaults: bool,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `extension` to `language`, overriding the defaults.
    pub fn map_extension(
        mut self,
        extension: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.overrides.push((extension.into(), language.into()));
        self
    }

    /// Map several extensions at once.
    pub fn map_extensions<I, E, L>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (E, L)>,
        E: Into<String>,
        L: Into<String>,
    {
        self.overrides
            .extend(entries.into_iter().map(|(e, l)| (e.into(), l.into())));
        self
    }

    /// Start from an empty mapping instead of the built-in defaults.
    pub fn without_default_mapping(mut self) -> Self {
        self.no_defaults = true;
        self
    }

    /// Set a pass-through engine option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.highlight.insert(key, value);
        self
    }

    /// Build the options.
    pub fn build(self) -> SyntaxHighlightOptions {
        let base = if self.no_defaults {
            ExtensionMap::empty()
        } else {
            ExtensionMap::default()
        };
        SyntaxHighlightOptions {
            map_extension: base.with_overrides(self.overrides),
            highlight: self.highlight,
        }
    }
}
