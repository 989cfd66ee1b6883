//! Extension to language mapping.

use rustc_hash::FxHashMap;

/// Built-in mapping entries, overridable by the user.
const DEFAULT_MAPPING: &[(&str, &str)] = &[("svg", "xml")];

/// Maps bare file extensions to engine language identifiers.
///
/// Unknown extensions pass through unchanged: they are assumed to already be
/// valid language identifiers (`rs`, `css`, `ts`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    entries: FxHashMap<String, String>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MAPPING
                .iter()
                .map(|(ext, lang)| ((*ext).to_string(), (*lang).to_string()))
                .collect(),
        }
    }
}

impl ExtensionMap {
    /// A mapping with the built-in defaults (`svg` → `xml`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping with no entries at all.
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Insert or replace one entry.
    pub fn insert(&mut self, extension: impl Into<String>, language: impl Into<String>) {
        self.entries.insert(extension.into(), language.into());
    }

    /// Overlay `overrides` onto this mapping. Later entries win.
    pub fn merge<I, E, L>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (E, L)>,
        E: Into<String>,
        L: Into<String>,
    {
        for (extension, language) in overrides {
            self.insert(extension, language);
        }
    }

    /// Builder-style [`merge`](Self::merge).
    pub fn with_overrides<I, E, L>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (E, L)>,
        E: Into<String>,
        L: Into<String>,
    {
        self.merge(overrides);
        self
    }

    /// Explicit entry for `extension`, if any.
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.entries.get(extension).map(String::as_str)
    }

    /// Language for `extension`, falling back to the extension itself.
    pub fn language_for<'a>(&'a self, extension: &'a str) -> &'a str {
        self.get(extension).unwrap_or(extension)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
