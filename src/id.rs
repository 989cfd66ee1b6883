//! Module identifier codec.
//!
//! Requests for highlighted sources travel through the host's resolution
//! pipeline in three shapes:
//!
//! ```text
//! ./foo.svg?syntax          RequestId   (as written by the importer)
//!        │ resolve_id
//!        ▼
//! \0/abs/foo.svg.syntax     WrappedId   (host-hidden, type-neutral)
//!        │ load
//!        ▼
//! /abs/foo.svg              real path   (read from disk)
//! ```
//!
//! The leading `\0` tells the host and other plugins not to resolve the id any
//! further. The trailing `.syntax` hides the real extension, so the host does
//! not apply its own handling for e.g. CSS or SVG files.

use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix that opts an import into highlighting.
pub const SYNTAX_SUFFIX: &str = "?syntax";

/// Extension appended to wrapped identifiers.
pub const SYNTAX_EXTENSION: &str = ".syntax";

/// Marker prefix reserved by the host for ids that must not be resolved again.
pub const HIDDEN_MARKER: char = '\0';

// =============================================================================
// RequestId
// =============================================================================

/// An import specifier ending in [`SYNTAX_SUFFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Parse a request identifier. Returns `None` unless `id` ends in `?syntax`.
    pub fn parse(id: &str) -> Option<Self> {
        id.ends_with(SYNTAX_SUFFIX).then(|| Self(id.to_string()))
    }

    /// The module specifier the importer actually refers to.
    ///
    /// Everything before the first `?syntax`, so `a?syntax?syntax` names `a`.
    pub fn specifier(&self) -> &str {
        let end = self.0.find(SYNTAX_SUFFIX).unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// The identifier as the importer wrote it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// WrappedId
// =============================================================================

/// A resolved path wrapped for its trip through the host.
///
/// Always `\0` + real path + `.syntax`. Decoding removes exactly one marker
/// and exactly one trailing `.syntax`, so [`WrappedId::real_path`] returns the
/// path given to [`WrappedId::wrap`] for every input, including paths that
/// contain `.syntax` themselves (`report.syntax.svg`, `notes.syntax`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WrappedId(String);

impl WrappedId {
    /// Wrap a resolved real path. Total: no validation is done on `real_path`.
    pub fn wrap(real_path: &str) -> Self {
        let mut id = String::with_capacity(real_path.len() + 1 + SYNTAX_EXTENSION.len());
        id.push(HIDDEN_MARKER);
        id.push_str(real_path);
        id.push_str(SYNTAX_EXTENSION);
        Self(id)
    }

    /// Parse a string previously produced by [`WrappedId::wrap`].
    ///
    /// Returns `None` when the marker or the trailing extension is missing.
    pub fn parse(id: &str) -> Option<Self> {
        let is_wrapped = id.starts_with(HIDDEN_MARKER)
            && id.len() >= HIDDEN_MARKER.len_utf8() + SYNTAX_EXTENSION.len()
            && id.ends_with(SYNTAX_EXTENSION);
        is_wrapped.then(|| Self(id.to_string()))
    }

    /// Recover the real path this identifier was built from.
    pub fn real_path(&self) -> &str {
        let start = HIDDEN_MARKER.len_utf8();
        let end = self.0.len() - SYNTAX_EXTENSION.len();
        &self.0[start..end]
    }

    /// The wrapped string as handed to the host.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the wrapped string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WrappedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WrappedId> for String {
    fn from(id: WrappedId) -> Self {
        id.0
    }
}

/// Encode a real path. See [`WrappedId::wrap`].
pub fn wrap(real_path: &str) -> WrappedId {
    WrappedId::wrap(real_path)
}

/// Decode a wrapped identifier back to its real path.
pub fn unwrap(wrapped: &WrappedId) -> &str {
    wrapped.real_path()
}

// =============================================================================
// ModuleId
// =============================================================================

/// Any identifier a host hook may receive, classified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleId {
    /// `<specifier>?syntax`, seen by the resolve hook.
    Request(RequestId),
    /// `\0<path>.syntax`, produced by the resolve hook.
    Wrapped(WrappedId),
    /// Anything else.
    Raw(String),
}

impl ModuleId {
    /// Classify an identifier.
    pub fn parse(id: &str) -> Self {
        if let Some(request) = RequestId::parse(id) {
            return Self::Request(request);
        }
        if let Some(wrapped) = WrappedId::parse(id) {
            return Self::Wrapped(wrapped);
        }
        Self::Raw(id.to_string())
    }

    /// The file the load hook should read, if the id belongs to us.
    ///
    /// Wrapped ids decode to their real path. Raw ids ending in `.syntax`
    /// (no hidden marker) are taken verbatim, as a host may pass them through
    /// without the marker.
    pub fn load_target(&self) -> Option<LoadTarget> {
        match self {
            Self::Wrapped(wrapped) => Some(LoadTarget {
                path: PathBuf::from(wrapped.real_path()),
                carries_wrapper: false,
            }),
            Self::Raw(raw) if raw.ends_with(SYNTAX_EXTENSION) => Some(LoadTarget {
                path: PathBuf::from(raw),
                carries_wrapper: true,
            }),
            _ => None,
        }
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Request(id) => id.as_str(),
            Self::Wrapped(id) => id.as_str(),
            Self::Raw(id) => id,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LoadTarget
// =============================================================================

/// A file claimed by the load hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTarget {
    path: PathBuf,
    carries_wrapper: bool,
}

impl LoadTarget {
    /// Path to read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path still ends in the `.syntax` wrapper extension.
    pub fn carries_wrapper(&self) -> bool {
        self.carries_wrapper
    }

    /// Source extension of the file, skipping the wrapper if still present.
    pub fn extension(&self) -> Option<&str> {
        source_extension(&self.path, self.carries_wrapper)
    }
}

// =============================================================================
// Extension
// =============================================================================

/// Extract the source extension from a path.
///
/// Uses the final dot-delimited segment of the file name. With
/// `strip_wrapper`, a trailing `.syntax` component is skipped first, so
/// `foo.css.syntax` yields `css`. Returns `None` when the file name has no
/// dot or ends in one.
pub fn source_extension(path: &Path, strip_wrapper: bool) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let name = match name.strip_suffix(SYNTAX_EXTENSION) {
        Some(inner) if strip_wrapper && !inner.is_empty() => inner,
        _ => name,
    };
    let (_, extension) = name.rsplit_once('.')?;
    (!extension.is_empty()).then_some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_format() {
        assert_eq!(wrap("/abs/foo.svg").as_str(), "\0/abs/foo.svg.syntax");
    }

    #[test]
    fn test_unwrap_inverts_wrap() {
        let paths = [
            "/abs/foo.svg",
            "relative/bar.rs",
            "",
            "C:\\work\\main.c",
            "/abs/report.syntax.svg",
            "/abs/notes.syntax",
            "/abs/.syntax",
            "/üñí/cödé.ts",
        ];
        for path in paths {
            assert_eq!(unwrap(&wrap(path)), path, "round trip failed for {path:?}");
        }
    }

    #[test]
    fn test_wrapped_parse_requires_marker_and_extension() {
        assert!(WrappedId::parse("\0/abs/foo.svg.syntax").is_some());
        assert!(WrappedId::parse("/abs/foo.svg.syntax").is_none());
        assert!(WrappedId::parse("\0/abs/foo.svg").is_none());
        assert!(WrappedId::parse("\0").is_none());
    }

    #[test]
    fn test_wrapped_parse_minimal() {
        let id = WrappedId::parse("\0.syntax").unwrap();
        assert_eq!(id.real_path(), "");
    }

    #[test]
    fn test_request_specifier() {
        let id = RequestId::parse("./foo.svg?syntax").unwrap();
        assert_eq!(id.specifier(), "./foo.svg");

        let id = RequestId::parse("a?syntax?syntax").unwrap();
        assert_eq!(id.specifier(), "a");
    }

    #[test]
    fn test_request_requires_suffix() {
        assert!(RequestId::parse("./foo.svg").is_none());
        assert!(RequestId::parse("./foo.svg?syntax&raw").is_none());
        assert!(RequestId::parse("./foo.svg?raw").is_none());
    }

    #[test]
    fn test_module_id_classification() {
        assert!(matches!(ModuleId::parse("./a.css?syntax"), ModuleId::Request(_)));
        assert!(matches!(ModuleId::parse("\0/a.css.syntax"), ModuleId::Wrapped(_)));
        assert!(matches!(ModuleId::parse("/a.css"), ModuleId::Raw(_)));
    }

    #[test]
    fn test_load_target() {
        let wrapped = ModuleId::parse("\0/abs/a.css.syntax").load_target().unwrap();
        assert_eq!(wrapped.path(), Path::new("/abs/a.css"));
        assert!(!wrapped.carries_wrapper());

        let raw = ModuleId::parse("/abs/a.css.syntax").load_target().unwrap();
        assert_eq!(raw.path(), Path::new("/abs/a.css.syntax"));
        assert!(raw.carries_wrapper());
        assert_eq!(raw.extension(), Some("css"));

        assert_eq!(ModuleId::parse("/abs/a.css").load_target(), None);
        assert_eq!(ModuleId::parse("./a.css?syntax").load_target(), None);
    }

    #[test]
    fn test_wrapped_target_keeps_real_syntax_extension() {
        let notes = ModuleId::parse(wrap("/abs/notes.syntax").as_str()).load_target().unwrap();
        assert_eq!(notes.path(), Path::new("/abs/notes.syntax"));
        assert_eq!(notes.extension(), Some("syntax"));

        let report = ModuleId::parse(wrap("/abs/report.css.syntax").as_str())
            .load_target()
            .unwrap();
        assert_eq!(report.extension(), Some("syntax"));
    }

    #[test]
    fn test_source_extension() {
        assert_eq!(source_extension(Path::new("/abs/foo.svg"), false), Some("svg"));
        assert_eq!(source_extension(Path::new("/abs/foo.tar.gz"), false), Some("gz"));
        assert_eq!(source_extension(Path::new("/abs/foo.css.syntax"), true), Some("css"));
        assert_eq!(source_extension(Path::new("/abs/foo.css.syntax"), false), Some("syntax"));
        assert_eq!(source_extension(Path::new("/abs/report.syntax.svg"), true), Some("svg"));
        assert_eq!(source_extension(Path::new("/abs/.bashrc"), false), Some("bashrc"));
    }

    #[test]
    fn test_source_extension_missing() {
        assert_eq!(source_extension(Path::new("/abs/Makefile"), false), None);
        assert_eq!(source_extension(Path::new("/abs/trailing."), false), None);
        assert_eq!(source_extension(Path::new("/"), false), None);
        assert_eq!(source_extension(Path::new("/abs/notes.syntax"), true), None);
    }

    #[test]
    fn test_source_extension_bare_syntax_file() {
        // `.syntax` alone is the file's own extension, not a wrapper.
        assert_eq!(source_extension(Path::new("/abs/.syntax"), true), Some("syntax"));
    }
}
