//! Non-fatal warnings emitted through the host.

use std::fmt;

use crate::id::HIDDEN_MARKER;

/// A recovered failure. The build continues with default handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The host could not resolve the specifier behind a `?syntax` request.
    Unresolved {
        /// The request identifier as written by the importer.
        id: String,
    },
    /// The resolved file could not be read at load time.
    Unreadable {
        /// The identifier passed to the load hook.
        id: String,
        /// I/O error message.
        reason: String,
    },
    /// The resolved file has no extension to infer a language from.
    MissingExtension {
        /// The identifier passed to the load hook.
        id: String,
    },
}

impl Warning {
    /// The offending identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Unresolved { id }
            | Self::Unreadable { id, .. }
            | Self::MissingExtension { id } => id,
        }
    }

    /// Short machine-readable kind.
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::Unresolved { .. } => WarningKind::Unresolved,
            Self::Unreadable { .. } => WarningKind::Unreadable,
            Self::MissingExtension { .. } => WarningKind::MissingExtension,
        }
    }

    /// Optional detail printed below the main message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unreadable { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { id } => {
                let id = QuotedId(id);
                write!(f, "{id} couldn't be resolved, falling back to default")
            }
            Self::Unreadable { id, .. } => {
                let id = QuotedId(id);
                write!(f, "{id} couldn't be loaded, falling back to default")
            }
            Self::MissingExtension { id } => {
                let id = QuotedId(id);
                write!(f, "{id} doesn't have an extension, falling back to default")
            }
        }
    }
}

/// Identifier in double quotes with the hidden marker spelled as `\0`.
///
/// Every other character, backslashes included, is written as is.
struct QuotedId<'a>(&'a str);

impl fmt::Display for QuotedId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        let mut parts = self.0.split(HIDDEN_MARKER);
        if let Some(first) = parts.next() {
            f.write_str(first)?;
        }
        for part in parts {
            f.write_str("\\0")?;
            f.write_str(part)?;
        }
        f.write_str("\"")
    }
}

/// Discriminant of [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// See [`Warning::Unresolved`].
    Unresolved,
    /// See [`Warning::Unreadable`].
    Unreadable,
    /// See [`Warning::MissingExtension`].
    MissingExtension,
}

impl WarningKind {
    /// Stable name, e.g. for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Unreadable => "unreadable",
            Self::MissingExtension => "missing-extension",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_marker() {
        let warning = Warning::MissingExtension {
            id: "\0/abs/Makefile.syntax".into(),
        };
        assert_eq!(
            warning.to_string(),
            "\"\\0/abs/Makefile.syntax\" doesn't have an extension, falling back to default"
        );
    }

    #[test]
    fn test_display_keeps_backslashes() {
        let warning = Warning::Unreadable {
            id: "\0C:\\work\\a.css.syntax".into(),
            reason: "access denied".into(),
        };
        assert_eq!(
            warning.to_string(),
            r#""\0C:\work\a.css.syntax" couldn't be loaded, falling back to default"#
        );

        let warning = Warning::Unresolved {
            id: "./say \"hi\".css?syntax".into(),
        };
        assert_eq!(
            warning.to_string(),
            r#""./say "hi".css?syntax" couldn't be resolved, falling back to default"#
        );
    }

    #[test]
    fn test_unresolved_display() {
        let warning = Warning::Unresolved {
            id: "./missing.css?syntax".into(),
        };
        assert_eq!(
            warning.to_string(),
            "\"./missing.css?syntax\" couldn't be resolved, falling back to default"
        );
        assert_eq!(warning.kind(), WarningKind::Unresolved);
        assert_eq!(warning.detail(), None);
    }

    #[test]
    fn test_unreadable_detail() {
        let warning = Warning::Unreadable {
            id: "\0/abs/a.css.syntax".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(warning.id(), "\0/abs/a.css.syntax");
        assert_eq!(warning.detail(), Some("No such file or directory"));
        assert_eq!(warning.kind().as_str(), "unreadable");
    }
}
