//! Built-in engine: escaped, line-wrapped markup without tokenization.

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use super::highlight::{Highlighter, HighlighterFactory};
use crate::config::{HighlightOptions, LanguageRegistration};
use crate::diagnostic::{PluginError, Result};

/// Theme used when the options carry none.
pub const DEFAULT_THEME: &str = "nord";

/// Languages loaded when the options do not restrict them with `langs`.
pub const BUILTIN_LANGUAGES: &[&str] = &[
    "bash", "c", "cpp", "csharp", "css", "diff", "dockerfile", "go", "graphql", "html", "ini",
    "java", "javascript", "json", "jsx", "kotlin", "less", "lua", "makefile", "markdown", "php",
    "python", "ruby", "rust", "scss", "shellscript", "sql", "svelte", "swift", "toml", "tsx",
    "typescript", "vue", "xml", "yaml",
];

/// Short names resolved to a builtin language.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("cs", "csharp"),
    ("js", "javascript"),
    ("md", "markdown"),
    ("py", "python"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("sh", "shellscript"),
    ("shell", "shellscript"),
    ("ts", "typescript"),
    ("yml", "yaml"),
    ("zsh", "shellscript"),
];

/// Plain-text languages every instance accepts.
const PLAIN_LANGUAGES: &[&str] = &["text", "txt", "plaintext"];

// =============================================================================
// PlainHighlighter
// =============================================================================

/// Engine that escapes source text and wraps each line in a span.
///
/// ```text
/// <pre class="syntax nord" data-language="css"><code><span class="line">a { }</span></code></pre>
/// ```
///
/// Languages are checked against the loaded set, so an unknown identifier
/// fails the same way a tokenizing engine would.
#[derive(Debug, Clone)]
pub struct PlainHighlighter {
    theme: String,
    languages: FxHashSet<String>,
    aliases: FxHashMap<String, String>,
}

impl Default for PlainHighlighter {
    fn default() -> Self {
        Self::with_languages(DEFAULT_THEME, BUILTIN_LANGUAGES.iter().copied())
    }
}

impl PlainHighlighter {
    /// Create an instance with `theme` and the given languages loaded.
    pub fn with_languages<'a>(
        theme: impl Into<String>,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let languages: FxHashSet<String> = languages.into_iter().map(str::to_string).collect();
        let aliases = BUILTIN_ALIASES
            .iter()
            .filter(|(_, target)| languages.contains(*target))
            .map(|(alias, target)| ((*alias).to_string(), (*target).to_string()))
            .collect();
        Self {
            theme: theme.into(),
            languages,
            aliases,
        }
    }

    /// Create an instance from engine options.
    ///
    /// Reads `theme` (string) and `langs` (array of strings). Other keys are
    /// ignored.
    pub fn from_options(options: &HighlightOptions) -> Result<Self> {
        let theme = match options.get("theme") {
            None | Some(Value::Null) => DEFAULT_THEME,
            Some(Value::String(theme)) => theme.as_str(),
            Some(_) => return Err(PluginError::engine("option `theme` must be a string")),
        };

        match options.get("langs") {
            None | Some(Value::Null) => {
                Ok(Self::with_languages(theme, BUILTIN_LANGUAGES.iter().copied()))
            }
            Some(Value::Array(items)) => {
                let langs = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            PluginError::engine("option `langs` must contain only strings")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::with_languages(theme, langs))
            }
            Some(_) => Err(PluginError::engine("option `langs` must be an array")),
        }
    }

    /// Active theme name.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Canonical name of a loaded language, following aliases.
    pub fn resolve_language<'a>(&'a self, language: &'a str) -> Option<&'a str> {
        if PLAIN_LANGUAGES.contains(&language) || self.languages.contains(language) {
            return Some(language);
        }
        self.aliases.get(language).map(String::as_str)
    }
}

impl Highlighter for PlainHighlighter {
    fn load_language(&mut self, language: &LanguageRegistration) -> Result<()> {
        if language.id.is_empty() || language.scope_name.is_empty() {
            return Err(PluginError::InvalidGrammar {
                id: language.id.clone(),
                reason: "id and scope name are required".to_string(),
            });
        }
        if !language.grammar.is_object() {
            return Err(PluginError::InvalidGrammar {
                id: language.id.clone(),
                reason: "grammar must be an object".to_string(),
            });
        }

        self.languages.insert(language.id.clone());
        for alias in &language.aliases {
            self.aliases.insert(alias.clone(), language.id.clone());
        }
        Ok(())
    }

    fn code_to_html(&self, code: &str, language: &str) -> Result<String> {
        let language = self
            .resolve_language(language)
            .ok_or_else(|| PluginError::UnknownLanguage {
                language: language.to_string(),
            })?;

        let mut html = String::with_capacity(code.len() + 96);
        html.push_str("<pre class=\"syntax ");
        escape_into(&mut html, &self.theme);
        html.push_str("\" data-language=\"");
        escape_into(&mut html, language);
        html.push_str("\"><code>");
        for (index, line) in code.lines().enumerate() {
            if index > 0 {
                html.push('\n');
            }
            html.push_str("<span class=\"line\">");
            escape_into(&mut html, line);
            html.push_str("</span>");
        }
        html.push_str("</code></pre>");
        Ok(html)
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

// =============================================================================
// PlainHighlighterFactory
// =============================================================================

/// Factory for [`PlainHighlighter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighterFactory;

#[async_trait]
impl HighlighterFactory for PlainHighlighterFactory {
    type Highlighter = PlainHighlighter;

    async fn create(&self, options: &HighlightOptions) -> Result<PlainHighlighter> {
        PlainHighlighter::from_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escapes_and_wraps_lines() {
        let engine = PlainHighlighter::default();
        let html = engine.code_to_html("<svg/>\n  <g a=\"1\"/>", "xml").unwrap();
        assert_eq!(
            html,
            "<pre class=\"syntax nord\" data-language=\"xml\"><code>\
             <span class=\"line\">&lt;svg/&gt;</span>\n\
             <span class=\"line\">  &lt;g a=&quot;1&quot;/&gt;</span>\
             </code></pre>"
        );
    }

    #[test]
    fn test_crlf_lines() {
        let engine = PlainHighlighter::default();
        let html = engine.code_to_html("a\r\nb", "text").unwrap();
        assert!(html.contains("<span class=\"line\">a</span>\n<span class=\"line\">b</span>"));
    }

    #[test]
    fn test_unknown_language() {
        let engine = PlainHighlighter::default();
        let err = engine.code_to_html("x", "svg").unwrap_err();
        assert!(matches!(err, PluginError::UnknownLanguage { language } if language == "svg"));
    }

    #[test]
    fn test_aliases() {
        let engine = PlainHighlighter::default();
        assert_eq!(engine.resolve_language("rs"), Some("rust"));
        assert_eq!(engine.resolve_language("text"), Some("text"));
        let html = engine.code_to_html("fn main() {}", "ts").unwrap();
        assert!(html.contains("data-language=\"typescript\""));
    }

    #[test]
    fn test_from_options() {
        let mut options = HighlightOptions::new();
        options.insert("theme", "github-dark");
        options.insert("langs", json!(["css"]));
        let engine = PlainHighlighter::from_options(&options).unwrap();

        assert_eq!(engine.theme(), "github-dark");
        assert!(engine.code_to_html("a{}", "css").is_ok());
        assert!(engine.code_to_html("x", "rust").is_err());
    }

    #[test]
    fn test_from_options_rejects_bad_values() {
        let mut options = HighlightOptions::new();
        options.insert("theme", 3);
        assert!(PlainHighlighter::from_options(&options).is_err());

        let mut options = HighlightOptions::new();
        options.insert("langs", "css");
        assert!(PlainHighlighter::from_options(&options).is_err());
    }

    #[test]
    fn test_load_custom_language() {
        let mut engine = PlainHighlighter::default();
        let lang = LanguageRegistration::new("mylang", "source.mylang").with_alias("ml");
        engine.load_language(&lang).unwrap();

        assert_eq!(engine.resolve_language("mylang"), Some("mylang"));
        assert_eq!(engine.resolve_language("ml"), Some("mylang"));
    }

    #[test]
    fn test_load_invalid_grammar() {
        let mut engine = PlainHighlighter::default();
        let lang = LanguageRegistration::new("bad", "source.bad").with_grammar(json!("nope"));
        assert!(matches!(
            engine.load_language(&lang),
            Err(PluginError::InvalidGrammar { .. })
        ));
    }
}
