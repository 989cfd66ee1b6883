//! Content handling: turning file text into a module body.
//!
//! ```text
//! load hook ──► ContentHandler::handle(ContentRequest)
//!                     │
//!                     └─► HighlightHandler
//!                             ├─► HighlighterFactory::create(options)  (fresh engine)
//!                             ├─► Highlighter::load_language(custom)   (if configured)
//!                             ├─► Highlighter::code_to_html(text, lang)
//!                             └─► emit_module(markup)                  (export default)
//! ```
//!
//! Any [`ContentHandler`] can be injected into the plugin; [`HighlightHandler`]
//! over [`PlainHighlighter`] is the built-in default.

mod emit;
mod highlight;
mod plain;

use async_trait::async_trait;

use crate::config::{HighlightOptions, LanguageRegistration, LoadOptions};
use crate::diagnostic::Result;

pub use emit::{emit_module, EXPORT_PREFIX};
pub use highlight::{HighlightHandler, Highlighter, HighlighterFactory};
pub use plain::{PlainHighlighter, PlainHighlighterFactory, BUILTIN_LANGUAGES, DEFAULT_THEME};

/// The module body a load hook hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    /// JavaScript module source.
    pub code: String,
}

impl LoadResult {
    /// Wrap module source.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Everything a handler gets for one loaded file.
#[derive(Debug, Clone, Copy)]
pub struct ContentRequest<'a> {
    /// File text.
    pub content: &'a str,
    /// Engine options, as configured.
    pub options: &'a HighlightOptions,
    /// Language resolved from the file extension.
    pub language: &'a str,
    /// Flags from the host's load call.
    pub load_options: LoadOptions,
    /// Custom language to load before highlighting.
    pub custom_language: Option<&'a LanguageRegistration>,
}

/// The transform injected into the plugin.
///
/// Errors are not recovered by the plugin; they reach the host as build
/// errors.
#[async_trait]
pub trait ContentHandler: Send + Sync {
    /// Produce the module body for one file.
    async fn handle(&self, request: ContentRequest<'_>) -> Result<LoadResult>;
}

#[async_trait]
impl<H: ContentHandler + ?Sized> ContentHandler for std::sync::Arc<H> {
    async fn handle(&self, request: ContentRequest<'_>) -> Result<LoadResult> {
        (**self).handle(request).await
    }
}

#[async_trait]
impl<H: ContentHandler + ?Sized> ContentHandler for Box<H> {
    async fn handle(&self, request: ContentRequest<'_>) -> Result<LoadResult> {
        (**self).handle(request).await
    }
}
