//! Engine-driven content handler.

use async_trait::async_trait;

use super::emit::emit_module;
use super::{ContentHandler, ContentRequest, LoadResult};
use crate::config::{HighlightOptions, LanguageRegistration};
use crate::diagnostic::Result;

/// A highlighting engine instance.
pub trait Highlighter: Send {
    /// Register an additional language with this instance.
    fn load_language(&mut self, language: &LanguageRegistration) -> Result<()>;

    /// Render `code` as markup for `language`.
    fn code_to_html(&self, code: &str, language: &str) -> Result<String>;
}

/// Creates engine instances from the configured options.
#[async_trait]
pub trait HighlighterFactory: Send + Sync {
    /// Engine type produced by this factory.
    type Highlighter: Highlighter;

    /// Initialize a new engine.
    async fn create(&self, options: &HighlightOptions) -> Result<Self::Highlighter>;
}

/// Default handler: a fresh engine per call, markup exported as a string.
///
/// No engine is shared between loads, so concurrent loads never contend on
/// engine state.
#[derive(Debug, Clone, Default)]
pub struct HighlightHandler<F> {
    factory: F,
}

impl<F: HighlighterFactory> HighlightHandler<F> {
    /// Create a handler over `factory`.
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// The engine factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }
}

#[async_trait]
impl<F: HighlighterFactory> ContentHandler for HighlightHandler<F> {
    async fn handle(&self, request: ContentRequest<'_>) -> Result<LoadResult> {
        let mut engine = self.factory.create(request.options).await?;
        if let Some(custom) = request.custom_language {
            engine.load_language(custom)?;
        }
        let markup = engine.code_to_html(request.content, request.language)?;
        tracing::trace!(
            language = request.language,
            bytes = markup.len(),
            "rendered highlighted markup"
        );
        Ok(LoadResult::new(emit_module(&markup)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::diagnostic::PluginError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine that renders `lang:code` and counts instances.
    #[derive(Default)]
    struct EchoFactory {
        created: AtomicUsize,
    }

    struct EchoEngine {
        extra: Vec<String>,
    }

    impl Highlighter for EchoEngine {
        fn load_language(&mut self, language: &LanguageRegistration) -> Result<()> {
            self.extra.push(language.id.clone());
            Ok(())
        }

        fn code_to_html(&self, code: &str, language: &str) -> Result<String> {
            if language == "broken" && !self.extra.iter().any(|l| l == "broken") {
                return Err(PluginError::UnknownLanguage {
                    language: language.to_string(),
                });
            }
            Ok(format!("{language}:{code}"))
        }
    }

    #[async_trait]
    impl HighlighterFactory for EchoFactory {
        type Highlighter = EchoEngine;

        async fn create(&self, _options: &HighlightOptions) -> Result<EchoEngine> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(EchoEngine { extra: Vec::new() })
        }
    }

    fn request<'a>(
        content: &'a str,
        options: &'a HighlightOptions,
        language: &'a str,
        custom: Option<&'a LanguageRegistration>,
    ) -> ContentRequest<'a> {
        ContentRequest {
            content,
            options,
            language,
            load_options: LoadOptions::default(),
            custom_language: custom,
        }
    }

    #[tokio::test]
    async fn test_handle_emits_module() {
        let handler = HighlightHandler::new(EchoFactory::default());
        let options = HighlightOptions::new();
        let result = handler.handle(request("<svg/>", &options, "xml", None)).await.unwrap();
        assert_eq!(result.code, r#"export default "xml:<svg/>""#);
    }

    #[tokio::test]
    async fn test_engine_created_per_call() {
        let handler = HighlightHandler::new(EchoFactory::default());
        let options = HighlightOptions::new();
        handler.handle(request("a", &options, "css", None)).await.unwrap();
        handler.handle(request("b", &options, "css", None)).await.unwrap();
        assert_eq!(handler.factory().created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_custom_language_loaded_first() {
        let handler = HighlightHandler::new(EchoFactory::default());
        let options = HighlightOptions::new();
        let custom = LanguageRegistration::new("broken", "source.broken");

        let err = handler
            .handle(request("x", &options, "broken", None))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::UnknownLanguage { .. }));

        let ok = handler
            .handle(request("x", &options, "broken", Some(&custom)))
            .await
            .unwrap();
        assert_eq!(ok.code, r#"export default "broken:x""#);
    }
}
