//! Resolution and load orchestration.
//!
//! # Example
//!
//! ```ignore
//! use syntax_highlight::prelude::*;
//!
//! let plugin = SyntaxHighlight::with_default_handler(
//!     ConfigBuilder::new().map_extension("svg", "markup").build(),
//!     None,
//! );
//!
//! // Called by the host for every import.
//! let request = "./logo.svg?syntax";
//! if let Some(wrapped) = plugin.resolve_id(&ctx, request, Some(importer), &opts).await? {
//!     match plugin.load(&ctx, wrapped.as_str(), &LoadOptions::default()).await? {
//!         LoadOutcome::Loaded(result) => emit(result.code),
//!         LoadOutcome::Empty => { /* host falls back to default content */ }
//!         LoadOutcome::NotHandled => { /* next plugin */ }
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::config::{HighlightOptions, LanguageRegistration, LoadOptions, SyntaxHighlightOptions};
use crate::diagnostic::{Result, Warning};
use crate::handler::{
    ContentHandler, ContentRequest, HighlightHandler, LoadResult, PlainHighlighterFactory,
};
use crate::host::{PluginContext, ResolveOptions};
use crate::id::{wrap, LoadTarget, ModuleId, RequestId, WrappedId};
use crate::language::ExtensionMap;

/// Name reported to the host.
pub const PLUGIN_NAME: &str = "syntax-highlight";

// =============================================================================
// Hook results
// =============================================================================

/// Result of the load hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The id does not belong to this plugin; ask the next one.
    NotHandled,
    /// The id is ours but there is nothing to contribute (a warning was
    /// emitted); the host uses its default content.
    Empty,
    /// The transformed module.
    Loaded(LoadResult),
}

impl LoadOutcome {
    /// The module body, if any.
    pub fn into_result(self) -> Option<LoadResult> {
        match self {
            Self::Loaded(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the plugin claimed the id.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::NotHandled)
    }
}

/// When the host should run this plugin relative to its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    /// Before the host's core plugins.
    Pre,
    /// After the host's core plugins.
    Post,
}

// =============================================================================
// Plugin Trait
// =============================================================================

/// Host-facing plugin surface.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name.
    fn name(&self) -> &'static str;

    /// Ordering hint, if any.
    fn enforce(&self) -> Option<Enforce> {
        None
    }

    /// Claim and rewrite an import identifier, or return `None` to defer.
    async fn resolve_id(
        &self,
        ctx: &dyn PluginContext,
        id: &str,
        importer: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Option<WrappedId>>;

    /// Produce module content for a resolved identifier.
    async fn load(
        &self,
        ctx: &dyn PluginContext,
        id: &str,
        options: &LoadOptions,
    ) -> Result<LoadOutcome>;
}

// =============================================================================
// SyntaxHighlight
// =============================================================================

/// The `?syntax` plugin.
///
/// Holds only configuration fixed at construction; both hooks take `&self`,
/// so one instance serves any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct SyntaxHighlight<H> {
    map_extension: ExtensionMap,
    highlight: HighlightOptions,
    custom_language: Option<LanguageRegistration>,
    handler: H,
}

impl SyntaxHighlight<HighlightHandler<PlainHighlighterFactory>> {
    /// Create a plugin backed by the built-in
    /// [`PlainHighlighter`](crate::handler::PlainHighlighter).
    pub fn with_default_handler(
        options: SyntaxHighlightOptions,
        custom_language: Option<LanguageRegistration>,
    ) -> Self {
        Self::new(
            HighlightHandler::new(PlainHighlighterFactory),
            options,
            custom_language,
        )
    }
}

impl<H: ContentHandler> SyntaxHighlight<H> {
    /// Create a plugin that hands file contents to `handler`.
    pub fn new(
        handler: H,
        options: SyntaxHighlightOptions,
        custom_language: Option<LanguageRegistration>,
    ) -> Self {
        let SyntaxHighlightOptions {
            map_extension,
            highlight,
        } = options;
        Self {
            map_extension,
            highlight,
            custom_language,
            handler,
        }
    }

    /// Merged extension mapping.
    pub fn map_extension(&self) -> &ExtensionMap {
        &self.map_extension
    }

    /// Engine options passed to the handler.
    pub fn highlight_options(&self) -> &HighlightOptions {
        &self.highlight
    }

    /// Custom language passed to the handler.
    pub fn custom_language(&self) -> Option<&LanguageRegistration> {
        self.custom_language.as_ref()
    }

    /// The injected handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Resolve hook.
    ///
    /// Claims ids ending in `?syntax`, resolves the underlying specifier
    /// through the host (with `skip_self`), and returns the wrapped path.
    /// A host miss emits [`Warning::Unresolved`] and returns `None`.
    pub async fn resolve_id<C>(
        &self,
        ctx: &C,
        id: &str,
        importer: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Option<WrappedId>>
    where
        C: PluginContext + ?Sized,
    {
        let Some(request) = RequestId::parse(id) else {
            return Ok(None);
        };

        let specifier = request.specifier();
        let resolution = ctx
            .resolve(specifier, importer, &options.skipping_self())
            .await?;

        let Some(resolved) = resolution else {
            tracing::debug!(id, importer, "host could not resolve highlighted import");
            ctx.warn(Warning::Unresolved { id: id.to_string() });
            return Ok(None);
        };

        let wrapped = wrap(&resolved.id);
        tracing::trace!(id, resolved = %resolved.id, "wrapped highlighted import");
        Ok(Some(wrapped))
    }

    /// Load hook.
    ///
    /// Claims ids ending in `.syntax`, reads the real file, picks the language
    /// from its extension and hands everything to the content handler.
    /// Unreadable files and paths without an extension emit a warning and
    /// yield [`LoadOutcome::Empty`]. Handler errors propagate.
    pub async fn load<C>(&self, ctx: &C, id: &str, options: &LoadOptions) -> Result<LoadOutcome>
    where
        C: PluginContext + ?Sized,
    {
        let Some(target) = ModuleId::parse(id).load_target() else {
            return Ok(LoadOutcome::NotHandled);
        };
        let path = target.path();

        let content = match tokio::fs::read(path).await {
            Ok(bytes) => decode_lossy(bytes),
            Err(err) => {
                tracing::debug!(
                    id,
                    path = %path.display(),
                    error = %err,
                    "failed to read highlighted file"
                );
                ctx.warn(Warning::Unreadable {
                    id: id.to_string(),
                    reason: err.to_string(),
                });
                return Ok(LoadOutcome::Empty);
            }
        };

        let Some(language) = self.language_for(&target) else {
            ctx.warn(Warning::MissingExtension { id: id.to_string() });
            return Ok(LoadOutcome::Empty);
        };

        tracing::debug!(id, language, ssr = options.ssr, "highlighting module");
        let result = self
            .handler
            .handle(ContentRequest {
                content: &content,
                options: &self.highlight,
                language,
                load_options: *options,
                custom_language: self.custom_language.as_ref(),
            })
            .await?;

        Ok(LoadOutcome::Loaded(result))
    }

    /// Language for a load target: mapped extension, or the extension itself.
    pub fn language_for<'a>(&'a self, target: &'a LoadTarget) -> Option<&'a str> {
        target
            .extension()
            .map(|extension| self.map_extension.language_for(extension))
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences with U+FFFD.
fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[async_trait]
impl<H: ContentHandler> Plugin for SyntaxHighlight<H> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn enforce(&self) -> Option<Enforce> {
        Some(Enforce::Pre)
    }

    async fn resolve_id(
        &self,
        ctx: &dyn PluginContext,
        id: &str,
        importer: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Option<WrappedId>> {
        SyntaxHighlight::resolve_id(self, ctx, id, importer, options).await
    }

    async fn load(
        &self,
        ctx: &dyn PluginContext,
        id: &str,
        options: &LoadOptions,
    ) -> Result<LoadOutcome> {
        SyntaxHighlight::load(self, ctx, id, options).await
    }
}
