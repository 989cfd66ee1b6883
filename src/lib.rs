//! # syntax-highlight
//!
//! A build-tool plugin that turns `?syntax` imports into syntax-highlighted
//! modules.
//!
//! ```js
//! import logo from "./logo.svg?syntax";
//! // logo === '<pre class="syntax nord" data-language="xml"><code>...</code></pre>'
//! ```
//!
//! The plugin claims the request in its resolve hook, lets the host resolve
//! the real file, and rewrites the id into a wrapped form the host will not
//! touch again. Its load hook later decodes that id, reads the file, picks a
//! language from the extension and hands the text to a content handler:
//!
//! - **Identifier codec**: `./logo.svg?syntax` ⇄ `\0/abs/logo.svg.syntax`
//! - **Extension mapping**: `svg` → `xml` by default, user overrides win
//! - **Content handler**: injectable; the default drives a highlighting engine
//!   and emits `export default "<markup>"`
//! - **Warnings**: unresolvable requests, unreadable files and paths without an
//!   extension fall back to the host's default handling instead of failing
//!
//! ## Quick Start
//!
//! ```ignore
//! use syntax_highlight::prelude::*;
//!
//! let plugin = SyntaxHighlight::with_default_handler(
//!     ConfigBuilder::new()
//!         .map_extension("vue", "html")
//!         .option("theme", "github-dark")
//!         .build(),
//!     None,
//! );
//!
//! // Inside the host, for each import:
//! let wrapped = plugin.resolve_id(&ctx, id, importer, &resolve_options).await?;
//! // ...and for each module load:
//! let outcome = plugin.load(&ctx, wrapped_id, &LoadOptions::default()).await?;
//! ```
//!
//! ## Modules
//!
//! - [`id`]: Request/wrapped identifier codec
//! - [`plugin`]: Resolve and load hooks
//! - [`config`]: Options, builder and JSON construction
//! - [`language`]: Extension to language mapping
//! - [`handler`]: Content handler trait, default engine and module emitter
//! - [`host`]: Host capabilities and an in-memory host
//! - [`diagnostic`]: Warnings, errors and formatting

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod diagnostic;
pub mod handler;
pub mod host;
pub mod id;
pub mod language;
pub mod plugin;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use syntax_highlight::prelude::*;
/// ```
pub mod prelude {
    // Plugin
    pub use crate::{Enforce, LoadOutcome, Plugin, SyntaxHighlight};

    // Configuration
    pub use crate::{ConfigBuilder, LanguageRegistration, LoadOptions, SyntaxHighlightOptions};

    // Host
    pub use crate::{MapHost, PluginContext, ResolveOptions, ResolvedId};

    // Handlers
    pub use crate::{ContentHandler, ContentRequest, HighlightHandler, LoadResult};

    // Diagnostics
    pub use crate::{PluginError, Warning};
}

// =============================================================================
// Plugin
// =============================================================================

pub use plugin::{Enforce, LoadOutcome, Plugin, SyntaxHighlight, PLUGIN_NAME};

// =============================================================================
// Identifiers
// =============================================================================

pub use id::{
    source_extension, unwrap, wrap, LoadTarget, ModuleId, RequestId, WrappedId, HIDDEN_MARKER,
    SYNTAX_EXTENSION, SYNTAX_SUFFIX,
};

// =============================================================================
// Configuration
// =============================================================================

pub use config::{
    ConfigBuilder, HighlightOptions, LanguageRegistration, LoadOptions, SyntaxHighlightOptions,
};
pub use language::ExtensionMap;

// =============================================================================
// Infrastructure
// =============================================================================

pub use diagnostic::{
    format_warning, format_warnings, ConfigError, PluginError, Warning, WarningKind,
    WarningOptions,
};
pub use handler::{
    emit_module, ContentHandler, ContentRequest, HighlightHandler, Highlighter,
    HighlighterFactory, LoadResult, PlainHighlighter, PlainHighlighterFactory,
};
pub use host::{MapHost, PluginContext, ResolveCall, ResolveOptions, ResolvedId};
