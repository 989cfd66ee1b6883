//! Host build tool seam.
//!
//! The plugin never resolves module specifiers itself. It asks the host
//! through [`PluginContext`], and reports recovered failures through the same
//! context. [`MapHost`] is a self-contained implementation backed by a
//! resolution table, for embedding and tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::diagnostic::{Result, Warning};

// =============================================================================
// Resolution types
// =============================================================================

/// Resolution flags forwarded to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOptions {
    /// Do not call back into the plugin that issued this resolution.
    pub skip_self: bool,
    /// The module is an entry point.
    pub is_entry: bool,
    /// Host-specific options, passed through untouched.
    pub custom: Map<String, Value>,
}

impl ResolveOptions {
    /// Copy of these options with `skip_self` set.
    pub fn skipping_self(&self) -> Self {
        Self {
            skip_self: true,
            ..self.clone()
        }
    }
}

/// A module id the host resolved a specifier to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    /// Absolute path (or host-specific id) of the module.
    pub id: String,
}

impl ResolvedId {
    /// Wrap a resolved module id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// =============================================================================
// PluginContext Trait
// =============================================================================

/// Capabilities the host exposes to the plugin during a hook call.
///
/// # Example
///
/// ```ignore
/// use syntax_highlight::host::{PluginContext, ResolveOptions, ResolvedId};
/// use syntax_highlight::diagnostic::{Result, Warning};
///
/// struct Bundler { /* module graph */ }
///
/// #[async_trait::async_trait]
/// impl PluginContext for Bundler {
///     async fn resolve(
///         &self,
///         specifier: &str,
///         importer: Option<&str>,
///         options: &ResolveOptions,
///     ) -> Result<Option<ResolvedId>> {
///         Ok(self.lookup(specifier, importer).map(ResolvedId::new))
///     }
///
///     fn warn(&self, warning: Warning) {
///         eprintln!("{warning}");
///     }
/// }
/// ```
#[async_trait]
pub trait PluginContext: Send + Sync {
    /// Run the host's resolution procedure.
    ///
    /// `Ok(None)` means the host found nothing. `Err` is reserved for host
    /// failures and is propagated to the caller of the hook.
    async fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Option<ResolvedId>>;

    /// Report a non-fatal warning. Must not halt the build.
    fn warn(&self, warning: Warning);
}

// =============================================================================
// MapHost - Simple Map-based Implementation
// =============================================================================

/// A host that resolves specifiers from a fixed table and records warnings.
///
/// Lookup tries `(importer, specifier)` first, then the bare specifier.
///
/// # Example
///
/// ```ignore
/// let host = MapHost::new()
///     .with_module("./foo.svg", "/abs/foo.svg")
///     .with_module_from("/abs/main.js", "./bar.css", "/abs/bar.css");
/// ```
#[derive(Debug, Default)]
pub struct MapHost {
    modules: FxHashMap<String, String>,
    scoped: FxHashMap<(String, String), String>,
    warnings: Mutex<Vec<Warning>>,
    resolutions: Mutex<Vec<ResolveCall>>,
}

/// A recorded call to [`MapHost::resolve`](PluginContext::resolve).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveCall {
    /// Specifier requested.
    pub specifier: String,
    /// Importer, if any.
    pub importer: Option<String>,
    /// Options as received.
    pub options: ResolveOptions,
}

impl MapHost {
    /// Create a host that resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `specifier` to `id` regardless of importer.
    pub fn with_module(mut self, specifier: impl Into<String>, id: impl Into<String>) -> Self {
        self.modules.insert(specifier.into(), id.into());
        self
    }

    /// Resolve `specifier` to `id` only when imported from `importer`.
    pub fn with_module_from(
        mut self,
        importer: impl Into<String>,
        specifier: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.scoped
            .insert((importer.into(), specifier.into()), id.into());
        self
    }

    /// Warnings reported so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }

    /// Drain reported warnings.
    pub fn take_warnings(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.lock())
    }

    /// Resolution calls received so far.
    pub fn resolutions(&self) -> Vec<ResolveCall> {
        self.resolutions.lock().clone()
    }

    fn lookup(&self, specifier: &str, importer: Option<&str>) -> Option<&String> {
        importer
            .and_then(|importer| {
                self.scoped
                    .get(&(importer.to_string(), specifier.to_string()))
            })
            .or_else(|| self.modules.get(specifier))
    }
}

#[async_trait]
impl PluginContext for MapHost {
    async fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Option<ResolvedId>> {
        self.resolutions.lock().push(ResolveCall {
            specifier: specifier.to_string(),
            importer: importer.map(str::to_string),
            options: options.clone(),
        });
        Ok(self.lookup(specifier, importer).map(|id| ResolvedId::new(id.clone())))
    }

    fn warn(&self, warning: Warning) {
        self.warnings.lock().push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_id_carries_only_the_id() {
        let resolved = ResolvedId::new(String::from("/abs/a.css"));
        assert_eq!(
            resolved,
            ResolvedId {
                id: "/abs/a.css".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_map_host_resolves_bare_specifier() {
        let host = MapHost::new().with_module("./a.css", "/abs/a.css");
        let resolved = host
            .resolve("./a.css", None, &ResolveOptions::default())
            .await
            .unwrap();
        assert_eq!(resolved, Some(ResolvedId::new("/abs/a.css")));
    }

    #[tokio::test]
    async fn test_map_host_prefers_scoped_entry() {
        let host = MapHost::new()
            .with_module("./a.css", "/abs/a.css")
            .with_module_from("/abs/nested/main.js", "./a.css", "/abs/nested/a.css");

        let options = ResolveOptions::default();
        let scoped = host
            .resolve("./a.css", Some("/abs/nested/main.js"), &options)
            .await
            .unwrap();
        assert_eq!(scoped.unwrap().id, "/abs/nested/a.css");

        let fallback = host
            .resolve("./a.css", Some("/abs/main.js"), &options)
            .await
            .unwrap();
        assert_eq!(fallback.unwrap().id, "/abs/a.css");
    }

    #[tokio::test]
    async fn test_map_host_miss_and_recording() {
        let host = MapHost::new();
        let options = ResolveOptions::default().skipping_self();
        let resolved = host.resolve("./nope", Some("/abs/main.js"), &options).await.unwrap();
        assert_eq!(resolved, None);

        let calls = host.resolutions();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].options.skip_self);
        assert_eq!(calls[0].importer.as_deref(), Some("/abs/main.js"));
    }

    #[test]
    fn test_map_host_warnings() {
        let host = MapHost::new();
        host.warn(Warning::MissingExtension { id: "x".into() });
        assert_eq!(host.warnings().len(), 1);
        assert_eq!(host.take_warnings().len(), 1);
        assert!(host.warnings().is_empty());
    }

    #[test]
    fn test_skipping_self_keeps_custom_options() {
        let mut options = ResolveOptions {
            is_entry: true,
            ..Default::default()
        };
        options.custom.insert("ssr".into(), Value::Bool(true));

        let forwarded = options.skipping_self();
        assert!(forwarded.skip_self);
        assert!(forwarded.is_entry);
        assert_eq!(forwarded.custom.get("ssr"), Some(&Value::Bool(true)));
    }
}
