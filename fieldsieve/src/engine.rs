//! The engine facade.
//!
//! [`Engine`] bundles a read-only [`EngineConfig`] with the two entry points
//! of the crate: rendering a value under a [`FilterPolicy`] and rendering the
//! schema of a type. Engines are plain values and can be built per test; the
//! process-wide instance used by the crate-level functions is installed once
//! through [`Engine::install`] and read through [`Engine::global`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Error,
    policy::FilterPolicy,
    schema::{self, DEFAULT_MAX_DEPTH, SchemaError, SchemaNode, Schematic},
    walk::{FilterWalker, Filterable, SerializationError},
};

static GLOBAL: OnceLock<Engine> = OnceLock::new();

// =============================================================================
// EngineConfig
// =============================================================================

/// Engine settings. Missing keys take their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pretty-print filtered output from [`Engine::render_filtered`].
    pub pretty: bool,
    /// Nesting limit of the schema structural pass.
    pub max_schema_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            max_schema_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_max_schema_depth(mut self, max_schema_depth: usize) -> Self {
        self.max_schema_depth = max_schema_depth;
        self
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Renders filtered values and schemas with a fixed configuration.
///
/// ```
/// use fieldsieve::{Engine, EngineConfig, FilterPolicy, Sieve};
///
/// #[derive(Sieve)]
/// struct Person {
///     #[sieve(tags("pii"))]
///     name: String,
///     age: u32,
/// }
///
/// let engine = Engine::new(EngineConfig::default());
/// let person = Person { name: "Ada".into(), age: 36 };
///
/// let text = engine
///     .render_filtered(&person, &FilterPolicy::exclude(["pii"]))
///     .unwrap();
/// assert_eq!(text, r#"{"age":36}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Installs the process-wide engine.
    ///
    /// The first installation wins. Later calls, and calls made after
    /// [`Engine::global`] already initialized the default engine, leave the
    /// installed engine unchanged and return it.
    pub fn install(config: EngineConfig) -> &'static Self {
        let mut installed = false;
        let engine = GLOBAL.get_or_init(|| {
            installed = true;
            Self::new(config.clone())
        });
        if installed {
            tracing::debug!(
                pretty = engine.config.pretty,
                max_schema_depth = engine.config.max_schema_depth,
                "installed global engine"
            );
        } else if engine.config != config {
            tracing::warn!("global engine already installed, ignoring new configuration");
        }
        engine
    }

    /// Returns the process-wide engine, installing the default one if none
    /// was installed.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::default)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Renders `value` under `policy` into a JSON value.
    pub fn to_value<T: Filterable + ?Sized>(
        &self,
        value: &T,
        policy: &FilterPolicy,
    ) -> Result<Value, SerializationError> {
        FilterWalker::new(policy).walk(value)
    }

    /// Renders `value` under `policy` as JSON text, pretty-printed when the
    /// configuration says so.
    pub fn render_filtered<T: Filterable + ?Sized>(
        &self,
        value: &T,
        policy: &FilterPolicy,
    ) -> Result<String, Error> {
        let rendered = self.to_value(value, policy)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&rendered)?
        } else {
            serde_json::to_string(&rendered)?
        };
        Ok(text)
    }

    /// Renders `value` under `policy` as pretty-printed JSON text.
    pub fn render_filtered_pretty<T: Filterable + ?Sized>(
        &self,
        value: &T,
        policy: &FilterPolicy,
    ) -> Result<String, Error> {
        let rendered = self.to_value(value, policy)?;
        Ok(serde_json::to_string_pretty(&rendered)?)
    }

    /// Renders `value` with the pass-through policy.
    pub fn render<T: Filterable + ?Sized>(&self, value: &T) -> Result<String, Error> {
        self.render_filtered(value, &FilterPolicy::pass_through())
    }

    /// Builds the annotated schema tree of `T`.
    pub fn build_schema<T: Schematic + ?Sized>(&self) -> Result<SchemaNode, SchemaError> {
        schema::build_schema::<T>(self.config.max_schema_depth)
    }

    /// Renders the schema of `T` as pretty-printed JSON text.
    pub fn render_schema<T: Schematic + ?Sized>(&self) -> Result<String, SchemaError> {
        let root = self.build_schema::<T>()?;
        Ok(serde_json::to_string_pretty(&root)?)
    }
}
