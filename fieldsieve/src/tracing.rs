//! Adapters for emitting filtered values through `tracing`.
//!
//! [`TracingFilteredExt`] renders a value under a policy and wraps the JSON
//! text as a display value, so events never carry fields the policy omits.
//!
//! ```
//! use fieldsieve::{FilterPolicy, Sieve, TracingFilteredExt};
//!
//! #[derive(Sieve)]
//! struct Login {
//!     user: String,
//!     #[sieve(tags("secret"))]
//!     password: String,
//! }
//!
//! let login = Login { user: "ada".into(), password: "hunter2".into() };
//! let policy = FilterPolicy::exclude(["secret"]);
//! tracing::info!(login = login.tracing_filtered(&policy), "login attempt");
//! ```

use serde_json::Value;
use tracing::field::{DisplayValue, display};

use crate::{engine::Engine, policy::FilterPolicy, walk::Filterable};

/// Text logged in place of a value that failed to render.
pub const RENDER_FAILED: &str = "Failed to render filtered value";

/// Extension trait for logging filtered values as display strings.
pub trait TracingFilteredExt {
    /// Renders `self` under `policy` as compact JSON for a `tracing` field.
    ///
    /// A render failure is logged as a placeholder string that names the
    /// error instead of failing the event.
    fn tracing_filtered(&self, policy: &FilterPolicy) -> DisplayValue<String>;
}

impl<T> TracingFilteredExt for T
where
    T: Filterable + ?Sized,
{
    fn tracing_filtered(&self, policy: &FilterPolicy) -> DisplayValue<String> {
        let text = match Engine::global().to_value(self, policy) {
            Ok(Value::String(text)) => text,
            Ok(value) => value.to_string(),
            Err(err) => format!("{RENDER_FAILED}: {err}"),
        };
        display(text)
    }
}
