//! Typed configuration resolved from three layers: process environment
//! variables, an optional `.env` style file, and per-field defaults.
//!
//! ```rust,no_run
//! use layered_env::define_config;
//! use std::time::Duration;
//!
//! define_config! {
//!     #[derive(Debug, Default)]
//!     pub struct AppConfig {
//!         #[field(env = "PORT", doc = "Server port", default = "8080")]
//!         pub port: u16,
//!
//!         #[field(env = "TIMEOUT", doc = "Request timeout", default = "5s")]
//!         pub timeout: Duration,
//!     }
//! }
//!
//! let mut config = AppConfig::default();
//! layered_env::resolve(&mut config, ".env").unwrap();
//! ```

pub mod coerce;
pub mod docs;
pub mod environment;
pub mod error;
pub mod field;
pub mod resolver;
pub mod source;

// Re-export main types
pub use coerce::Coerce;
pub use environment::{Env, ProcessEnv};
pub use error::{format_config_error, ConfigError};
pub use field::{FieldDescriptor, FieldKind, ValueSource};
pub use resolver::Resolver;
pub use source::RawValues;

// Re-export macro
pub use layered_env_macros::define_config;

use std::path::Path;

/// A structure whose fields can be resolved from the configuration layers.
///
/// Usually implemented by `define_config!`.
pub trait Resolve {
    /// Descriptors of every resolvable field, in declaration order
    fn descriptors() -> Vec<FieldDescriptor>;

    /// Resolve each field in order, stopping at the first error
    fn resolve_fields(&mut self, resolver: &Resolver<'_>) -> Result<(), ConfigError>;
}

/// Resolve `target` from the process environment, the file at `path` and defaults
pub fn resolve<T: Resolve>(target: &mut T, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    resolve_with(target, path, &ProcessEnv)
}

/// Like [`resolve`], with an injected environment instead of the process one
pub fn resolve_with<T: Resolve>(
    target: &mut T,
    path: impl AsRef<Path>,
    env: &dyn Env,
) -> Result<(), ConfigError> {
    let file = source::read_file(path)?;
    let resolver = Resolver::new(env, &file);
    target.resolve_fields(&resolver)
}

/// Convenience constructors for configuration types
pub trait Load: Resolve + Default {
    /// Load configuration, panicking with a readable report on error
    fn load(path: impl AsRef<Path>) -> Self {
        match Self::load_or_error(path) {
            Ok(config) => config,
            Err(err) => panic!("{}", format_config_error(&err)),
        }
    }

    /// Load configuration, returning the first error instead of panicking
    fn load_or_error(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        resolve(&mut config, path)?;
        Ok(config)
    }
}

impl<T: Resolve + Default> Load for T {}
