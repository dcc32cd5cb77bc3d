//! Layered configuration loading with templated fragments.
//!
//! A [`ConfigLoader`] takes JSON or YAML fragments, renders each one as a
//! template (with [`functions::ENV_FUNCTION`], the optional
//! [`functions::SECRET_FUNCTION`] and any caller-registered functions), and
//! deep-merges the results in order. Later fragments override earlier ones
//! key by key; the merged state can then be decoded into typed structures.
//!
//! ```
//! use templated_config::ConfigLoader;
//!
//! let mut loader = ConfigLoader::new();
//! loader.load_str(r#"{"log": {"level": "info", "json": false}}"#, "json")?;
//! loader.load_str(
//!     "log:\n  level: {{ env \"TEMPLATED_CONFIG_DOC_UNSET\" \"debug\" }}\n",
//!     "yaml",
//! )?;
//! assert_eq!(loader.get("log.level").and_then(|v| v.as_str()), Some("debug"));
//! assert_eq!(loader.get("log.json").and_then(|v| v.as_bool()), Some(false));
//! # Ok::<(), templated_config::ConfigError>(())
//! ```

mod error;
mod format;
mod loader;
mod numeric;

pub mod functions;
pub mod merge;
pub mod secrets;
pub mod template;

pub use serde_json;

pub use error::{ConfigError, ConfigResult, FunctionError, SourceOrigin, Stage};
pub use format::Format;
pub use functions::FunctionSet;
pub use loader::{ConfigLoader, ConfigLoaderBuilder, ConfigSource};
pub use secrets::{SecretStore, StaticSecretStore};
pub use template::Delimiters;
