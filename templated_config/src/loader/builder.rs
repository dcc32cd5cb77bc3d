//! Builder for [`ConfigLoader`].

use std::sync::Arc;

use serde_json::{Map, Value};

use super::ConfigLoader;
use crate::FunctionError;
use crate::functions::FunctionSet;
use crate::secrets::SecretStore;
use crate::template::Delimiters;

/// Builder for [`ConfigLoader`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use templated_config::{ConfigLoader, StaticSecretStore};
///
/// let store = StaticSecretStore::new().with_secret("secret/app", "token", "t0k3n");
/// let mut loader = ConfigLoader::builder()
///     .secret_store(Arc::new(store))
///     .delimiters("[[", "]]")
///     .function("greet", |args: &[String]| Ok(format!("hello {}", args.join(" "))))
///     .build();
///
/// loader.load_str(
///     r#"{"token": "[[ vault "secret/app" "token" ]]", "msg": "[[ greet "you" ]]"}"#,
///     "json",
/// )?;
/// assert_eq!(loader.get("token").and_then(|v| v.as_str()), Some("t0k3n"));
/// assert_eq!(loader.get("msg").and_then(|v| v.as_str()), Some("hello you"));
/// # Ok::<(), templated_config::ConfigError>(())
/// ```
#[derive(Default)]
#[must_use]
pub struct ConfigLoaderBuilder {
    secrets: Option<Arc<dyn SecretStore>>,
    delimiters: Delimiters,
    functions: FunctionSet,
}

impl ConfigLoaderBuilder {
    /// Creates a builder with default delimiters and no secret store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the secret lookup function, backed by `store`.
    pub fn secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(store);
        self
    }

    /// Uses `left` and `right` as action delimiters.
    ///
    /// An empty string leaves that side at its default.
    pub fn delimiters(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.delimiters = Delimiters::new(left, right);
        self
    }

    /// Registers a custom template function.
    ///
    /// Custom functions are added after the built-ins, so a custom function
    /// named like a built-in replaces it.
    pub fn function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&[String]) -> Result<String, FunctionError> + Send + Sync + 'static,
    {
        self.functions.register(name, function);
        self
    }

    /// Builds a loader with an empty merged state.
    #[must_use]
    pub fn build(self) -> ConfigLoader {
        let Self {
            secrets,
            delimiters,
            functions: custom,
        } = self;
        let mut functions = FunctionSet::with_builtins(secrets.clone());
        functions.extend(custom);
        ConfigLoader {
            functions,
            delimiters,
            state: Value::Object(Map::new()),
            secrets,
        }
    }
}
