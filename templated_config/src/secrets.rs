//! Secret store seam consumed by the secret lookup template function.
//!
//! The crate does not talk to any secret service itself. Applications adapt
//! their client of choice by implementing [`SecretStore`]; the loader shares
//! the store through an [`Arc`] and never synchronises access to it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Key/value secrets held at one store path.
pub type SecretData = Map<String, Value>;

/// Error returned by secret store clients.
pub type SecretStoreError = Box<dyn std::error::Error + Send + Sync>;

/// Read access to a path-addressed secret store.
///
/// `Ok(None)` signals that nothing is stored at the path. Lookups treat it
/// like a missing key, falling back to a default when one is supplied. `Err`
/// is fatal for the lookup.
pub trait SecretStore: Send + Sync {
    /// Read the secret set stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns the client's error when the store cannot be read, for example
    /// because it is unreachable or the caller is not authorised.
    fn read(&self, path: &str) -> Result<Option<SecretData>, SecretStoreError>;
}

impl<S: SecretStore + ?Sized> SecretStore for Arc<S> {
    fn read(&self, path: &str) -> Result<Option<SecretData>, SecretStoreError> {
        (**self).read(path)
    }
}

/// In-memory [`SecretStore`] backed by a map of paths to secret sets.
///
/// # Examples
///
/// ```
/// use templated_config::secrets::{SecretStore, StaticSecretStore};
///
/// let store = StaticSecretStore::new().with_secret("secret/db", "password", "hunter2");
/// let secrets = store.read("secret/db")?.unwrap_or_default();
/// assert_eq!(secrets.get("password").and_then(|v| v.as_str()), Some("hunter2"));
/// assert!(store.read("secret/other")?.is_none());
/// # Ok::<(), templated_config::secrets::SecretStoreError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticSecretStore {
    paths: BTreeMap<String, SecretData>,
}

impl StaticSecretStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paths: BTreeMap::new(),
        }
    }

    /// Store `value` under `key` at `path`, returning the updated store.
    #[must_use]
    pub fn with_secret(
        mut self,
        path: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(path, key, value);
        self
    }

    /// Store `value` under `key` at `path`.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.paths
            .entry(path.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Replace the whole secret set stored at `path`.
    pub fn insert_path(&mut self, path: impl Into<String>, secrets: SecretData) {
        self.paths.insert(path.into(), secrets);
    }

    /// Number of paths holding secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no path holds secrets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl SecretStore for StaticSecretStore {
    fn read(&self, path: &str) -> Result<Option<SecretData>, SecretStoreError> {
        Ok(self.paths.get(path).cloned())
    }
}

/// Render a secret value as template text.
///
/// Strings are emitted verbatim; every other value uses its JSON text.
pub(crate) fn secret_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
