//! Loading a static secret store from a JSON file.
//!
//! The file maps secret paths to objects of keys and values:
//!
//! ```json
//! { "secret/db": { "password": "hunter2", "port": 5432 } }
//! ```

use std::fs;

use camino::Utf8Path;
use serde_json::{Map, Value};
use templated_config::StaticSecretStore;

use crate::error::RenderCliError;

/// Reads the secrets file at `path` into a [`StaticSecretStore`].
///
/// # Errors
///
/// Returns [`RenderCliError::SecretsRead`] when the file cannot be read,
/// [`RenderCliError::SecretsParse`] when it is not a JSON object and
/// [`RenderCliError::SecretsShape`] when an entry is not an object.
pub fn load_store(path: &Utf8Path) -> Result<StaticSecretStore, RenderCliError> {
    let text = fs::read_to_string(path).map_err(|source| RenderCliError::SecretsRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_store(path, &text)
}

fn parse_store(path: &Utf8Path, text: &str) -> Result<StaticSecretStore, RenderCliError> {
    let document: Map<String, Value> =
        serde_json::from_str(text).map_err(|source| RenderCliError::SecretsParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut store = StaticSecretStore::new();
    for (secret_path, entry) in document {
        let Value::Object(secrets) = entry else {
            return Err(RenderCliError::SecretsShape {
                path: path.to_path_buf(),
                secret_path,
            });
        };
        store.insert_path(secret_path, secrets);
    }
    tracing::debug!(%path, paths = store.len(), "loaded secrets file");
    Ok(store)
}
