//! Built-in template functions: environment and secret lookups.

use crate::secrets::{SecretStore, secret_text};
use crate::{ConfigError, ConfigResult};

use super::{ENV_FUNCTION, SECRET_FUNCTION};

/// Look up an environment variable: `env NAME [DEFAULT]`.
///
/// A set variable wins over the default, even when its value is empty. An
/// unset variable yields the default, or an empty string when none was
/// given. Absence is never an error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidArguments`] unless called with one or two
/// arguments.
pub fn lookup_env(args: &[String]) -> ConfigResult<String> {
    let (name, default) = match args {
        [name] => (name, None),
        [name, default] => (name, Some(default)),
        _ => {
            return Err(ConfigError::invalid_arguments(
                ENV_FUNCTION,
                format!(
                    "expected a name and an optional default, got {} arguments",
                    args.len()
                ),
            ));
        }
    };
    Ok(std::env::var_os(name).map_or_else(
        || default.cloned().unwrap_or_default(),
        |value| value.to_string_lossy().into_owned(),
    ))
}

/// Look up a secret: `vault PATH KEY [DEFAULT]`.
///
/// A failed read is always fatal. A missing secret set or key falls back to
/// the default when one is given.
///
/// # Errors
///
/// Returns [`ConfigError::SecretsStore`] when the store read fails,
/// [`ConfigError::MissingSecret`] when the key is absent and no default was
/// given, and [`ConfigError::InvalidArguments`] unless called with two or
/// three arguments.
pub fn lookup_secret(store: &dyn SecretStore, args: &[String]) -> ConfigResult<String> {
    let (path, key, default) = match args {
        [path, key] => (path, key, None),
        [path, key, default] => (path, key, Some(default)),
        _ => {
            return Err(ConfigError::invalid_arguments(
                SECRET_FUNCTION,
                format!(
                    "expected a path, a key and an optional default, got {} arguments",
                    args.len()
                ),
            ));
        }
    };
    tracing::debug!(%path, %key, "reading secret");
    let secrets = store.read(path).map_err(|source| ConfigError::SecretsStore {
        path: path.clone(),
        source,
    })?;
    if let Some(value) = secrets.as_ref().and_then(|set| set.get(key.as_str())) {
        return Ok(secret_text(value));
    }
    default.map_or_else(
        || {
            Err(ConfigError::MissingSecret {
                path: path.clone(),
                key: key.clone(),
            })
        },
        |fallback| {
            tracing::warn!(%path, %key, "secret not found; using default value");
            Ok(fallback.clone())
        },
    )
}
