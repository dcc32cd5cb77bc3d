//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation holds a global re-entrant mutex while it runs and returns an
//! RAII guard that restores the previous state when dropped, removing the
//! variable again if it was previously absent. Guards for the same key
//! restore in LIFO order.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("TEMPLATED_CONFIG_DOC_KEY", "value");
//! assert_eq!(std::env::var("TEMPLATED_CONFIG_DOC_KEY").ok().as_deref(), Some("value"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::ReentrantMutex;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("TEMPLATED_CONFIG_DOC_SET", "bar");
/// assert!(matches!(std::env::var("TEMPLATED_CONFIG_DOC_SET"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior
/// value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::remove_var("TEMPLATED_CONFIG_DOC_REMOVED");
/// assert!(std::env::var("TEMPLATED_CONFIG_DOC_REMOVED").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Applies several variables at once: `Some` sets a value, `None` unsets the
/// variable.
///
/// The guards are returned in application order; dropping the vector
/// restores every variable.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _guards = env::overlay([
///     ("TEMPLATED_CONFIG_DOC_HOST", Some("db.internal")),
///     ("TEMPLATED_CONFIG_DOC_PORT", None),
/// ]);
/// assert!(std::env::var("TEMPLATED_CONFIG_DOC_PORT").is_err());
/// ```
pub fn overlay<I, K, V>(vars: I) -> Vec<EnvVarGuard>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let _guard = ENV_MUTEX.lock();
    vars.into_iter()
        .map(|(key, value)| match value {
            Some(set) => set_var(key, set),
            None => remove_var(key),
        })
        .collect()
}
