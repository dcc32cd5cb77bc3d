//! Helpers for running fixtures inside a [`figment::Jail`].
//!
//! A jail gives each test a scratch working directory and restores any
//! environment variables it sets, which suits file-based configuration
//! layers rendered with `env` lookups.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it returns an
/// error. Failures are converted into `anyhow::Error` values.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns its absolute path.
///
/// # Errors
///
/// Returns the jail's error when the file cannot be written.
pub fn layer_file(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<PathBuf> {
    jail.create_file(name, contents)?;
    Ok(jail.directory().join(name))
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// a jail closure boundary.
pub fn figment_error<E: ToString>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
