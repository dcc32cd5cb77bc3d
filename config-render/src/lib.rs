//! Library interface for the `config-render` command.
//!
//! The binary parses [`cli::Args`], loads every file through a
//! [`templated_config::ConfigLoader`] and writes the merged configuration as
//! JSON. [`run`] holds that pipeline so it can be driven from tests with any
//! writer.

pub mod cli;
pub mod error;
pub mod secrets;

use std::io::Write;
use std::sync::Arc;

use templated_config::ConfigLoader;

use crate::cli::Args;
use crate::error::RenderCliError;

/// Loads the files named by `args` and writes the merged result to `out`.
///
/// # Errors
///
/// Returns [`RenderCliError`] when the secrets file or any configuration file
/// fails to load, when `--key` names an unset key, or when writing fails.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), RenderCliError> {
    let mut builder = ConfigLoader::builder().delimiters(&args.left_delim, &args.right_delim);
    if let Some(path) = &args.secrets {
        builder = builder.secret_store(Arc::new(secrets::load_store(path)?));
    }
    let mut loader = builder.build();

    tracing::debug!(files = args.files.len(), "loading configuration files");
    loader.load_files(args.files.iter().cloned())?;

    let value = args.key.as_deref().map_or_else(
        || Ok(loader.merged()),
        |key| {
            loader
                .get(key)
                .ok_or_else(|| RenderCliError::MissingKey(key.to_owned()))
        },
    )?;
    let text = if args.is_compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(RenderCliError::Serialise)?;
    writeln!(out, "{text}").map_err(RenderCliError::Output)
}
