//! Command-line interface definitions for `config-render`.

use camino::Utf8PathBuf;
use clap::Parser;
use templated_config::template::{DEFAULT_LEFT, DEFAULT_RIGHT};

/// Parsed CLI arguments for `config-render`.
#[derive(Debug, Parser)]
#[command(name = "config-render")]
#[command(about = "Render templated JSON/YAML configuration files and print the merged result")]
#[command(version)]
pub struct Args {
    /// Configuration files to merge, lowest precedence first.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<Utf8PathBuf>,
    /// Opening delimiter for template actions.
    #[arg(long, value_name = "DELIM", default_value = DEFAULT_LEFT)]
    pub left_delim: String,
    /// Closing delimiter for template actions.
    #[arg(long, value_name = "DELIM", default_value = DEFAULT_RIGHT)]
    pub right_delim: String,
    /// JSON file mapping secret paths to key/value objects.
    #[arg(long, value_name = "FILE")]
    pub secrets: Option<Utf8PathBuf>,
    /// Print only the value at this dotted key.
    #[arg(long, value_name = "DOTTED.KEY")]
    pub key: Option<String>,
    /// Print the result on a single line.
    #[arg(long = "compact")]
    pub is_compact: bool,
}
