//! Primary error enum for configuration loading flows.

use std::path::PathBuf;

use figment::Error as FigmentError;
use thiserror::Error;

use super::context::{SourceOrigin, Stage};
use crate::format::Format;

/// Boxed error returned by template functions.
///
/// Built-in functions return [`ConfigError`] values boxed into this type;
/// caller-registered functions may return any error.
pub type FunctionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read config file '{}': {source}", .path.display())]
    FileRead {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The format tag or file extension is not supported.
    #[error("unsupported config format '{format}'; expected one of json, yaml, yml")]
    UnsupportedFormat {
        /// Rejected tag or extension.
        format: String,
    },

    /// The fragment contains malformed template syntax.
    #[error("template '{template}' line {line}: {message}")]
    TemplateParse {
        /// Name of the template being parsed.
        template: String,
        /// One-based line on which the problem was detected.
        line: usize,
        /// Description of the syntax problem.
        message: String,
    },

    /// A function invoked while rendering failed.
    #[error("template '{template}' line {line}: error calling {function}: {source}")]
    TemplateExecution {
        /// Name of the template being executed.
        template: String,
        /// One-based line of the failing action.
        line: usize,
        /// Name of the function that failed.
        function: String,
        /// Error reported by the function.
        #[source]
        source: FunctionError,
    },

    /// A secret key was absent and no default value was supplied.
    #[error(
        "secret key '{key}' does not exist in '{path}' and no default value has been provided"
    )]
    MissingSecret {
        /// Secret store path that was read.
        path: String,
        /// Key looked up within the secret set.
        key: String,
    },

    /// The secret store client failed to read a path.
    #[error("failed to read secrets from path '{path}': {source}")]
    SecretsStore {
        /// Secret store path that was requested.
        path: String,
        /// Error reported by the store client.
        #[source]
        source: FunctionError,
    },

    /// A built-in function was called with the wrong arguments.
    #[error("invalid arguments to '{function}': {message}")]
    InvalidArguments {
        /// Name of the built-in function.
        function: String,
        /// Description of the expected arguments.
        message: String,
    },

    /// Rendered text could not be parsed under its format.
    #[error("failed to parse {format} document: {source}")]
    Parse {
        /// Format the text was parsed as.
        format: Format,
        /// Error reported by the format parser.
        #[source]
        source: FunctionError,
    },

    /// The merged state does not fit the requested type.
    #[error("failed to unmarshal config: {0}")]
    Unmarshal(#[source] Box<FigmentError>),

    /// A failure attributed to one source of a load call.
    #[error("failed to {stage} {origin}: {source}")]
    Source {
        /// Source that triggered the failure.
        origin: SourceOrigin,
        /// Pipeline stage that failed.
        stage: Stage,
        /// Underlying failure.
        #[source]
        source: Box<ConfigError>,
    },
}
