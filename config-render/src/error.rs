//! Error types for `config-render`.

use camino::Utf8PathBuf;
use templated_config::ConfigError;
use thiserror::Error;

/// Errors surfaced by the `config-render` pipeline.
#[derive(Debug, Error)]
pub enum RenderCliError {
    /// Loading the configuration files failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The secrets file could not be read.
    #[error("failed to read secrets file {path}: {source}")]
    SecretsRead {
        /// Secrets file path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The secrets file is not a JSON object.
    #[error("failed to parse secrets file {path}: {source}")]
    SecretsParse {
        /// Secrets file path.
        path: Utf8PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// A secret path in the secrets file does not map to an object.
    #[error("secrets file {path}: entry '{secret_path}' must be an object of keys to values")]
    SecretsShape {
        /// Secrets file path.
        path: Utf8PathBuf,
        /// Offending secret path.
        secret_path: String,
    },

    /// The requested key is absent from the merged configuration.
    #[error("key '{0}' is not set in the merged configuration")]
    MissingKey(String),

    /// The merged configuration could not be serialised.
    #[error("failed to serialise the merged configuration: {0}")]
    Serialise(#[source] serde_json::Error),

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}
