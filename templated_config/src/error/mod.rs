//! Error types produced by the configuration loader.

mod constructors;
mod context;
mod types;

pub use context::{SourceOrigin, Stage};
pub use types::{ConfigError, FunctionError};

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests;
