//! Supported configuration formats and tag resolution.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{ConfigError, ConfigResult};

/// Structured document formats understood by the merge engine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// JSON documents.
    Json,
    /// YAML documents (`yaml` or `yml`).
    Yaml,
}

impl Format {
    /// Resolve a format tag such as `json`, `yaml` or `yml`.
    ///
    /// Tags are matched ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] naming `tag` when it is not
    /// recognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use templated_config::{ConfigError, Format};
    ///
    /// assert_eq!(Format::from_tag("YML").ok(), Some(Format::Yaml));
    /// assert!(matches!(
    ///     Format::from_tag("toml"),
    ///     Err(ConfigError::UnsupportedFormat { format }) if format == "toml"
    /// ));
    /// ```
    pub fn from_tag(tag: &str) -> ConfigResult<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                format: tag.to_owned(),
            }),
        }
    }

    /// Infer the format of a file from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] when the extension is
    /// missing or not recognised.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_tag(&ext)
    }

    /// Canonical tag for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::from_tag(tag)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}
