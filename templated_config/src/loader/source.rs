//! Configuration sources accepted by the loader.

use std::path::{Path, PathBuf};

/// One configuration fragment to render and merge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigSource {
    /// A file whose format is inferred from its extension.
    File(PathBuf),
    /// Template text supplied directly, tagged with its format.
    Inline {
        /// Template text.
        contents: String,
        /// Format tag such as `json`, `yaml` or `yml`; validated on load.
        format: String,
    },
}

impl ConfigSource {
    /// A file source at `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// An inline source holding `contents` in the format named by `format`.
    #[must_use]
    pub fn inline(contents: impl Into<String>, format: impl AsRef<str>) -> Self {
        Self::Inline {
            contents: contents.into(),
            format: format.as_ref().to_owned(),
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}
