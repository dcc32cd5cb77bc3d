//! Source and stage descriptors attached to load failures.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies the source a load failure belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SourceOrigin {
    /// A file source, identified by its path.
    File(PathBuf),
    /// An inline source, identified by its position within the load call.
    Inline(usize),
}

impl SourceOrigin {
    /// Returns the file path when the origin is a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Inline(_) => None,
        }
    }

    /// Name given to the template rendered for this origin.
    pub(crate) fn template_name(&self) -> String {
        match self {
            Self::File(path) => path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            ),
            Self::Inline(index) => format!("inline#{index}"),
        }
    }
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "config file '{}'", path.display()),
            Self::Inline(index) => write!(f, "inline config source #{index}"),
        }
    }
}

/// Pipeline stage at which a source failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Stage {
    /// Reading the file contents.
    Read,
    /// Resolving the format tag.
    Format,
    /// Parsing or executing the template.
    Render,
    /// Parsing the rendered document and merging it.
    Merge,
}

impl Stage {
    /// Verb describing the stage, used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Format => "resolve the format of",
            Self::Render => "render",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
