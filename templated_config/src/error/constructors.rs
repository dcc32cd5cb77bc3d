//! Constructors and inspection helpers for `ConfigError`.

use figment::Error as FigmentError;

use super::context::{SourceOrigin, Stage};
use super::types::ConfigError;
use crate::format::Format;

impl ConfigError {
    /// Wrap `self` with the source and stage it was raised for.
    ///
    /// # Examples
    ///
    /// ```
    /// use templated_config::{ConfigError, SourceOrigin, Stage};
    ///
    /// let err = ConfigError::UnsupportedFormat { format: "toml".into() }
    ///     .in_source(SourceOrigin::Inline(2), Stage::Format);
    /// assert_eq!(err.origin(), Some(&SourceOrigin::Inline(2)));
    /// assert!(matches!(err.innermost(), ConfigError::UnsupportedFormat { .. }));
    /// ```
    #[must_use]
    pub fn in_source(self, origin: SourceOrigin, stage: Stage) -> Self {
        Self::Source {
            origin,
            stage,
            source: Box::new(self),
        }
    }

    /// Construct a parse error for `format` from any parser error.
    #[must_use]
    pub fn parse(format: Format, source: impl Into<super::FunctionError>) -> Self {
        Self::Parse {
            format,
            source: source.into(),
        }
    }

    /// Construct an unmarshal error from a [`figment::Error`].
    #[must_use]
    pub fn unmarshal(source: FigmentError) -> Self {
        Self::Unmarshal(Box::new(source))
    }

    /// Construct an argument error for a built-in function.
    #[must_use]
    pub fn invalid_arguments(function: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            function: function.to_owned(),
            message: message.into(),
        }
    }

    /// Returns the most specific error behind any source wrappers.
    ///
    /// Walks [`ConfigError::Source`] wrappers and unwraps
    /// [`ConfigError::TemplateExecution`] failures raised by built-in
    /// functions, so a failed secret lookup surfaces as
    /// [`ConfigError::MissingSecret`] or [`ConfigError::SecretsStore`].
    #[must_use]
    pub fn innermost(&self) -> &Self {
        match self {
            Self::Source { source, .. } => source.innermost(),
            Self::TemplateExecution { source, .. } => source
                .downcast_ref::<Self>()
                .map_or(self, Self::innermost),
            _ => self,
        }
    }

    /// Returns the outermost source this error is attributed to.
    #[must_use]
    pub const fn origin(&self) -> Option<&SourceOrigin> {
        match self {
            Self::Source { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// Returns the pipeline stage of the outermost source wrapper.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Source { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
