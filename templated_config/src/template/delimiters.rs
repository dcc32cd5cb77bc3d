//! Action delimiters used when parsing templates.

/// Default left delimiter.
pub const DEFAULT_LEFT: &str = "{{";

/// Default right delimiter.
pub const DEFAULT_RIGHT: &str = "}}";

/// The pair of strings marking template actions.
///
/// # Examples
///
/// ```
/// use templated_config::Delimiters;
///
/// let custom = Delimiters::new("[[", "]]");
/// assert_eq!((custom.left(), custom.right()), ("[[", "]]"));
///
/// // Empty strings fall back to the defaults.
/// assert_eq!(Delimiters::new("", ""), Delimiters::default());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delimiters {
    left: String,
    right: String,
}

impl Delimiters {
    /// Create a delimiter pair, substituting the default for an empty side.
    #[must_use]
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: non_empty_or(left.into(), DEFAULT_LEFT),
            right: non_empty_or(right.into(), DEFAULT_RIGHT),
        }
    }

    /// Opening delimiter.
    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Closing delimiter.
    #[must_use]
    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT.to_owned(),
            right: DEFAULT_RIGHT.to_owned(),
        }
    }
}

fn non_empty_or(side: String, default: &str) -> String {
    if side.is_empty() {
        default.to_owned()
    } else {
        side
    }
}
