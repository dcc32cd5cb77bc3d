//! Template rendering for configuration fragments.
//!
//! Fragments use the action syntax of Go's `text/template`: text outside the
//! delimiters is copied through, and each action evaluates a pipeline of
//! function calls whose result is written in its place.
//!
//! ```text
//! database:
//!   host: {{ env "DB_HOST" "localhost" }}
//!   password: {{ vault "secret/db" "password" }}
//!   name: {{- /* trimmed comment */ -}} {{ env "DB_NAME" | upper }}
//! ```
//!
//! Here `upper` stands for a caller-registered function; `env` and `vault`
//! are built in.
//!
//! `{{ if pipeline }}`, `{{ with pipeline }}`, `{{ else }}`, `{{ else if }}`
//! and `{{ end }}` select between branches. A value is false when it is
//! empty, `false` or `0`. Inside `with`, `{{ . }}` is the tested value;
//! elsewhere it is empty. Number literals are written in canonical decimal
//! form, so `{{ 0x1F }}` renders as `31`.
//!
//! ```text
//! log:
//!   level: {{ if eq (env "STAGE") "prod" }}warn{{ else }}debug{{ end }}
//! {{- with env "LOG_FILE" }}
//!   file: {{ . }}
//! {{- end }}
//! ```
//!
//! Functions only see the arguments written in the action. `range`,
//! `define`, `template` and `block`, variables (`$x`) and field access
//! (`.Field`) are rejected at parse time.

mod delimiters;
mod exec;
mod lexer;
mod parser;

pub use delimiters::{DEFAULT_LEFT, DEFAULT_RIGHT, Delimiters};

use crate::ConfigResult;
use crate::functions::FunctionSet;

use exec::Executor;
use lexer::Lexer;
use parser::Node;

/// A parsed template, ready to execute.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source` using `delimiters`.
    ///
    /// Function names are resolved against `functions` at parse time, so a
    /// call to an unregistered function is a parse error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::TemplateParse`] when the template is
    /// malformed.
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        delimiters: &Delimiters,
        functions: &FunctionSet,
    ) -> ConfigResult<Self> {
        let owned = name.into();
        let segments = Lexer::new(&owned, source, delimiters).lex()?;
        let nodes = parser::parse_segments(&owned, segments, functions)?;
        Ok(Self { name: owned, nodes })
    }

    /// Name used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template, calling functions from `functions`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::TemplateExecution`] when a function fails
    /// or is no longer registered.
    pub fn execute(&self, functions: &FunctionSet) -> ConfigResult<String> {
        Executor::new(&self.name, functions).render(&self.nodes)
    }
}

/// Parse and execute `source` in one step.
///
/// # Errors
///
/// Returns [`crate::ConfigError::TemplateParse`] for malformed templates and
/// [`crate::ConfigError::TemplateExecution`] when a function fails.
///
/// # Examples
///
/// ```
/// use templated_config::functions::FunctionSet;
/// use templated_config::template::render;
/// use templated_config::Delimiters;
///
/// let mut functions = FunctionSet::empty();
/// functions.register("shout", |args: &[String]| Ok(args.concat().to_uppercase()));
///
/// let delimiters = Delimiters::new("[[", "]]");
/// let text = render("greeting", "msg: [[ shout \"hi\" ]]", &functions, &delimiters)?;
/// assert_eq!(text, "msg: HI");
/// # Ok::<(), templated_config::ConfigError>(())
/// ```
pub fn render(
    name: &str,
    source: &str,
    functions: &FunctionSet,
    delimiters: &Delimiters,
) -> ConfigResult<String> {
    Template::parse(name, source, delimiters, functions)?.execute(functions)
}
