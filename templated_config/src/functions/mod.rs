//! Registry of the functions callable from configuration templates.
//!
//! Every function shares one contract: it receives its arguments as text and
//! returns text or an error. [`FunctionSet::with_builtins`] provides
//! [`ENV_FUNCTION`], the comparison functions (`eq`, `ne`, `lt`, `le`, `gt`,
//! `ge`), the boolean functions (`not`, `and`, `or`), `len`, and the print
//! functions (`print`, `println`, `printf`). [`SECRET_FUNCTION`] is present
//! only when the loader was given a secret store. Registering a function
//! under any of these names replaces the built-in.

mod builtins;
mod logic;
mod printf;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::secrets::SecretStore;
use crate::{ConfigResult, FunctionError};

pub use builtins::{lookup_env, lookup_secret};
pub use logic::is_truthy;

/// Name of the built-in environment lookup function.
pub const ENV_FUNCTION: &str = "env";

/// Name of the built-in secret lookup function.
pub const SECRET_FUNCTION: &str = "vault";

/// A function callable from templates.
pub type TemplateFunction =
    Arc<dyn Fn(&[String]) -> Result<String, FunctionError> + Send + Sync>;

type Builtin = fn(&[String]) -> ConfigResult<String>;

const STANDARD_FUNCTIONS: [(&str, Builtin); 13] = [
    ("and", logic::and),
    ("eq", logic::eq),
    ("ge", logic::ge),
    ("gt", logic::gt),
    ("le", logic::le),
    ("len", logic::len),
    ("lt", logic::lt),
    ("ne", logic::ne),
    ("not", logic::not),
    ("or", logic::or),
    ("print", printf::print),
    ("printf", printf::printf),
    ("println", printf::println),
];

/// Named functions available while rendering templates.
#[derive(Clone, Default)]
pub struct FunctionSet {
    entries: BTreeMap<String, TemplateFunction>,
}

impl FunctionSet {
    /// Create an empty set without any built-ins.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Create a set holding the built-in functions.
    ///
    /// The secret lookup function is registered only when `secrets` is
    /// supplied.
    #[must_use]
    pub fn with_builtins(secrets: Option<Arc<dyn SecretStore>>) -> Self {
        let mut set = Self::empty();
        for (name, builtin) in STANDARD_FUNCTIONS {
            set.register(name, move |args: &[String]| builtin(args).map_err(Into::into));
        }
        set.register(ENV_FUNCTION, |args: &[String]| {
            lookup_env(args).map_err(Into::into)
        });
        if let Some(store) = secrets {
            set.register(SECRET_FUNCTION, move |args: &[String]| {
                lookup_secret(store.as_ref(), args).map_err(Into::into)
            });
        }
        set
    }

    /// Register `function` under `name`.
    ///
    /// An existing entry with the same name is replaced; the last
    /// registration wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use templated_config::functions::FunctionSet;
    ///
    /// let mut functions = FunctionSet::empty();
    /// functions.register("upper", |args: &[String]| Ok(args.concat().to_uppercase()));
    /// assert!(functions.contains("upper"));
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[String]) -> Result<String, FunctionError> + Send + Sync + 'static,
    {
        let key = name.into();
        tracing::debug!(function = %key, "registering template function");
        self.entries.insert(key, Arc::new(function));
    }

    /// Register every function in `other`, replacing same-named entries.
    pub fn extend(&mut self, other: Self) {
        for (name, function) in other.entries {
            tracing::debug!(function = %name, "registering template function");
            self.entries.insert(name, function);
        }
    }

    /// Look up the function registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TemplateFunction> {
        self.entries.get(name)
    }

    /// Returns `true` if a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
