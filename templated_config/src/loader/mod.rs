//! Loader façade: renders, parses and merges sources in order.
//!
//! Each source passes through four stages. Its format is resolved, its text
//! is read, the text is rendered as a template, and the rendered document is
//! parsed and overlaid onto the merged state. The first failing source stops
//! the load; sources merged before it stay merged.

mod builder;
mod source;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::Serialized;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use builder::ConfigLoaderBuilder;
pub use source::ConfigSource;

use crate::functions::FunctionSet;
use crate::merge::merge_document;
use crate::secrets::SecretStore;
use crate::template::{Delimiters, render};
use crate::{ConfigError, ConfigResult, Format, FunctionError, SourceOrigin, Stage};

/// Renders templated configuration sources and accumulates their contents.
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use templated_config::{ConfigLoader, ConfigSource};
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let mut loader = ConfigLoader::new();
/// loader.load_sources([
///     ConfigSource::inline(r#"{"server": {"host": "localhost", "port": 80}}"#, "json"),
///     ConfigSource::inline("server:\n  port: {{ 8080 }}\n", "yaml"),
/// ])?;
/// let server: Server = loader.unmarshal_key("server")?;
/// assert_eq!((server.host.as_str(), server.port), ("localhost", 8080));
/// # Ok::<(), templated_config::ConfigError>(())
/// ```
pub struct ConfigLoader {
    functions: FunctionSet,
    delimiters: Delimiters,
    state: Value,
    secrets: Option<Arc<dyn SecretStore>>,
}

impl ConfigLoader {
    /// Creates a loader with default delimiters and no secret store.
    #[must_use]
    pub fn new() -> Self {
        ConfigLoaderBuilder::new().build()
    }

    /// Starts building a customised loader.
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new()
    }

    /// Renders and merges `sources` in order.
    ///
    /// Inline sources are identified in errors by their zero-based position
    /// within `sources`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] for the first source that fails,
    /// naming the source and the stage. Sources before it remain merged.
    pub fn load_sources<I>(&mut self, sources: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = ConfigSource>,
    {
        for (index, source) in sources.into_iter().enumerate() {
            match source {
                ConfigSource::File(path) => self.load_file(path)?,
                ConfigSource::Inline { contents, format } => {
                    self.load_inline(index, &contents, &format)?;
                }
            }
        }
        Ok(())
    }

    /// Renders and merges the files at `paths` in order.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_sources`].
    pub fn load_files<I, P>(&mut self, paths: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.load_sources(paths.into_iter().map(ConfigSource::file))
    }

    /// Renders and merges one inline document tagged with `format`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_sources`].
    pub fn load_str(&mut self, contents: &str, format: &str) -> ConfigResult<()> {
        self.load_inline(0, contents, format)
    }

    fn load_file(&mut self, path: PathBuf) -> ConfigResult<()> {
        let origin = SourceOrigin::File(path.clone());
        let format =
            Format::from_path(&path).map_err(|err| err.in_source(origin.clone(), Stage::Format))?;
        let contents =
            read_file(&path).map_err(|err| err.in_source(origin.clone(), Stage::Read))?;
        self.apply(&origin, &contents, format)
    }

    fn load_inline(&mut self, index: usize, contents: &str, tag: &str) -> ConfigResult<()> {
        let origin = SourceOrigin::Inline(index);
        let format =
            Format::from_tag(tag).map_err(|err| err.in_source(origin.clone(), Stage::Format))?;
        self.apply(&origin, contents, format)
    }

    fn apply(&mut self, origin: &SourceOrigin, contents: &str, format: Format) -> ConfigResult<()> {
        let rendered = render(
            &origin.template_name(),
            contents,
            &self.functions,
            &self.delimiters,
        )
        .map_err(|err| err.in_source(origin.clone(), Stage::Render))?;
        merge_document(&rendered, format, &mut self.state)
            .map_err(|err| err.in_source(origin.clone(), Stage::Merge))?;
        tracing::debug!(source = %origin, %format, "merged config source");
        Ok(())
    }

    /// Registers `function` under `name` for sources loaded afterwards.
    ///
    /// An existing function with the same name, built-in or custom, is
    /// replaced.
    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[String]) -> Result<String, FunctionError> + Send + Sync + 'static,
    {
        self.functions.register(name, function);
    }

    /// Decodes the whole merged state into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unmarshal`] when the state does not fit `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        self.figment().extract().map_err(ConfigError::unmarshal)
    }

    /// Decodes the sub-tree at the dotted `key` into `T`.
    ///
    /// The key is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unmarshal`] when the key is missing or its
    /// value does not fit `T`.
    pub fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        self.figment()
            .extract_inner(&key.to_lowercase())
            .map_err(ConfigError::unmarshal)
    }

    /// Returns the value at the dotted `key`, if present.
    ///
    /// The key is matched case-insensitively, so `Log.Level` finds the value
    /// a fragment wrote under `log: {level: ...}`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let folded = key.to_lowercase();
        folded
            .split('.')
            .try_fold(&self.state, |value, segment| value.as_object()?.get(segment))
    }

    /// Returns `true` when the dotted `key` holds a value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The merged state accumulated so far.
    #[must_use]
    pub const fn merged(&self) -> &Value {
        &self.state
    }

    /// The merged state as a [`Figment`] for further composition.
    #[must_use]
    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(self.state.clone()))
    }

    /// Functions available to templates.
    #[must_use]
    pub const fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    /// Action delimiters used for every source.
    #[must_use]
    pub const fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// The secret store backing the secret lookup function, if any.
    #[must_use]
    pub fn secret_store(&self) -> Option<&Arc<dyn SecretStore>> {
        self.secrets.as_ref()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("functions", &self.functions)
            .field("delimiters", &self.delimiters)
            .field("state", &self.state)
            .field("secrets", &self.secrets.is_some())
            .finish()
    }
}

fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
