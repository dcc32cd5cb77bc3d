//! Format-specific parsing of rendered configuration text.

use serde_json::{Map, Value};
use serde_saphyr::Options;

use crate::{ConfigError, ConfigResult, Format};

/// Parse rendered text into the mapping it describes.
///
/// YAML is parsed with strict YAML 1.2 booleans, so `yes` and `on` stay
/// strings. An empty or comment-only YAML document yields an empty mapping.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the text is malformed or its root is
/// not a mapping.
pub fn parse_document(rendered: &str, format: Format) -> ConfigResult<Map<String, Value>> {
    let value = match format {
        Format::Json => {
            serde_json::from_str::<Value>(rendered).map_err(|err| ConfigError::parse(format, err))?
        }
        Format::Yaml if is_blank_yaml(rendered) => Value::Null,
        Format::Yaml => parse_yaml(rendered).map_err(|err| ConfigError::parse(format, err))?,
    };
    match value {
        Value::Object(map) => Ok(map),
        Value::Null if format == Format::Yaml => Ok(Map::new()),
        other => Err(ConfigError::parse(
            format,
            format!(
                "expected a mapping at the document root, found {}",
                kind_of(&other)
            ),
        )),
    }
}

fn parse_yaml(contents: &str) -> Result<Value, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
}

fn is_blank_yaml(contents: &str) -> bool {
    contents.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
