//! Format-aware parsing and deep overlay of rendered documents.
//!
//! Each rendered fragment is parsed into a JSON object and overlaid onto the
//! accumulated state. Keys are case-insensitive and stored in lowercase.
//! Nested objects merge key by key; scalars, arrays and mismatched types
//! replace the previous value wholesale.

mod parser;

use serde_json::{Map, Value};

use crate::{ConfigResult, Format};

pub use parser::parse_document;

/// Parse `rendered` under the format named by `tag` and overlay it onto
/// `target` in place.
///
/// The document is parsed before `target` is touched, so a parse failure
/// leaves `target` exactly as it was.
///
/// # Errors
///
/// Returns [`crate::ConfigError::UnsupportedFormat`] when `tag` is not a
/// recognised tag and [`crate::ConfigError::Parse`] when the document is
/// malformed or its root is not a mapping.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use templated_config::merge::parse_and_merge;
///
/// let mut state = json!({"c": {"val": "x"}});
/// parse_and_merge("c:\n  other: y\n", "yaml", &mut state)?;
/// assert_eq!(state, json!({"c": {"val": "x", "other": "y"}}));
/// # Ok::<(), templated_config::ConfigError>(())
/// ```
pub fn parse_and_merge(rendered: &str, tag: &str, target: &mut Value) -> ConfigResult<()> {
    merge_document(rendered, Format::from_tag(tag)?, target)
}

/// Parse `rendered` as `format` and overlay it onto `target`.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Parse`] when the document cannot be parsed.
pub fn merge_document(rendered: &str, format: Format, target: &mut Value) -> ConfigResult<()> {
    let document = parse_document(rendered, format)?;
    merge_object(target, document);
    Ok(())
}

/// Fold one rendered layer into the merged configuration state.
///
/// Keys are folded to lowercase as they enter the state, so `Log.Level` and
/// `log.level` name the same setting and the later layer wins. A mapping
/// layer is overlaid key by key onto whatever `target` holds, replacing a
/// non-mapping `target` with an empty mapping first. Any other layer,
/// including a list, replaces `target` outright. Mappings nested in lists
/// have their keys folded too.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use templated_config::merge::merge_value;
///
/// let mut state = json!({});
/// merge_value(&mut state, json!({"Server": {"Port": 8080, "hosts": ["a"]}}));
/// merge_value(&mut state, json!({"server": {"port": 9090, "hosts": ["b", "c"]}}));
/// assert_eq!(state, json!({"server": {"port": 9090, "hosts": ["b", "c"]}}));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => merge_object(target, map),
        other => *target = fold_keys(other),
    }
}

fn merge_object(target: &mut Value, map: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let Some(state) = target.as_object_mut() else {
        return;
    };

    for (key, value) in map {
        let folded = key.to_lowercase();
        match state.get_mut(&folded) {
            Some(existing) => merge_value(existing, value),
            None => {
                state.insert(folded, fold_keys(value));
            }
        }
    }
}

/// Lowercase every mapping key inside `value`.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut folded = Value::Object(Map::new());
            merge_object(&mut folded, map);
            folded
        }
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests;
