//! Unit tests for document parsing and deep overlay.

use anyhow::{Result, ensure};
use rstest::rstest;
use serde_json::{Value, json};

use super::{merge_value, parse_and_merge, parse_document};
use crate::{ConfigError, Format};

#[rstest]
fn later_leaf_values_win() {
    let mut state = json!({});
    merge_value(&mut state, json!({"a": "first", "b": "first"}));
    merge_value(&mut state, json!({"b": "second"}));
    merge_value(&mut state, json!({"b": "third"}));
    assert_eq!(state, json!({"a": "first", "b": "third"}));
}

#[rstest]
fn nested_objects_merge_recursively() {
    let mut state = json!({"c": {"val": "x"}});
    merge_value(&mut state, json!({"c": {"other": "y"}}));
    assert_eq!(state, json!({"c": {"val": "x", "other": "y"}}));
}

#[rstest]
#[case::json_then_yaml(r#"{"DB":{"Host":"a"}}"#, "json", "db:\n  host: b", "yaml")]
#[case::yaml_then_json("Db:\n  HOST: a", "yaml", r#"{"db":{"host":"b"}}"#, "json")]
#[case::both_mixed(r#"{"dB":{"hOsT":"a"}}"#, "json", "DB:\n  Host: b", "yml")]
fn mixed_case_keys_override_each_other(
    #[case] base: &str,
    #[case] base_tag: &str,
    #[case] layer: &str,
    #[case] layer_tag: &str,
) -> Result<()> {
    let mut state = json!({});
    parse_and_merge(base, base_tag, &mut state)?;
    parse_and_merge(layer, layer_tag, &mut state)?;
    ensure!(
        state == json!({"db": {"host": "b"}}),
        "unexpected merged state: {state}"
    );
    Ok(())
}

#[rstest]
fn keys_inside_lists_are_folded() {
    let mut state = json!({});
    merge_value(
        &mut state,
        json!({"Servers": [{"Name": "a"}, "Plain", [{"Port": 1}]]}),
    );
    assert_eq!(
        state,
        json!({"servers": [{"name": "a"}, "Plain", [{"port": 1}]]})
    );
}

#[rstest]
fn colliding_keys_in_one_layer_merge() {
    let mut state = json!({});
    merge_value(
        &mut state,
        json!({"Log": {"level": "info"}, "log": {"json": true}}),
    );
    assert_eq!(state, json!({"log": {"level": "info", "json": true}}));
}

#[rstest]
fn scalar_layers_keep_their_case() {
    let mut state = json!({});
    merge_value(&mut state, json!({"Name": "Demo"}));
    merge_value(&mut state, json!({"NAME": "Other Value"}));
    assert_eq!(state, json!({"name": "Other Value"}));
}

#[rstest]
#[case(json!({"list": [1, 2, 3]}), json!({"list": [4]}), json!({"list": [4]}))]
#[case(json!({"k": {"nested": 1}}), json!({"k": "flat"}), json!({"k": "flat"}))]
#[case(json!({"k": "flat"}), json!({"k": {"nested": 1}}), json!({"k": {"nested": 1}}))]
#[case(json!({"k": [1]}), json!({"k": null}), json!({"k": null}))]
fn non_mapping_values_replace_wholesale(
    #[case] base: Value,
    #[case] layer: Value,
    #[case] expected: Value,
) {
    let mut state = base;
    merge_value(&mut state, layer);
    assert_eq!(state, expected);
}

#[rstest]
fn merge_preserves_first_seen_key_order() -> Result<()> {
    let mut state = json!({});
    parse_and_merge(r#"{"zeta": 1, "alpha": 2}"#, "json", &mut state)?;
    parse_and_merge("mid: 3\nzeta: 4\n", "yaml", &mut state)?;
    let keys: Vec<&str> = state
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    ensure!(keys == ["zeta", "alpha", "mid"], "unexpected key order: {keys:?}");
    ensure!(state["zeta"] == json!(4), "later value should win");
    Ok(())
}

#[rstest]
fn heterogeneous_formats_layer_together() -> Result<()> {
    let mut state = json!({});
    parse_and_merge(
        r#"{"a": "default_a", "b": "default_b", "c": {"val": "default_c"}}"#,
        "json",
        &mut state,
    )?;
    parse_and_merge("b: override_b", "yaml", &mut state)?;
    parse_and_merge("c:\n  val: override_c", "yml", &mut state)?;
    ensure!(
        state
            == json!({"a": "default_a", "b": "override_b", "c": {"val": "override_c"}}),
        "unexpected merged state: {state}"
    );
    Ok(())
}

#[rstest]
fn unsupported_tag_leaves_state_untouched() {
    let mut state = json!({"a": 1});
    let err = parse_and_merge("a = 2", "toml", &mut state).expect_err("toml is unsupported");
    assert!(matches!(err, ConfigError::UnsupportedFormat { ref format } if format == "toml"));
    assert_eq!(state, json!({"a": 1}));
}

#[rstest]
#[case(r#"{"a": "#, Format::Json)]
#[case("a: [", Format::Yaml)]
#[case("a: 1\na: 2", Format::Yaml)]
fn malformed_documents_are_parse_errors(#[case] text: &str, #[case] format: Format) {
    let mut state = json!({"kept": true});
    let err = parse_and_merge(text, format.as_str(), &mut state).expect_err("parse should fail");
    assert!(
        matches!(err, ConfigError::Parse { format: f, .. } if f == format),
        "unexpected error: {err}"
    );
    assert_eq!(state, json!({"kept": true}));
}

#[rstest]
#[case("[1, 2]", Format::Json)]
#[case("\"text\"", Format::Json)]
#[case("- a\n- b", Format::Yaml)]
#[case("plain scalar", Format::Yaml)]
fn non_mapping_roots_are_rejected(#[case] text: &str, #[case] format: Format) {
    let err = parse_document(text, format).expect_err("root must be a mapping");
    assert!(
        err.to_string().contains("expected a mapping"),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case("")]
#[case("# only a comment\n\n")]
#[case("---\n")]
fn blank_yaml_documents_are_empty_mappings(#[case] text: &str) -> Result<()> {
    let map = parse_document(text, Format::Yaml)?;
    ensure!(map.is_empty(), "expected empty mapping, got {map:?}");
    Ok(())
}

#[rstest]
fn yaml_yes_remains_a_string() -> Result<()> {
    let map = parse_document("recipient: yes\nenabled: true", Format::Yaml)?;
    ensure!(map.get("recipient") == Some(&json!("yes")), "yes must stay a string");
    ensure!(map.get("enabled") == Some(&json!(true)), "true must be a boolean");
    Ok(())
}
