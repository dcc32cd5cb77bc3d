//! Steps that describe the layers, environment and loader options.

use anyhow::{Result, ensure};
use rstest_bdd_macros::given;
use templated_config::{ConfigSource, StaticSecretStore};
use test_helpers::env::{self, EnvVarGuard};
use test_helpers::text::{fragment, unquote};

use crate::fixtures::LayeringContext;

const DEFAULT_LAYER: &str =
    r#"{"a": "default_a", "b": "default_b", "c": {"val": "default_c"}}"#;

fn push_source(context: &LayeringContext, source: ConfigSource) {
    let mut sources = context.sources.take().unwrap_or_default();
    sources.push(source);
    context.sources.set(sources);
}

fn push_guard(context: &LayeringContext, guard: EnvVarGuard) {
    let mut guards = context.env_guards.take().unwrap_or_default();
    guards.push(guard);
    context.env_guards.set(guards);
}

#[given("the default JSON layer")]
fn default_layer(layering_context: &LayeringContext) {
    push_source(layering_context, ConfigSource::inline(DEFAULT_LAYER, "json"));
}

#[given("a {format} layer {contents}")]
fn inline_layer(layering_context: &LayeringContext, format: String, contents: String) {
    push_source(
        layering_context,
        ConfigSource::inline(fragment(&contents), unquote(&format)),
    );
}

#[given("the environment variable {name} is set to {value}")]
fn set_env(layering_context: &LayeringContext, name: String, value: String) {
    push_guard(layering_context, env::set_var(unquote(&name), unquote(&value)));
}

#[given("the environment variable {name} is unset")]
fn unset_env(layering_context: &LayeringContext, name: String) {
    push_guard(layering_context, env::remove_var(unquote(&name)));
}

#[given("a secret store holding {value} at {path} key {key}")]
fn secret_store(
    layering_context: &LayeringContext,
    value: String,
    path: String,
    key: String,
) -> Result<()> {
    ensure!(
        layering_context.secrets.is_empty(),
        "secret store already configured"
    );
    layering_context.secrets.set(StaticSecretStore::new().with_secret(
        unquote(&path),
        unquote(&key),
        unquote(&value),
    ));
    Ok(())
}

#[given("the delimiters {left} and {right}")]
fn delimiters(layering_context: &LayeringContext, left: String, right: String) {
    layering_context
        .delimiters
        .set((unquote(&left).to_owned(), unquote(&right).to_owned()));
}
