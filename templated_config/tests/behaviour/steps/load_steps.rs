//! Steps that run the loader and inspect its outcome.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{then, when};
use serde_json::Value;
use templated_config::{ConfigError, ConfigLoader};
use test_helpers::text::unquote;

use crate::fixtures::{LayeringContext, NestedConfig, SampleConfig};

#[when("the layers are loaded")]
fn load_layers(layering_context: &LayeringContext) {
    let mut builder = ConfigLoader::builder();
    if let Some((left, right)) = layering_context.delimiters.take() {
        builder = builder.delimiters(left, right);
    }
    if let Some(store) = layering_context.secrets.take() {
        builder = builder.secret_store(Arc::new(store));
    }
    let mut loader = builder.build();
    let sources = layering_context.sources.take().unwrap_or_default();
    layering_context.outcome.set(loader.load_sources(sources));
    layering_context.loader.set(loader);
}

fn take_outcome(context: &LayeringContext) -> Result<Result<(), ConfigError>> {
    context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("layers were not loaded"))
}

#[then("loading succeeds")]
fn loading_succeeds(layering_context: &LayeringContext) -> Result<()> {
    take_outcome(layering_context)?.map_err(|err| anyhow!("load failed: {err}"))
}

#[then("loading fails with an unsupported format error for {tag}")]
fn unsupported_format(layering_context: &LayeringContext, tag: String) -> Result<()> {
    let err = take_outcome(layering_context)?
        .err()
        .ok_or_else(|| anyhow!("load unexpectedly succeeded"))?;
    let expected = unquote(&tag);
    ensure!(
        matches!(err.innermost(), ConfigError::UnsupportedFormat { format } if format == expected),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("loading fails with a missing secret error for key {name}")]
fn missing_secret(layering_context: &LayeringContext, name: String) -> Result<()> {
    let err = take_outcome(layering_context)?
        .err()
        .ok_or_else(|| anyhow!("load unexpectedly succeeded"))?;
    let expected = unquote(&name);
    ensure!(
        matches!(err.innermost(), ConfigError::MissingSecret { key, .. } if key == expected),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("the decoded config is a={a} b={b} c.val={val}")]
fn decoded_config(
    layering_context: &LayeringContext,
    a: String,
    b: String,
    val: String,
) -> Result<()> {
    let decoded = layering_context
        .loader
        .with_ref(ConfigLoader::unmarshal::<SampleConfig>)
        .ok_or_else(|| anyhow!("layers were not loaded"))??;
    let expected = SampleConfig {
        a,
        b,
        c: NestedConfig { val },
    };
    ensure!(decoded == expected, "unexpected config {decoded:?}; expected {expected:?}");
    Ok(())
}

#[then("the merged value at {key} is {value}")]
fn merged_value(layering_context: &LayeringContext, key: String, value: String) -> Result<()> {
    let actual = layering_context
        .loader
        .with_ref(|loader| loader.get(unquote(&key)).cloned())
        .ok_or_else(|| anyhow!("layers were not loaded"))?;
    let expected = Value::String(unquote(&value).to_owned());
    ensure!(
        actual.as_ref() == Some(&expected),
        "unexpected value at {key}: {actual:?}"
    );
    Ok(())
}
