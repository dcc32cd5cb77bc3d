//! Shared fixtures for the layering scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde::Deserialize;
use templated_config::{ConfigError, ConfigLoader, ConfigSource, StaticSecretStore};
use test_helpers::env::EnvVarGuard;

/// Nested table of [`SampleConfig`].
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct NestedConfig {
    pub val: String,
}

/// Typed view of the merged configuration used by the scenarios.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct SampleConfig {
    pub a: String,
    pub b: String,
    pub c: NestedConfig,
}

/// Scenario state shared between layering steps.
#[derive(Debug, Default, ScenarioState)]
pub struct LayeringContext {
    pub sources: Slot<Vec<ConfigSource>>,
    pub secrets: Slot<StaticSecretStore>,
    pub delimiters: Slot<(String, String)>,
    pub env_guards: Slot<Vec<EnvVarGuard>>,
    pub loader: Slot<ConfigLoader>,
    pub outcome: Slot<Result<(), ConfigError>>,
}

/// Creates a clean context for each scenario.
#[fixture]
pub fn layering_context() -> LayeringContext {
    LayeringContext::default()
}
