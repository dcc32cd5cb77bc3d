//! Test helpers shared by the `templated_config` workspace.
//!
//! - [`env`]: guarded environment mutation for `env` lookups in templates.
//! - [`figment`]: `figment::Jail` wrappers for file and environment fixtures.
//! - [`text`]: placeholder decoding for behavioural step definitions.

pub mod env;
pub mod figment;
pub mod text;
