//! Behavioural step modules registered with `rstest-bdd`.

pub mod load_steps;
pub mod source_steps;
