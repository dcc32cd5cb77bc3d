//! Binds the layering feature file to the step registry.

use rstest_bdd_macros::scenarios;

use crate::fixtures::{LayeringContext, layering_context};

scenarios!(
    "tests/features/layering.feature",
    fixtures = [layering_context: LayeringContext]
);
