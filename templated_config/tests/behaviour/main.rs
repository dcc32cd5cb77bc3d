//! Behavioural scenarios for layered, templated configuration loading.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files to the shared [`fixtures`].

mod fixtures;
mod scenarios;
mod steps;
