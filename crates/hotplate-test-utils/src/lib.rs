//! Test utilities for Hotplate development.
//!
//! Provides the reference scenario worlds, a [`TestWorldBuilder`] for
//! ad-hoc layouts, and seeded random worlds for property and
//! cross-backend tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    bordered_world, random_world, scenario_a, scenario_b, scenario_c, TestWorldBuilder,
};
