//! Shared plumbing for the `step_world` and `make_world` binaries.
//!
//! The binaries stay thin: argument parsing lives in [`args`], logging
//! setup in [`logging`], backend dispatch in [`run`], and the test-world
//! generator in [`generator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod generator;
pub mod logging;
pub mod run;

pub use args::{parse_bool_flag, parse_cli_from, BackendKind, VariantArg};
pub use generator::make_test_world;
pub use logging::setup_logging;
pub use hotplate_engine::DEFAULT_KERNEL_DIR;
pub use run::{step_world, StepOptions};
