//! Time-stepping engine for the Hotplate heat diffusion simulator.
//!
//! A [`Stepper`] advances a [`World`](hotplate_core::World) by `n` Jacobi
//! iterations of the five-point stencil. The per-iteration work is
//! delegated to an [`ExecutionBackend`]; this crate ships two host
//! backends:
//!
//! - [`SequentialBackend`]: a single-threaded nested loop.
//! - [`ParallelBackend`]: one work item per cell on a rayon thread pool.
//!
//! The GPU backend lives in `hotplate-gpu` and implements the same trait.
//!
//! # Example
//!
//! ```rust
//! use hotplate_core::{CellFlags, World};
//! use hotplate_engine::{SequentialBackend, Stepper};
//!
//! let mut world = World::from_fn(3, 3, 1.0, 0.0, |x, y| {
//!     if x == 1 && y == 1 {
//!         (1.0, CellFlags::NONE)
//!     } else {
//!         (0.0, CellFlags::FIXED)
//!     }
//! })
//! .unwrap();
//!
//! let mut stepper = Stepper::new(SequentialBackend::default());
//! stepper.step(&mut world, 0.25, 1).unwrap();
//! assert!(world.value(1, 1).unwrap() < 1.0);
//! assert_eq!(world.time(), 0.25);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;
pub mod metrics;
pub mod plan;
pub mod platform;
pub mod stepper;

pub use backend::{ExecutionBackend, ParallelBackend, SequentialBackend};
pub use buffer::DoubleBuffer;
pub use config::ParallelConfig;
pub use error::{BuildError, ConfigError, DeviceBuildLog, ResourceError, StepError};
pub use metrics::StepMetrics;
pub use plan::StepPlan;
pub use platform::{DeviceInfo, DeviceKind, DeviceSelection, PlatformInfo, DEFAULT_KERNEL_DIR};
pub use stepper::{StepPhase, Stepper};
