//! Hotplate: a 2-D heat diffusion simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Hotplate sub-crates. For most users, adding `hotplate` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hotplate::prelude::*;
//!
//! // 16x16 plate: frozen cold border, warm interior, one hot fixed cell.
//! let mut world = World::from_fn(16, 16, 0.1, 0.0, |x, y| {
//!     if x == 0 || y == 0 || x == 15 || y == 15 {
//!         (0.0, CellFlags::FIXED | CellFlags::INSULATOR)
//!     } else if (x, y) == (8, 8) {
//!         (1.0, CellFlags::FIXED)
//!     } else {
//!         (0.5, CellFlags::NONE)
//!     }
//! })
//! .unwrap();
//!
//! let mut stepper = Stepper::new(SequentialBackend::default());
//! let metrics = stepper.step(&mut world, 0.1, 10).unwrap();
//! assert_eq!(metrics.iterations, 10);
//! assert_eq!(world.value(8, 8), Some(1.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hotplate-core` | Cell flags, grid geometry, the validated `World` |
//! | [`stencil`] | `hotplate-stencil` | Neighbour masks and the cell update rule |
//! | [`engine`] | `hotplate-engine` | Stepper, backends, device selection, errors |
//! | [`io`] | `hotplate-io` | World file format and state hashing |
//! | `gpu` | `hotplate-gpu` | wgpu compute backend (feature `gpu`) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`hotplate-core`).
///
/// [`types::World`] is the unit of simulation; [`types::CellFlags`] marks
/// cells as fixed or insulating.
pub use hotplate_core as types;

/// Neighbour masks and the update rule (`hotplate-stencil`).
pub use hotplate_stencil as stencil;

/// Time stepping and execution backends (`hotplate-engine`).
///
/// [`engine::Stepper`] drives any [`engine::ExecutionBackend`]; the host
/// ships [`engine::SequentialBackend`] and [`engine::ParallelBackend`].
pub use hotplate_engine as engine;

/// World persistence (`hotplate-io`).
///
/// Read and write worlds with [`io::load_world`] and [`io::save_world`];
/// compare states with [`io::world_hash`].
pub use hotplate_io as io;

/// wgpu compute backend (`hotplate-gpu`).
#[cfg(feature = "gpu")]
pub use hotplate_gpu as gpu;

/// Common imports for typical Hotplate usage.
///
/// ```rust
/// use hotplate::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use hotplate_core::{CellFlags, GridDims, World, WorldError};

    // Stencil
    pub use hotplate_stencil::KernelVariant;

    // Engine
    pub use hotplate_engine::{
        DeviceSelection, ExecutionBackend, ParallelBackend, ParallelConfig, SequentialBackend,
        StepError, StepMetrics, Stepper,
    };

    // I/O
    pub use hotplate_io::{load_world, save_world, world_hash, WorldEncoding};
}
