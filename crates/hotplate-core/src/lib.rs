//! Core types for the Hotplate heat diffusion simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! grid world (dimensions, diffusion coefficient, simulated time, per-cell
//! temperatures and boundary flags) together with the validation that every
//! other crate relies on: a world that exists is a world that is safe to step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flags;
pub mod grid;
pub mod world;

pub use error::WorldError;
pub use flags::CellFlags;
pub use grid::{Direction, GridDims};
pub use world::World;
