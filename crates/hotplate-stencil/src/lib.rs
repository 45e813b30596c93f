//! The five-point heat stencil.
//!
//! Two pieces live here, both pure:
//!
//! - [`mask`]: per-cell [`NeighborMask`] precomputation, run once per
//!   stepping call so the hot loop never dereferences neighbour flags.
//! - [`rule`]: the update rule that maps a cell and its four previous-step
//!   neighbours to the cell's next temperature.
//!
//! Every execution backend (sequential, thread pool, GPU kernel) evaluates
//! exactly these operations in exactly this order, which is what makes
//! their results bit-identical.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod mask;
pub mod rule;

pub use mask::{compute_masks, pack_masks, NeighborMask};
pub use rule::{evaluate_cell, update_cell, Coefficients, KernelVariant};
