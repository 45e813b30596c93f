//! GPU execution backend for Hotplate.
//!
//! [`GpuBackend`] implements
//! [`ExecutionBackend`](hotplate_engine::ExecutionBackend) on top of a wgpu
//! compute pipeline: one shader invocation per cell, two device-resident
//! state buffers swapped by handle each iteration, and a blocking device
//! poll as the end-of-iteration barrier.
//!
//! Adapters are grouped into platforms by graphics API (see [`adapter`]),
//! and the WGSL program is read at runtime from a configurable kernel
//! directory (see [`kernel`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod backend;
pub mod kernel;

pub use adapter::{enumerate_platforms, GpuPlatform};
pub use backend::{GpuBackend, GpuConfig, GpuStateBuffer};
pub use kernel::{KernelSource, DEFAULT_KERNEL_DIR, ENTRY_POINT};
