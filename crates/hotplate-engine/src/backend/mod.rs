//! The execution-backend contract and the host implementations.
//!
//! A backend realises "apply the update rule to every cell, then wait for
//! completion". The [`Stepper`](crate::Stepper) drives it through a fixed
//! protocol for each stepping call:
//!
//! 1. [`upload`](ExecutionBackend::upload) once: make the initial state and
//!    any read-only per-cell data resident, returning a [`DoubleBuffer`].
//! 2. For each of `n` iterations, [`apply`](ExecutionBackend::apply) then
//!    [`barrier`](ExecutionBackend::barrier), then flip the buffers.
//! 3. [`download`](ExecutionBackend::download) once: return the final
//!    state to the host.
//!
//! `apply` must read neighbour values only from `current` and write every
//! cell of `next`. `barrier` must not return until every write of the
//! preceding `apply` is complete and visible to the next one.

mod parallel;
mod sequential;

pub use parallel::ParallelBackend;
pub use sequential::SequentialBackend;

use hotplate_stencil::KernelVariant;

use crate::buffer::DoubleBuffer;
use crate::error::StepError;
use crate::plan::StepPlan;

/// Strategy that applies one Jacobi iteration to a whole grid.
pub trait ExecutionBackend {
    /// Handle to one state buffer (host vector, device buffer, ...).
    type Buffer;

    /// Short name used in logs and metrics.
    fn name(&self) -> &str;

    /// Per-cell input this backend was configured to read.
    fn variant(&self) -> KernelVariant;

    /// Make `state` and the plan's read-only data resident.
    fn upload(
        &mut self,
        plan: &StepPlan<'_>,
        state: &[f32],
    ) -> Result<DoubleBuffer<Self::Buffer>, StepError>;

    /// Compute every cell of `next` from `current`.
    fn apply(
        &mut self,
        plan: &StepPlan<'_>,
        current: &Self::Buffer,
        next: &mut Self::Buffer,
    ) -> Result<(), StepError>;

    /// Block until the preceding [`apply`](Self::apply) has completed for
    /// every cell.
    fn barrier(&mut self) -> Result<(), StepError> {
        Ok(())
    }

    /// Return the final state to the host.
    fn download(
        &mut self,
        plan: &StepPlan<'_>,
        buffer: Self::Buffer,
    ) -> Result<Vec<f32>, StepError>;
}

/// Host upload shared by the CPU backends: the initial state plus an
/// equally sized scratch buffer.
fn host_upload(state: &[f32]) -> DoubleBuffer<Vec<f32>> {
    DoubleBuffer::new(state.to_vec(), vec![0.0; state.len()])
}
