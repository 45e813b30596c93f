//! The time-stepping engine.
//!
//! One call to [`Stepper::step`] walks the phases
//!
//! ```text
//! Idle ──prepare──▶ Prepared ──iterate×n──▶ Stepping ──download──▶ Done
//! ```
//!
//! - **Prepared**: the [`StepPlan`] is built (mask table computed once) and
//!   the backend has uploaded the initial state into a [`DoubleBuffer`].
//! - **Stepping**: each iteration runs `apply`, then `barrier`, then
//!   flips the buffers and advances simulated time.
//! - **Done**: the buffer holding the *current* role is downloaded and
//!   committed to the world.
//!
//! A failure in any phase aborts the call. The world is only written in
//! the final commit, so a failed call leaves it at its pre-call state, but
//! callers must not rely on that.

use std::time::Instant;

use tracing::{debug, trace};

use hotplate_core::World;

use crate::backend::ExecutionBackend;
use crate::error::StepError;
use crate::metrics::StepMetrics;
use crate::plan::StepPlan;

/// Where the most recent stepping call got to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepPhase {
    /// No call has started.
    #[default]
    Idle,
    /// Plan built and buffers uploaded.
    Prepared,
    /// Inside the iteration loop; `completed` iterations have finished.
    Stepping {
        /// Iterations fully completed (applied, synchronised and flipped).
        completed: u32,
    },
    /// The final state has been committed.
    Done,
}

/// Drives an [`ExecutionBackend`] through whole stepping calls.
pub struct Stepper<B: ExecutionBackend> {
    backend: B,
    phase: StepPhase,
    last_metrics: StepMetrics,
}

impl<B: ExecutionBackend> Stepper<B> {
    /// Wrap `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            phase: StepPhase::Idle,
            last_metrics: StepMetrics::default(),
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Phase reached by the most recent call.
    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    /// Metrics of the most recent successful call.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Advance `world` by `n` iterations of size `dt`.
    ///
    /// On success the world's state is the result of exactly `n` Jacobi
    /// iterations and its simulated time is `t0 + n * dt`.
    pub fn step(&mut self, world: &mut World, dt: f32, n: u32) -> Result<&StepMetrics, StepError> {
        let call_start = Instant::now();
        self.phase = StepPhase::Idle;

        let start_time = world.time();
        let plan = StepPlan::new(world, dt, self.backend.variant())?;
        let mut buffers = self.backend.upload(&plan, world.state())?;
        self.phase = StepPhase::Prepared;
        let prepare_us = call_start.elapsed().as_micros() as u64;

        let iterate_start = Instant::now();
        let mut time = start_time;
        for k in 0..n {
            {
                let (current, next) = buffers.split();
                self.backend.apply(&plan, current, next)?;
            }
            self.backend.barrier()?;
            buffers = buffers.flip();
            // Computed from the start time rather than accumulated, so the
            // final value is exactly `t0 + n * dt`.
            time = start_time + (k + 1) as f32 * dt;
            self.phase = StepPhase::Stepping { completed: k + 1 };
            trace!(iteration = k + 1, time, "iteration complete");
        }
        let iterate_us = iterate_start.elapsed().as_micros() as u64;

        let readback_start = Instant::now();
        let state = self.backend.download(&plan, buffers.into_current())?;
        drop(plan);
        world.commit_step(state, time)?;
        self.phase = StepPhase::Done;
        let readback_us = readback_start.elapsed().as_micros() as u64;

        self.last_metrics = StepMetrics {
            backend: self.backend.name().to_string(),
            iterations: n,
            cells: world.dims().cell_count(),
            prepare_us,
            iterate_us,
            readback_us,
            total_us: call_start.elapsed().as_micros() as u64,
        };
        debug!(
            backend = %self.last_metrics.backend,
            iterations = n,
            cells = self.last_metrics.cells,
            total_us = self.last_metrics.total_us,
            "step complete"
        );
        Ok(&self.last_metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DoubleBuffer;
    use crate::error::{ConfigError, ResourceError};
    use crate::SequentialBackend;
    use hotplate_stencil::KernelVariant;
    use hotplate_test_utils::{scenario_a, scenario_b, scenario_c};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn hot_centre_one_step() {
        let mut world = scenario_a();
        let mut stepper = Stepper::new(SequentialBackend::default());
        stepper.step(&mut world, 0.25, 1).unwrap();
        let c = world.value(1, 1).unwrap();
        assert!(close(c, 0.9375 / 1.9375), "centre = {c}");
        assert_eq!(world.time(), 0.25);
        assert_eq!(stepper.phase(), StepPhase::Done);
    }

    #[test]
    fn insulated_north_one_step() {
        let mut world = scenario_b();
        let mut stepper = Stepper::new(SequentialBackend::default());
        stepper.step(&mut world, 0.25, 1).unwrap();
        let c = world.value(1, 1).unwrap();
        assert!(close(c, 0.9375 / 1.6875), "centre = {c}");
    }

    #[test]
    fn all_fixed_grid_only_advances_time() {
        let mut world = scenario_c([0.1, 0.9, 0.3, 0.7]);
        let before = world.state().to_vec();
        let mut stepper = Stepper::new(SequentialBackend::default());
        stepper.step(&mut world, 0.1, 7).unwrap();
        assert_eq!(world.state(), &before[..]);
        assert_eq!(world.time(), 7.0 * 0.1);
    }

    #[test]
    fn zero_iterations_is_identity() {
        let mut world = scenario_a();
        let before = world.clone();
        let mut stepper = Stepper::new(SequentialBackend::default());
        let metrics = stepper.step(&mut world, 0.25, 0).unwrap();
        assert_eq!(metrics.iterations, 0);
        assert_eq!(world, before);
    }

    #[test]
    fn metrics_describe_the_call() {
        let mut world = scenario_a();
        let mut stepper = Stepper::new(SequentialBackend::default());
        stepper.step(&mut world, 0.1, 3).unwrap();
        let m = stepper.last_metrics();
        assert_eq!(m.backend, "sequential");
        assert_eq!(m.iterations, 3);
        assert_eq!(m.cells, 9);
        assert!(m.total_us >= m.iterate_us);
    }

    #[test]
    fn invalid_dt_leaves_world_untouched() {
        let mut world = scenario_a();
        let before = world.clone();
        let mut stepper = Stepper::new(SequentialBackend::default());
        match stepper.step(&mut world, f32::NAN, 1) {
            Err(StepError::Configuration(ConfigError::InvalidDt { .. })) => {}
            other => panic!("expected InvalidDt, got {other:?}"),
        }
        assert_eq!(world, before);
        assert_eq!(stepper.phase(), StepPhase::Idle);
    }

    // ------------------------------------------------------------------
    // Failure propagation
    // ------------------------------------------------------------------

    /// Sequential backend whose barrier fails on the given iteration.
    struct FailingBarrier {
        inner: SequentialBackend,
        fail_at: u32,
        seen: u32,
    }

    impl ExecutionBackend for FailingBarrier {
        type Buffer = Vec<f32>;

        fn name(&self) -> &str {
            "failing"
        }

        fn variant(&self) -> KernelVariant {
            self.inner.variant()
        }

        fn upload(
            &mut self,
            plan: &StepPlan<'_>,
            state: &[f32],
        ) -> Result<DoubleBuffer<Vec<f32>>, StepError> {
            self.inner.upload(plan, state)
        }

        fn apply(
            &mut self,
            plan: &StepPlan<'_>,
            current: &Vec<f32>,
            next: &mut Vec<f32>,
        ) -> Result<(), StepError> {
            self.inner.apply(plan, current, next)
        }

        fn barrier(&mut self) -> Result<(), StepError> {
            self.seen += 1;
            if self.seen == self.fail_at {
                return Err(ResourceError::TransferFailed {
                    reason: "device lost".into(),
                }
                .into());
            }
            Ok(())
        }

        fn download(
            &mut self,
            plan: &StepPlan<'_>,
            buffer: Vec<f32>,
        ) -> Result<Vec<f32>, StepError> {
            self.inner.download(plan, buffer)
        }
    }

    #[test]
    fn backend_failure_aborts_whole_call() {
        let mut world = scenario_a();
        let before = world.clone();
        let mut stepper = Stepper::new(FailingBarrier {
            inner: SequentialBackend::default(),
            fail_at: 3,
            seen: 0,
        });
        match stepper.step(&mut world, 0.1, 10) {
            Err(StepError::Resource(ResourceError::TransferFailed { .. })) => {}
            other => panic!("expected TransferFailed, got {other:?}"),
        }
        assert_eq!(stepper.phase(), StepPhase::Stepping { completed: 2 });
        assert_eq!(world, before, "no partial progress is committed");
    }
}
