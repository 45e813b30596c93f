//! Per-call performance metrics for the stepping engine.

/// Timing data collected during a single stepping call.
///
/// All durations are in microseconds. The [`Stepper`](crate::Stepper)
/// replaces these after every successful `step()` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Name of the backend that ran the call.
    pub backend: String,
    /// Iterations completed.
    pub iterations: u32,
    /// Cells per iteration.
    pub cells: usize,
    /// Plan construction and initial upload, in microseconds.
    pub prepare_us: u64,
    /// All iterations including barriers, in microseconds.
    pub iterate_us: u64,
    /// Final read-back and commit, in microseconds.
    pub readback_us: u64,
    /// Wall-clock time for the entire call, in microseconds.
    pub total_us: u64,
}

impl StepMetrics {
    /// Cell updates per second over the iteration phase, or `0.0` when the
    /// phase was too short to measure.
    pub fn cell_updates_per_sec(&self) -> f64 {
        if self.iterate_us == 0 {
            return 0.0;
        }
        let updates = self.cells as f64 * f64::from(self.iterations);
        updates * 1_000_000.0 / self.iterate_us as f64
    }
}
