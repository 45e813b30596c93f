//! Data-parallel host backend on a dedicated rayon thread pool.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use hotplate_stencil::KernelVariant;

use super::{host_upload, ExecutionBackend};
use crate::buffer::DoubleBuffer;
use crate::config::ParallelConfig;
use crate::error::{ResourceError, StepError};
use crate::plan::StepPlan;
use crate::platform::{host_platforms, select_device, DeviceInfo};

/// One independent work item per cell, dispatched to a private pool.
///
/// Each work item reads only the previous iteration's buffer and the
/// read-only plan, and writes exactly its own output cell, so no locking
/// is needed. `apply` returns only after the pool has joined every work
/// item, which is the end-of-iteration barrier.
pub struct ParallelBackend {
    pool: ThreadPool,
    device: DeviceInfo,
    variant: KernelVariant,
}

impl ParallelBackend {
    /// Resolve the configured host device and start its worker pool.
    pub fn new(config: &ParallelConfig) -> Result<Self, StepError> {
        let threads = config.resolved_worker_threads();
        let platforms = host_platforms(threads);
        let (_, device) = select_device(&platforms, config.selection)?;
        let device = device.clone();

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("hotplate-worker-{i}"))
            .build()
            .map_err(|e| ResourceError::ThreadPoolFailed {
                reason: e.to_string(),
            })?;
        info!("Started {} with {} kernel", device.name, config.variant);

        Ok(Self {
            pool,
            device,
            variant: config.variant,
        })
    }

    /// The device this backend runs on.
    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Number of worker threads.
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl ExecutionBackend for ParallelBackend {
    type Buffer = Vec<f32>;

    fn name(&self) -> &str {
        "parallel"
    }

    fn variant(&self) -> KernelVariant {
        self.variant
    }

    fn upload(
        &mut self,
        _plan: &StepPlan<'_>,
        state: &[f32],
    ) -> Result<DoubleBuffer<Vec<f32>>, StepError> {
        Ok(host_upload(state))
    }

    fn apply(
        &mut self,
        plan: &StepPlan<'_>,
        current: &Vec<f32>,
        next: &mut Vec<f32>,
    ) -> Result<(), StepError> {
        // A row per task keeps scheduling overhead below the stencil cost.
        let min_len = plan.dims().width as usize;
        self.pool.install(|| {
            next.par_iter_mut()
                .enumerate()
                .with_min_len(min_len)
                .for_each(|(i, out)| *out = plan.evaluate(current, i));
        });
        Ok(())
    }

    fn download(&mut self, _plan: &StepPlan<'_>, buffer: Vec<f32>) -> Result<Vec<f32>, StepError> {
        Ok(buffer)
    }
}
