//! Backend construction and dispatch for `step_world`.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use hotplate_core::World;
use hotplate_engine::{
    DeviceSelection, ExecutionBackend, ParallelBackend, ParallelConfig, SequentialBackend,
    StepMetrics, Stepper, DEFAULT_KERNEL_DIR,
};
#[cfg(not(feature = "gpu"))]
use hotplate_engine::{ConfigError, StepError};
use hotplate_stencil::KernelVariant;

use crate::args::BackendKind;

/// Everything `step_world` needs besides the world, `dt` and `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOptions {
    /// Execution backend.
    pub backend: BackendKind,
    /// Per-cell input the update rule reads.
    pub variant: KernelVariant,
    /// Platform and device indices.
    pub selection: DeviceSelection,
    /// Directory holding the GPU kernels.
    pub kernel_dir: PathBuf,
    /// Worker count for the parallel host backend. `None` = one per core.
    pub threads: Option<usize>,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            variant: KernelVariant::default(),
            selection: DeviceSelection::default(),
            kernel_dir: PathBuf::from(DEFAULT_KERNEL_DIR),
            threads: None,
        }
    }
}

/// Advance `world` by `n` iterations of `dt` on the configured backend.
pub fn step_world(
    world: &mut World,
    dt: f32,
    n: u32,
    options: &StepOptions,
) -> anyhow::Result<StepMetrics> {
    match options.backend {
        BackendKind::Sequential => run(SequentialBackend::new(options.variant), world, dt, n),
        BackendKind::Parallel => {
            let config = ParallelConfig {
                selection: options.selection,
                worker_threads: options.threads,
                variant: options.variant,
            };
            let backend =
                ParallelBackend::new(&config).context("failed to start parallel backend")?;
            run(backend, world, dt, n)
        }
        BackendKind::Gpu => step_gpu(world, dt, n, options),
    }
}

#[cfg(feature = "gpu")]
fn step_gpu(world: &mut World, dt: f32, n: u32, options: &StepOptions) -> anyhow::Result<StepMetrics> {
    let config = hotplate_gpu::GpuConfig {
        selection: options.selection,
        kernel_dir: options.kernel_dir.clone(),
        variant: options.variant,
    };
    let backend = hotplate_gpu::GpuBackend::new(&config).context("failed to start gpu backend")?;
    run(backend, world, dt, n)
}

#[cfg(not(feature = "gpu"))]
fn step_gpu(_: &mut World, _: f32, _: u32, _: &StepOptions) -> anyhow::Result<StepMetrics> {
    Err(StepError::from(ConfigError::BackendUnavailable {
        name: BackendKind::Gpu.to_string(),
    })
    .into())
}

fn run<B: ExecutionBackend>(
    backend: B,
    world: &mut World,
    dt: f32,
    n: u32,
) -> anyhow::Result<StepMetrics> {
    let mut stepper = Stepper::new(backend);
    let metrics = stepper
        .step(world, dt, n)
        .with_context(|| format!("stepping {} world failed", world.dims()))?
        .clone();
    info!(
        backend = %metrics.backend,
        iterations = metrics.iterations,
        total_us = metrics.total_us,
        "Stepped world to t={}",
        world.time()
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotplate_test_utils::{random_world, scenario_a};

    #[test]
    fn sequential_and_parallel_agree() {
        let world = random_world(24, 18, 0.3, 5);
        let mut a = world.clone();
        let mut b = world;
        let seq = StepOptions {
            backend: BackendKind::Sequential,
            ..StepOptions::default()
        };
        let par = StepOptions {
            threads: Some(3),
            ..StepOptions::default()
        };
        step_world(&mut a, 0.1, 7, &seq).unwrap();
        step_world(&mut b, 0.1, 7, &par).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_kernel_dir_is_the_shared_one() {
        let opts = StepOptions::default();
        assert_eq!(opts.kernel_dir, PathBuf::from(hotplate_engine::DEFAULT_KERNEL_DIR));
        assert_eq!(opts.backend, BackendKind::Parallel);
        assert_eq!(opts.variant, KernelVariant::PackedMask);
    }

    #[test]
    fn metrics_name_the_backend() {
        let mut world = scenario_a();
        let opts = StepOptions {
            backend: BackendKind::Sequential,
            ..StepOptions::default()
        };
        let m = step_world(&mut world, 0.25, 2, &opts).unwrap();
        assert_eq!(m.backend, "sequential");
        assert_eq!(m.iterations, 2);
        assert_eq!(world.time(), 0.5);
    }

    #[test]
    fn bad_device_index_fails_and_leaves_world() {
        let mut world = scenario_a();
        let before = world.clone();
        let opts = StepOptions {
            selection: DeviceSelection::new(0, 1),
            ..StepOptions::default()
        };
        let err = step_world(&mut world, 0.25, 1, &opts).unwrap_err();
        assert!(format!("{err:#}").contains("device index 1 out of range"));
        assert_eq!(world, before);
    }

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn gpu_without_feature_is_a_configuration_error() {
        let mut world = scenario_a();
        let opts = StepOptions {
            backend: BackendKind::Gpu,
            ..StepOptions::default()
        };
        let err = step_world(&mut world, 0.25, 1, &opts).unwrap_err();
        assert!(err.to_string().contains("not available"));
    }
}
