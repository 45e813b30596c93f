//! GPU results against the sequential reference.
//!
//! These need a working adapter and are ignored by default; run with
//! `cargo test -p hotplate-gpu -- --ignored`.

use std::path::Path;

use hotplate_core::World;
use hotplate_engine::{ResourceError, SequentialBackend, StepError, Stepper};
use hotplate_gpu::{GpuBackend, GpuConfig};
use hotplate_stencil::KernelVariant;
use hotplate_test_utils::{random_world, scenario_a};

fn gpu_backend(variant: KernelVariant) -> Option<GpuBackend> {
    let config = GpuConfig {
        kernel_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../src/he915"),
        variant,
        ..GpuConfig::default()
    };
    match GpuBackend::new(&config) {
        Ok(b) => Some(b),
        Err(StepError::Resource(ResourceError::NoPlatform)) => None,
        Err(e) => panic!("gpu backend failed to start: {e}"),
    }
}

fn assert_close(a: &World, b: &World) {
    assert_eq!(a.time(), b.time());
    for (i, (x, y)) in a.state().iter().zip(b.state()).enumerate() {
        assert!((x - y).abs() <= 1e-5, "cell {i}: {x} vs {y}");
    }
}

fn compare(world: &World, dt: f32, n: u32, variant: KernelVariant) {
    let Some(gpu) = gpu_backend(variant) else {
        return;
    };
    let mut expected = world.clone();
    Stepper::new(SequentialBackend::new(variant))
        .step(&mut expected, dt, n)
        .unwrap();

    let mut actual = world.clone();
    let mut stepper = Stepper::new(gpu);
    let metrics = stepper.step(&mut actual, dt, n).unwrap();
    assert_eq!(metrics.iterations, n);
    assert_close(&expected, &actual);
}

#[test]
#[ignore] // Requires GPU
fn scenario_a_matches_sequential() {
    compare(&scenario_a(), 0.25, 1, KernelVariant::PackedMask);
}

#[test]
#[ignore] // Requires GPU
fn packed_kernel_matches_sequential() {
    compare(&random_world(37, 29, 0.1, 7), 0.1, 25, KernelVariant::PackedMask);
}

#[test]
#[ignore] // Requires GPU
fn flags_kernel_matches_sequential() {
    compare(&random_world(37, 29, 0.1, 11), 0.1, 25, KernelVariant::Flags);
}

#[test]
#[ignore] // Requires GPU
fn backend_is_reusable_across_calls() {
    let Some(gpu) = gpu_backend(KernelVariant::PackedMask) else {
        return;
    };
    let world = random_world(20, 20, 0.2, 3);
    let mut expected = world.clone();
    Stepper::new(SequentialBackend::default())
        .step(&mut expected, 0.05, 10)
        .unwrap();

    let mut actual = world;
    let mut stepper = Stepper::new(gpu);
    stepper.step(&mut actual, 0.05, 4).unwrap();
    stepper.step(&mut actual, 0.05, 6).unwrap();
    for (x, y) in expected.state().iter().zip(actual.state()) {
        assert!((x - y).abs() <= 1e-5);
    }
}

#[test]
fn missing_kernel_dir_is_a_configuration_error() {
    let config = GpuConfig {
        kernel_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-dir"),
        ..GpuConfig::default()
    };
    match GpuBackend::new(&config) {
        // No adapter at all is reported before the kernel is read.
        Err(StepError::Resource(ResourceError::NoPlatform)) => {}
        Err(StepError::Configuration(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("backend started without a kernel"),
    }
}
