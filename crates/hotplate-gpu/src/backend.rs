//! wgpu compute implementation of the execution-backend contract.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{error, info, warn};
use wgpu::util::DeviceExt;

use hotplate_engine::{
    BuildError, DeviceBuildLog, DeviceInfo, DeviceSelection, DoubleBuffer, ExecutionBackend,
    ResourceError, StepError, StepPlan,
};
use hotplate_stencil::{pack_masks, KernelVariant};

use crate::adapter::enumerate_platforms;
use crate::kernel::{KernelSource, DEFAULT_KERNEL_DIR, ENTRY_POINT};

/// Workgroup edge length; must match `@workgroup_size` in the kernels.
const WORKGROUP: u32 = 16;

// ── GpuConfig ──────────────────────────────────────────────────────

/// Configuration for [`GpuBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GpuConfig {
    /// Platform (graphics API) and adapter to run on. Default: `0/0`.
    pub selection: DeviceSelection,
    /// Directory holding the WGSL kernels. Default: [`DEFAULT_KERNEL_DIR`].
    pub kernel_dir: PathBuf,
    /// Kernel to load. Default: packed mask.
    pub variant: KernelVariant,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            selection: DeviceSelection::default(),
            kernel_dir: PathBuf::from(DEFAULT_KERNEL_DIR),
            variant: KernelVariant::default(),
        }
    }
}

/// Uniform block shared by both kernels.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct StepParams {
    width: u32,
    height: u32,
    inner: f32,
    outer: f32,
}

/// One device-resident state buffer.
///
/// `slot` identifies which of the two buffers created by `upload` this
/// is, so `apply` can pick the bind group that reads this buffer.
pub struct GpuStateBuffer {
    slot: usize,
    buffer: wgpu::Buffer,
}

/// Per-call device data, created by `upload` and released by `download`.
struct Resident {
    /// `bind_groups[s]` reads slot `s` and writes slot `1 - s`.
    bind_groups: [wgpu::BindGroup; 2],
    staging: wgpu::Buffer,
    size: u64,
}

/// A compiled kernel on one opened device.
struct Compiled {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
}

/// GPU backend: one shader invocation per cell.
pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
    device_info: DeviceInfo,
    variant: KernelVariant,
    resident: Option<Resident>,
}

impl GpuBackend {
    /// Enumerate adapters, resolve the selection, load the kernel and build
    /// it on every device of the chosen platform.
    ///
    /// # Errors
    ///
    /// - Resource errors when no adapter exists or the chosen one cannot
    ///   be opened.
    /// - Configuration errors for out-of-range indices or a missing kernel
    ///   file.
    /// - [`BuildError`] with one log per device when any build fails.
    pub fn new(config: &GpuConfig) -> Result<Self, StepError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let mut platforms = enumerate_platforms(&instance);
        let infos: Vec<_> = platforms.iter().map(|p| p.info.clone()).collect();
        let (_, device_info) = hotplate_engine::platform::select_device(&infos, config.selection)?;
        let device_info = device_info.clone();

        let source = KernelSource::load(&config.kernel_dir, config.variant)?;
        info!("Loaded kernel from '{}'", source.path.display());

        let adapters = std::mem::take(&mut platforms[config.selection.platform_index].adapters);
        let mut logs = Vec::with_capacity(adapters.len());
        let mut failed = false;
        let mut chosen = None;
        for (i, adapter) in adapters.iter().enumerate() {
            let name = adapter.get_info().name;
            let compiled = match open_device(adapter, &name) {
                Ok(c) => c,
                Err(e) if i == config.selection.device_index => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping device {name}: {e}");
                    continue;
                }
            };
            match build(compiled, &source) {
                Ok(c) => {
                    logs.push(DeviceBuildLog {
                        device: name,
                        log: String::new(),
                    });
                    if i == config.selection.device_index {
                        chosen = Some(c);
                    }
                }
                Err(log) => {
                    failed = true;
                    logs.push(DeviceBuildLog { device: name, log });
                }
            }
        }

        if failed {
            for entry in &logs {
                error!("log for device {}:\n\n{}\n", entry.device, entry.log);
            }
            return Err(BuildError { logs }.into());
        }
        let compiled = chosen.ok_or_else(|| ResourceError::DeviceRequestFailed {
            device: device_info.name.clone(),
            reason: "device was not built".to_string(),
        })?;

        Ok(Self {
            device: compiled.device,
            queue: compiled.queue,
            layout: compiled.layout,
            pipeline: compiled.pipeline,
            device_info,
            variant: config.variant,
            resident: None,
        })
    }

    /// The adapter this backend runs on.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    fn resident(&self) -> Result<&Resident, StepError> {
        self.resident.as_ref().ok_or_else(|| {
            ResourceError::TransferFailed {
                reason: "state buffers are not resident".to_string(),
            }
            .into()
        })
    }
}

fn open_device(adapter: &wgpu::Adapter, name: &str) -> Result<(wgpu::Device, wgpu::Queue), ResourceError> {
    pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("hotplate device"),
            required_features: wgpu::Features::empty(),
            required_limits: adapter.limits(),
        },
        None,
    ))
    .map_err(|e| ResourceError::DeviceRequestFailed {
        device: name.to_string(),
        reason: e.to_string(),
    })
}

/// Compile `source` on an opened device. Validation errors are captured in
/// an error scope and returned as the device's build log.
fn build(
    (device, queue): (wgpu::Device, wgpu::Queue),
    source: &KernelSource,
) -> Result<Compiled, String> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("hotplate step kernel"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&source.text)),
    });

    let storage = |binding, read_only| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("hotplate step layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            storage(1, true),
            storage(2, false),
            storage(3, true),
        ],
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("hotplate step pipeline layout"),
        bind_group_layouts: &[&layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("hotplate step pipeline"),
        layout: Some(&pipeline_layout),
        module: &module,
        entry_point: ENTRY_POINT,
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(e) => Err(e.to_string()),
        None => Ok(Compiled {
            device,
            queue,
            layout,
            pipeline,
        }),
    }
}

impl ExecutionBackend for GpuBackend {
    type Buffer = GpuStateBuffer;

    fn name(&self) -> &str {
        "gpu"
    }

    fn variant(&self) -> KernelVariant {
        self.variant
    }

    fn upload(
        &mut self,
        plan: &StepPlan<'_>,
        state: &[f32],
    ) -> Result<DoubleBuffer<GpuStateBuffer>, StepError> {
        let dims = plan.dims();
        let limits = self.device.limits();
        let size = std::mem::size_of_val(state) as u64;
        if size > u64::from(limits.max_storage_buffer_binding_size) {
            return Err(ResourceError::TransferFailed {
                reason: format!(
                    "state of {size} bytes exceeds the device binding limit of {}",
                    limits.max_storage_buffer_binding_size
                ),
            }
            .into());
        }
        let max_groups = limits.max_compute_workgroups_per_dimension;
        if dims.width.div_ceil(WORKGROUP) > max_groups || dims.height.div_ceil(WORKGROUP) > max_groups {
            return Err(ResourceError::TransferFailed {
                reason: format!("grid {dims} exceeds the device dispatch limit"),
            }
            .into());
        }

        let c = plan.coefficients();
        let params = StepParams {
            width: dims.width,
            height: dims.height,
            inner: c.inner,
            outer: c.outer,
        };
        let params = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hotplate params"),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        // Read-only per-cell data: four packed masks per word, or one flag
        // word per cell.
        let cell_words: Vec<u32> = match plan.variant() {
            KernelVariant::PackedMask => pack_masks(plan.masks()),
            KernelVariant::Flags => plan.flags().iter().map(|f| f.bits()).collect(),
        };
        let cells = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hotplate cell data"),
                contents: bytemuck::cast_slice(&cell_words),
                usage: wgpu::BufferUsages::STORAGE,
            });

        let usage =
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC | wgpu::BufferUsages::COPY_DST;
        let a = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hotplate state a"),
                contents: bytemuck::cast_slice(state),
                usage,
            });
        let b = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hotplate state b"),
            size,
            usage,
            mapped_at_creation: false,
        });
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hotplate staging"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind = |read: &wgpu::Buffer, write: &wgpu::Buffer, label| {
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: params.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: read.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: write.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: cells.as_entire_binding(),
                    },
                ],
            })
        };
        let bind_groups = [
            bind(&a, &b, "hotplate a->b"),
            bind(&b, &a, "hotplate b->a"),
        ];

        self.resident = Some(Resident {
            bind_groups,
            staging,
            size,
        });
        Ok(DoubleBuffer::new(
            GpuStateBuffer { slot: 0, buffer: a },
            GpuStateBuffer { slot: 1, buffer: b },
        ))
    }

    fn apply(
        &mut self,
        plan: &StepPlan<'_>,
        current: &GpuStateBuffer,
        next: &mut GpuStateBuffer,
    ) -> Result<(), StepError> {
        debug_assert_ne!(current.slot, next.slot);
        let resident = self.resident()?;
        let dims = plan.dims();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hotplate step"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("hotplate step pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &resident.bind_groups[current.slot], &[]);
            pass.dispatch_workgroups(
                dims.width.div_ceil(WORKGROUP),
                dims.height.div_ceil(WORKGROUP),
                1,
            );
        }
        self.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    fn barrier(&mut self) -> Result<(), StepError> {
        self.device.poll(wgpu::Maintain::Wait);
        Ok(())
    }

    fn download(
        &mut self,
        _plan: &StepPlan<'_>,
        buffer: GpuStateBuffer,
    ) -> Result<Vec<f32>, StepError> {
        let resident = self.resident.take().ok_or_else(|| ResourceError::TransferFailed {
            reason: "state buffers are not resident".to_string(),
        })?;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hotplate readback"),
            });
        encoder.copy_buffer_to_buffer(&buffer.buffer, 0, &resident.staging, 0, resident.size);
        self.queue.submit(Some(encoder.finish()));

        let slice = resident.staging.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| ResourceError::TransferFailed {
                reason: e.to_string(),
            })?
            .map_err(|e| ResourceError::TransferFailed {
                reason: e.to_string(),
            })?;

        let state = {
            let data = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, f32>(&data).to_vec()
        };
        resident.staging.unmap();
        Ok(state)
    }
}
