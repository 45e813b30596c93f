//! wgpu adapter enumeration, grouped into platforms by graphics API.

use hotplate_engine::{DeviceInfo, DeviceKind, PlatformInfo};

/// One graphics API and the adapters it exposes.
pub struct GpuPlatform {
    /// Registry view of this platform.
    pub info: PlatformInfo,
    /// Adapters, index-aligned with `info.devices`.
    pub adapters: Vec<wgpu::Adapter>,
}

fn device_kind(t: wgpu::DeviceType) -> DeviceKind {
    match t {
        wgpu::DeviceType::Cpu => DeviceKind::Cpu,
        wgpu::DeviceType::IntegratedGpu => DeviceKind::IntegratedGpu,
        wgpu::DeviceType::DiscreteGpu => DeviceKind::DiscreteGpu,
        wgpu::DeviceType::VirtualGpu => DeviceKind::VirtualGpu,
        wgpu::DeviceType::Other => DeviceKind::Other,
    }
}

/// Enumerate every adapter on `instance`, grouping them by backend API in
/// first-seen order.
pub fn enumerate_platforms(instance: &wgpu::Instance) -> Vec<GpuPlatform> {
    let mut platforms: Vec<GpuPlatform> = Vec::new();
    for adapter in instance.enumerate_adapters(wgpu::Backends::all()) {
        let info = adapter.get_info();
        let name = format!("{:?}", info.backend);
        let device = DeviceInfo {
            name: info.name.clone(),
            kind: device_kind(info.device_type),
            compute_units: 0,
        };
        match platforms.iter_mut().find(|p| p.info.name == name) {
            Some(p) => {
                p.info.devices.push(device);
                p.adapters.push(adapter);
            }
            None => {
                let vendor = if info.driver.is_empty() {
                    "unknown driver".to_string()
                } else {
                    format!("{} {}", info.driver, info.driver_info).trim().to_string()
                };
                platforms.push(GpuPlatform {
                    info: PlatformInfo {
                        name,
                        vendor,
                        devices: vec![device],
                    },
                    adapters: vec![adapter],
                });
            }
        }
    }
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_types_map_to_kinds() {
        assert_eq!(device_kind(wgpu::DeviceType::Cpu), DeviceKind::Cpu);
        assert_eq!(
            device_kind(wgpu::DeviceType::DiscreteGpu),
            DeviceKind::DiscreteGpu
        );
        assert_eq!(device_kind(wgpu::DeviceType::Other), DeviceKind::Other);
    }

    #[test]
    #[ignore] // Requires GPU
    fn platforms_are_index_aligned() {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        for p in enumerate_platforms(&instance) {
            assert_eq!(p.info.devices.len(), p.adapters.len());
            assert!(!p.info.devices.is_empty());
        }
    }
}
