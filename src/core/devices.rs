use crate::{
    core::queues::QueueFamilies,
    error::InitError,
};

use vulkanalia::prelude::v1_0::*;
use anyhow::Result;
use::log::*;

/// Returns the first device of the list. No attempt is made at
/// ranking them: the enumeration order decides.
pub fn select_first<T: Copy>(devices: &[T]) -> Result<T, InitError> {
    devices.first().copied().ok_or(InitError::NoPhysicalDevices)
}

pub unsafe fn pick_physical_device(instance: &Instance) -> Result<vk::PhysicalDevice> {
    // There can be more than one graphics device on the system
    // (one dedicated and one integrated graphics card at the
    // same time, for example). We don't compare them here and
    // simply take the first one the driver lists.
    let devices = instance
        .enumerate_physical_devices()
        .map_err(InitError::driver("vkEnumeratePhysicalDevices"))?;

    debug!("{} physical devices available.", devices.len());

    let device = select_first(&devices)?;
    let properties = instance.get_physical_device_properties(device);
    info!("Selected physical device: {}", properties.device_name);

    Ok(device)
}

/// What the driver tells us about the selected device.
#[derive(Clone, Debug, Default)]
pub struct GpuInfo {
    pub properties: vk::PhysicalDeviceProperties,
    pub features: vk::PhysicalDeviceFeatures,
    pub queue_families: QueueFamilies,
}

impl GpuInfo {
    pub unsafe fn query(
        instance: &Instance,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Self> {
        let properties = instance.get_physical_device_properties(physical_device);
        let features = instance.get_physical_device_features(physical_device);
        let queue_families = QueueFamilies::get(instance, physical_device)?;

        debug!(
            "Device API version {}.{}.{}, driver version {:#x}.",
            vk::version_major(properties.api_version),
            vk::version_minor(properties.api_version),
            vk::version_patch(properties.api_version),
            properties.driver_version,
        );

        Ok(Self { properties, features, queue_families })
    }
}
