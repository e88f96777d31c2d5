use crate::error::InitError;

use vulkanalia::prelude::v1_0::*;
use anyhow::Result;
use log::*;

/// Instance extensions to enable, along with the instance
/// creation flags some of them require.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceExtensions {
    pub names: Vec<vk::ExtensionName>,
    pub flags: vk::InstanceCreateFlags,
}

impl InstanceExtensions {
    pub fn contains(&self, name: &vk::ExtensionName) -> bool {
        self.names.contains(name)
    }
}

/// Builds the instance extension list: the surface extensions
/// required by the window system first, then the optional
/// extensions we recognise among the `available` ones, in the
/// order the driver reported them.
#[allow(deprecated)]
pub fn negotiate_instance_extensions(
    required: &[vk::ExtensionName],
    available: &[vk::ExtensionName],
    validate: bool,
) -> Result<InstanceExtensions, InitError> {
    if required.is_empty() {
        return Err(InitError::MissingSurfaceExtensions);
    }

    let mut extensions = InstanceExtensions {
        names: required.to_vec(),
        flags: vk::InstanceCreateFlags::empty(),
    };

    for name in available {
        // The debug report extension lets the validation layers
        // call us back; it is useless without them.
        if *name == vk::EXT_DEBUG_REPORT_EXTENSION.name && validate {
            extensions.names.push(*name);
        }

        // Drivers which are not fully conformant (MoltenVK, for
        // instance) are only listed by the loader if we opt into
        // portability enumeration.
        if *name == vk::KHR_PORTABILITY_ENUMERATION_EXTENSION.name {
            extensions.names.push(*name);
            extensions.flags |= vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
        }
    }

    Ok(extensions)
}

/// Device extensions the renderer cannot work without.
pub const REQUIRED_DEVICE_EXTENSIONS: &[vk::ExtensionName] = &[
    vk::KHR_SWAPCHAIN_EXTENSION.name,
];

/// Checks the device extensions against the required ones and
/// returns the list to enable.
pub fn select_device_extensions(
    available: &[vk::ExtensionName],
) -> Result<Vec<vk::ExtensionName>, InitError> {
    let mut extensions = Vec::with_capacity(REQUIRED_DEVICE_EXTENSIONS.len());
    for name in available {
        if REQUIRED_DEVICE_EXTENSIONS.contains(name) && !extensions.contains(name) {
            extensions.push(*name);
        }
    }

    if extensions.len() == REQUIRED_DEVICE_EXTENSIONS.len() {
        Ok(extensions)
    } else {
        Err(InitError::MissingSwapchainExtension)
    }
}

#[allow(deprecated)]
pub unsafe fn get_instance_extensions(
    entry: &Entry,
    required: &[vk::ExtensionName],
    validate: bool,
) -> Result<InstanceExtensions> {
    let available = entry
        .enumerate_instance_extension_properties(None)
        .map_err(InitError::driver("vkEnumerateInstanceExtensionProperties"))?
        .iter()
        .map(|e| e.extension_name)
        .collect::<Vec<_>>();

    debug!("{} instance extensions available.", available.len());

    let extensions = negotiate_instance_extensions(required, &available, validate)?;
    for name in &extensions.names {
        debug!("Enabling instance extension {}.", name);
    }
    if extensions.contains(&vk::EXT_DEBUG_REPORT_EXTENSION.name) {
        info!("Enabling debug reports.");
    }
    if extensions.flags.contains(vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR) {
        info!("Enabling portability enumeration.");
    }

    Ok(extensions)
}

pub unsafe fn get_device_extensions(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
) -> Result<Vec<vk::ExtensionName>> {
    let available = instance
        .enumerate_device_extension_properties(physical_device, None)
        .map_err(InitError::driver("vkEnumerateDeviceExtensionProperties"))?
        .iter()
        .map(|e| e.extension_name)
        .collect::<Vec<_>>();

    debug!("{} device extensions available.", available.len());

    Ok(select_device_extensions(&available)?)
}
