use crate::{
    config::RenderConfig,
    core::extensions::InstanceExtensions,
    error::InitError,
};

use std::ffi::CString;

use vulkanalia::prelude::v1_0::*;
use anyhow::Result;
use log::*;

/// Translates a failed `vkCreateInstance` into the diagnostic
/// matching its cause.
pub fn instance_error(code: vk::ErrorCode) -> InitError {
    match code {
        vk::ErrorCode::INCOMPATIBLE_DRIVER => InitError::IncompatibleDriver,
        vk::ErrorCode::EXTENSION_NOT_PRESENT => InitError::ExtensionNotPresent,
        code => InitError::InstanceCreation(code),
    }
}

pub unsafe fn create_instance(
    entry: &Entry,
    config: &RenderConfig,
    layers: &[vk::ExtensionName],
    extensions: &InstanceExtensions,
) -> Result<Instance> {
    // Application info: the application and engine both go by
    // the short application name, with no version of their own.
    // We only ask for the Vulkan 1.0 core, which every driver
    // supports.
    let name = CString::new(config.app_name.as_str())?;
    let application_info = vk::ApplicationInfo::builder()
        .application_name(name.as_bytes_with_nul())
        .application_version(0)
        .engine_name(name.as_bytes_with_nul())
        .engine_version(0)
        .api_version(vk::make_version(1, 0, 0));

    // The layer and extension names have been negotiated
    // beforehand; Vulkan only wants pointers to them, which
    // stay valid as long as the borrowed lists do.
    let layers = layers
        .iter()
        .map(|l| l.as_ptr())
        .collect::<Vec<_>>();

    let extension_names = extensions
        .names
        .iter()
        .map(|e| e.as_ptr())
        .collect::<Vec<_>>();

    let info = vk::InstanceCreateInfo::builder()
        .application_info(&application_info)
        .enabled_layer_names(&layers)
        .enabled_extension_names(&extension_names)
        .flags(extensions.flags);

    let instance = entry
        .create_instance(&info, None)
        .map_err(instance_error)?;

    info!("Vulkan instance created.");
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_codes_map_to_their_diagnostics() {
        assert!(matches!(
            instance_error(vk::ErrorCode::INCOMPATIBLE_DRIVER),
            InitError::IncompatibleDriver
        ));
        assert!(matches!(
            instance_error(vk::ErrorCode::EXTENSION_NOT_PRESENT),
            InitError::ExtensionNotPresent
        ));
        assert!(matches!(
            instance_error(vk::ErrorCode::LAYER_NOT_PRESENT),
            InitError::InstanceCreation(vk::ErrorCode::LAYER_NOT_PRESENT)
        ));
    }

    #[test]
    fn generic_failure_mentions_create_instance() {
        let message = instance_error(vk::ErrorCode::OUT_OF_HOST_MEMORY).to_string();
        assert!(message.starts_with("vkCreateInstance failed"));
    }
}
