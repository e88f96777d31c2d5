use thiserror::Error;
use vulkanalia::vk;

/// Fatal conditions met while bringing up the window and the
/// Vulkan instance. The messages are the diagnostics shown to
/// the user before the process exits with status 1.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to find the Vulkan loader: {0}\nExiting ...")]
    LoaderUnavailable(String),

    #[error(
        "vkEnumerateInstanceLayerProperties failed to find required validation layer.\n\n\
         Please look at the Getting Started guide for additional information."
    )]
    MissingValidationLayers,

    #[error(
        "Failed to find the platform surface extensions.\n\n\
         Do you have a compatible Vulkan installable client driver (ICD) installed?\n\
         Please look at the Getting Started guide for additional information."
    )]
    MissingSurfaceExtensions,

    #[error(
        "Cannot find a compatible Vulkan installable client driver (ICD).\n\n\
         Please look at the Getting Started guide for additional information."
    )]
    IncompatibleDriver,

    #[error(
        "Cannot find a specified extension library.\n\
         Make sure your layers path is set appropriately"
    )]
    ExtensionNotPresent,

    #[error(
        "vkCreateInstance failed ({0}).\n\n\
         Do you have a compatible Vulkan installable client driver (ICD) installed?\n\
         Please look at the Getting Started guide for additional information."
    )]
    InstanceCreation(vk::ErrorCode),

    #[error(
        "vkEnumeratePhysicalDevices reported zero accessible devices.\n\n\
         Do you have a compatible Vulkan installable client driver (ICD) installed?\n\
         Please look at the Getting Started guide for additional information."
    )]
    NoPhysicalDevices,

    #[error(
        "vkEnumerateDeviceExtensionProperties failed to find the VK_KHR_swapchain extension.\n\n\
         Do you have a compatible Vulkan installable client driver (ICD) installed?\n\
         Please look at the Getting Started guide for additional information."
    )]
    MissingSwapchainExtension,

    #[error("vkGetPhysicalDeviceQueueFamilyProperties reported zero queue families.")]
    NoQueueFamilies,

    #[error(
        "vkEnumerateInstanceExtensionProperties failed to find the VK_EXT_debug_report extension.\n\n\
         The validation layers cannot report anything without it."
    )]
    MissingDebugReportExtension,

    #[error("CreateDebugReportCallback: out of host memory")]
    DebugReportOutOfHostMemory,

    #[error("CreateDebugReportCallback: unknown failure ({0})")]
    DebugReport(vk::ErrorCode),

    #[error("{call} failed: {code}")]
    Driver {
        call: &'static str,
        code: vk::ErrorCode,
    },

    #[error("Cannot create a window in which to draw! ({0})")]
    WindowCreation(String),
}

impl InitError {
    /// Wraps a failed enumeration or query call.
    pub fn driver(call: &'static str) -> impl FnOnce(vk::ErrorCode) -> Self {
        move |code| Self::Driver { call, code }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_diagnostic_names_the_missing_layer_set() {
        let message = InitError::MissingValidationLayers.to_string();
        assert!(message.contains("failed to find required validation layer"));
    }

    #[test]
    fn driver_errors_keep_the_call_name() {
        let error = InitError::driver("vkEnumeratePhysicalDevices")(vk::ErrorCode::INITIALIZATION_FAILED);
        assert!(matches!(
            error,
            InitError::Driver { call: "vkEnumeratePhysicalDevices", code: vk::ErrorCode::INITIALIZATION_FAILED }
        ));
        assert!(error.to_string().starts_with("vkEnumeratePhysicalDevices failed"));
    }
}
