#![allow(deprecated)]

use crate::{
    config::RenderConfig,
    core::{
        debug::*,
        devices::*,
        extensions::*,
        instance::create_instance,
        layers::get_validation_layers,
    },
    error::InitError,
};

use winit::window::Window;
use vulkanalia::{
    prelude::v1_0::*,
    window as vk_window,
    loader::{LibloadingLoader, LIBRARY},
    vk::ExtDebugReportExtension,
};
use anyhow::Result;
use log::*;

/// Everything negotiated with the driver during bring-up.
#[derive(Clone, Debug, Default)]
pub struct RenderData {
    // - Enabled layers: the validation layers, empty unless
    //   validation was requested
    // - Instance extensions: the surface extensions plus the
    //   optional ones the driver offered, and the instance
    //   creation flags they need
    // - Device extensions: the extensions the physical device
    //   will have to enable on its logical device
    // - Physical device: the graphics card picked to render
    // - GPU: properties, features and queue families of the
    //   physical device, as reported by the driver
    // - Debug report: the callback receiving the validation
    //   layers' reports, if any
    pub enabled_layers: Vec<vk::ExtensionName>,
    pub instance_extensions: InstanceExtensions,
    pub device_extensions: Vec<vk::ExtensionName>,
    pub physical_device: vk::PhysicalDevice,
    pub gpu: GpuInfo,
    pub debug_report: Option<vk::DebugReportCallbackEXT>,
}

pub struct RenderContext {
    // - Entry: the Vulkan entry point, which keeps the Vulkan
    //   library loaded for as long as the instance lives
    // - Instance: the connection between the application and
    //   the Vulkan library
    // - Data: what was negotiated with the driver
    // - Config: the settings the context was created with
    #[allow(dead_code)]
    entry: Entry,
    pub instance: Instance,
    pub data: RenderData,
    pub config: RenderConfig,
}

impl RenderContext {
    pub unsafe fn create(window: &Window, config: &RenderConfig) -> Result<Self> {
        // To create a Vulkan instance, we first need a special
        // function loader to load the initial commands from
        // the Vulkan library. Failing that, there is simply no
        // Vulkan on this system.
        let loader = LibloadingLoader::new(LIBRARY)
            .map_err(|e| InitError::LoaderUnavailable(e.to_string()))?;
        let entry = Entry::new(loader)
            .map_err(|e| InitError::LoaderUnavailable(e.to_string()))?;
        match entry.version() {
            Ok(version) => info!("Vulkan library loaded (version {}).", version),
            Err(_) => info!("Vulkan library loaded."),
        }

        let mut data = RenderData::default();

        // Validation layers are looked up first: when they were
        // asked for but are missing, there is no point going any
        // further.
        if config.validate {
            data.enabled_layers = get_validation_layers(&entry)?;
        }

        // Vulkan is platform agnostic and does not know about
        // windows on its own; the window system tells which
        // surface extensions it needs to present to it.
        let required = vk_window::get_required_instance_extensions(window)
            .iter()
            .map(|e| vk::ExtensionName::clone(e))
            .collect::<Vec<_>>();
        data.instance_extensions = get_instance_extensions(&entry, &required, config.validate)?;

        let instance = create_instance(
            &entry,
            config,
            &data.enabled_layers,
            &data.instance_extensions,
        )?;

        // From here on the instance exists, and has to be
        // destroyed should anything else fail.
        match Self::negotiate_device(&instance, config, &mut data) {
            Ok(()) => Ok(Self {
                entry,
                instance,
                data,
                config: config.clone(),
            }),
            Err(error) => {
                if let Some(callback) = data.debug_report.take() {
                    instance.destroy_debug_report_callback_ext(callback, None);
                }
                instance.destroy_instance(None);
                Err(error)
            }
        }
    }

    unsafe fn negotiate_device(
        instance: &Instance,
        config: &RenderConfig,
        data: &mut RenderData,
    ) -> Result<()> {
        // The physical device is the first one listed, and it
        // must be able to present images to a surface.
        data.physical_device = pick_physical_device(instance)?;
        data.device_extensions = get_device_extensions(instance, data.physical_device)?;

        // With validation on, the layers' reports are routed
        // to one of our callbacks, depending on whether we want
        // to stop in the debugger or just print them. The driver
        // has to have offered the extension for that.
        if config.validate {
            require_debug_report(&data.instance_extensions)?;
            let mode = ReportMode::new(config.use_break);
            data.debug_report = Some(create_debug_report(instance, mode)?);
        }

        data.gpu = GpuInfo::query(instance, data.physical_device)?;
        match data.gpu.queue_families.graphics_index() {
            Some(index) => info!("Graphics queue family: {}.", index),
            None => warn!("No queue family supports graphics operations."),
        }

        Ok(())
    }

    pub unsafe fn destroy(&mut self) {
        if let Some(callback) = self.data.debug_report.take() {
            self.instance.destroy_debug_report_callback_ext(callback, None);
        }

        self.instance.destroy_instance(None);
        info!("Destroyed the Vulkan instance.");

        if self.config.validate && validation_error_reported() {
            warn!("Validation layers reported errors during the run.");
        }
    }
}
