use crate::{
    config::RenderConfig,
    renderer::RenderContext,
    window::WindowContext,
};

use winit::event_loop::ActiveEventLoop;
use anyhow::Result;
use log::*;

pub struct App {
    // - Config: the settings given on the command line
    // - Window: the OS window, created on the first resumption
    //   of the event loop
    // - Renderer: the Vulkan context, present once bring-up
    //   has succeeded
    // - Error: the error which stopped bring-up, handed back
    //   to main once the event loop has returned
    pub config: RenderConfig,
    pub window: WindowContext,
    pub renderer: Option<RenderContext>,
    pub error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: RenderConfig) -> Self {
        let window = WindowContext::new(&config);
        Self {
            config,
            window,
            renderer: None,
            error: None,
        }
    }

    pub fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        // The window system is the one to tell which surface
        // extensions the instance needs, so the (hidden) window
        // comes first. It only shows up once the driver has
        // been set up successfully.
        let window = self.window.create(event_loop)?;
        let renderer = unsafe { RenderContext::create(window, &self.config)? };

        let data = &renderer.data;
        info!(
            "Bring-up complete on {} ({:?}): {} layer(s), {} instance extension(s), \
             {} device extension(s), {} queue family(ies).",
            data.gpu.properties.device_name,
            data.gpu.properties.device_type,
            data.enabled_layers.len(),
            data.instance_extensions.names.len(),
            data.device_extensions.len(),
            data.gpu.queue_families.len(),
        );
        debug!("Device features: {:?}", data.gpu.features);
        debug!(
            "Staging buffer: {}, frame count: {}.",
            self.config.use_staging_buffer, self.config.frame_count,
        );

        self.renderer = Some(renderer);
        self.window.show();
        Ok(())
    }

    pub fn destroy(&mut self) {
        let Some(mut renderer) = self.renderer.take() else {
            return;
        };

        unsafe { renderer.destroy() };

        // Dropping the window closes it.
        self.window.window = None;
        info!("Destroyed the app.");
    }

    /// Ends the run, handing back the error which stopped
    /// bring-up, if any. Validation reports do not count as
    /// failures.
    pub fn finish(mut self) -> Result<()> {
        self.destroy();
        self.error.take().map_or(Ok(()), Err)
    }
}
