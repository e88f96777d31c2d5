use crate::{app::App, config::RenderConfig, error::InitError};

use anyhow::Result;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

/// The OS window the renderer will draw into.
pub struct WindowContext {
    pub window: Option<Window>,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl WindowContext {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            window: None,
            width: config.window_width,
            height: config.window_height,
            title: config.window_title.clone(),
        }
    }

    pub fn attributes(&self) -> WindowAttributes {
        // Vulkan brings its own surface, so the window is created
        // without any client API attached (which is always the
        // case with winit). It starts hidden and is only shown
        // once the driver has been set up.
        Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_visible(false)
    }

    pub fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<&Window> {
        let window = event_loop
            .create_window(self.attributes())
            .map_err(|e| InitError::WindowCreation(e.to_string()))?;

        info!("Window created ({}x{}).", self.width, self.height);
        Ok(&*self.window.insert(window))
    }

    pub fn show(&self) {
        if let Some(window) = &self.window {
            window.set_visible(true);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Resumption may happen more than once on some
        // platforms; bring-up only happens the first time.
        if self.window.window.is_some() || self.error.is_some() {
            return;
        }

        if let Err(error) = self.init(event_loop) {
            error!("Initialization failed.");
            self.error = Some(error);
            event_loop.exit();
        }
    }

    fn window_event(
            &mut self,
            event_loop: &ActiveEventLoop,
            _: winit::window::WindowId,
            event: WindowEvent,
        ) {
        // Nothing is drawn yet, so resizes and redraws are left
        // alone; closing the window is the only way out.
        match event {
            WindowEvent::CloseRequested => {
                self.destroy();
                event_loop.exit();
            },
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn window_follows_the_config() {
        let context = WindowContext::new(&RenderConfig::default());
        assert!(context.window.is_none());
        assert_eq!((context.width, context.height), (500, 500));
        assert_eq!(context.title, "Vulkan Render");
    }

    #[test]
    fn window_starts_hidden() {
        let attributes = WindowContext::new(&RenderConfig::default()).attributes();
        assert!(!attributes.visible);
        assert_eq!(attributes.title, "Vulkan Render");
        assert_eq!(
            attributes.inner_size,
            Some(Size::from(LogicalSize::new(500u32, 500u32))),
        );
    }
}
