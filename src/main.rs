mod app;
mod config;
mod core;
mod error;
mod renderer;
mod window;

use winit::event_loop::{ControlFlow, EventLoop};
use anyhow::Result;
use log::*;

use app::App;
use config::RenderConfig;

fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let config = match RenderConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        // Only the usage line is shown, not clap's own
        // explanation of what went wrong.
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    info!("Starting {} with {:?}.", config.app_name, config);

    // Nothing is ever drawn, so the loop only needs to wake up
    // for window events.
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    app.finish()
}
