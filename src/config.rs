use std::ffi::OsString;

use clap::{error::ErrorKind, CommandFactory, Parser};
use thiserror::Error;

/// Name given to Vulkan as both the application and the
/// engine name, and used in the usage line.
pub const APP_SHORT_NAME: &str = "vkrender";
/// Title of the window.
pub const APP_LONG_NAME: &str = "Vulkan Render";

pub const DEFAULT_WINDOW_WIDTH: u32 = 500;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 500;

#[derive(Error, Debug)]
#[error(
    "Usage:\n  {} [--use_staging] [--validate] [--break] [--c <framecount>]",
    APP_SHORT_NAME
)]
pub struct UsageError(#[source] pub clap::Error);

// Boolean switches override themselves so that repeating one is
// harmless; '--c' keeps clap's default and refuses a second
// occurrence. There is no help flag: '--help' is just another
// unknown argument.
#[derive(Parser, Debug)]
#[command(name = APP_SHORT_NAME, about = APP_LONG_NAME, disable_help_flag = true)]
struct Args {
    /// Upload through a staging buffer
    #[arg(long = "use_staging", overrides_with = "use_staging")]
    use_staging: bool,

    /// Raise a breakpoint trap on validation messages
    #[arg(long = "break", overrides_with = "use_break")]
    use_break: bool,

    /// Enable validation layers and debug reporting
    #[arg(long, overrides_with = "validate")]
    validate: bool,

    /// Number of frames to render before exiting
    #[arg(
        long = "c",
        value_name = "framecount",
        value_parser = clap::value_parser!(i32).range(0..)
    )]
    frame_count: Option<i32>,
}

/// Settings collected from the command line before bring-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub validate: bool,
    pub use_break: bool,
    pub use_staging_buffer: bool,
    pub frame_count: i32,
    pub app_name: String,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            validate: false,
            use_break: false,
            use_staging_buffer: false,
            frame_count: i32::MAX,
            app_name: APP_SHORT_NAME.to_owned(),
            window_title: APP_LONG_NAME.to_owned(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl RenderConfig {
    /// Parses the process arguments; the first item is the
    /// program name, as with `std::env::args_os`.
    pub fn from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();

        // The frame count is only taken as a separate argument,
        // never glued to the flag with '='.
        if let Some(arg) = args
            .iter()
            .skip(1)
            .take_while(|arg| *arg != "--")
            .find(|arg| arg.to_string_lossy().starts_with("--c="))
        {
            let message = format!("unexpected argument '{}'", arg.to_string_lossy());
            return Err(UsageError(Args::command().error(ErrorKind::UnknownArgument, message)));
        }

        let args = Args::try_parse_from(args).map_err(UsageError)?;

        Ok(Self {
            validate: args.validate,
            use_break: args.use_break,
            use_staging_buffer: args.use_staging,
            frame_count: args.frame_count.unwrap_or(i32::MAX),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RenderConfig, UsageError> {
        RenderConfig::from_args(std::iter::once(APP_SHORT_NAME).chain(args.iter().copied()))
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = parse(&[]).unwrap();
        assert!(!config.validate);
        assert!(!config.use_break);
        assert!(!config.use_staging_buffer);
        assert_eq!(config.frame_count, i32::MAX);
        assert_eq!((config.window_width, config.window_height), (500, 500));
        assert_eq!(config.window_title, "Vulkan Render");
    }

    #[test]
    fn switches_are_recognised() {
        let config = parse(&["--validate", "--break", "--use_staging"]).unwrap();
        assert!(config.validate);
        assert!(config.use_break);
        assert!(config.use_staging_buffer);
        assert_eq!(config.frame_count, i32::MAX);
    }

    #[test]
    fn repeated_switches_are_accepted() {
        let config = parse(&["--validate", "--validate"]).unwrap();
        assert!(config.validate);
    }

    #[test]
    fn frame_count_is_parsed() {
        let config = parse(&["--c", "10"]).unwrap();
        assert_eq!(config.frame_count, 10);

        let config = parse(&["--c", "0", "--validate"]).unwrap();
        assert_eq!(config.frame_count, 0);
        assert!(config.validate);
    }

    #[test]
    fn frame_count_twice_is_rejected() {
        assert!(parse(&["--c", "10", "--c", "20"]).is_err());
    }

    #[test]
    fn frame_count_glued_with_equals_is_rejected() {
        let error = parse(&["--c=10"]).unwrap_err();
        assert_eq!(error.0.kind(), ErrorKind::UnknownArgument);
        assert!(parse(&["--validate", "--c=0"]).is_err());
    }

    #[test]
    fn help_is_a_usage_error() {
        for flag in ["--help", "-h"] {
            let error = parse(&[flag]).unwrap_err();
            assert_eq!(error.0.kind(), ErrorKind::UnknownArgument);
            assert!(error.to_string().starts_with("Usage:\n  vkrender "));
        }
    }

    #[test]
    fn bad_frame_counts_are_rejected() {
        assert!(parse(&["--c", "ten"]).is_err());
        assert!(parse(&["--c", "-5"]).is_err());
        assert!(parse(&["--c"]).is_err());
    }

    #[test]
    fn unknown_arguments_print_usage() {
        let error = parse(&["--fullscreen"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Usage:\n  vkrender [--use_staging] [--validate] [--break] [--c <framecount>]"
        );
    }
}
