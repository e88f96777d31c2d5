#![allow(deprecated)]

// VK_EXT_debug_report is superseded by VK_EXT_debug_utils, which
// the validation layer sets used here predate.

use crate::{core::extensions::InstanceExtensions, error::InitError};

use std::{
    ffi::{c_char, c_void, CStr},
    sync::atomic::{AtomicBool, Ordering},
};

use vulkanalia::{
    prelude::v1_0::*,
    vk::ExtDebugReportExtension,
};
use anyhow::Result;
use log::*;

// Set as soon as the validation layers report anything through
// the printing callback. Layers may call back from any thread
// the application calls Vulkan from.
static VALIDATION_ERROR: AtomicBool = AtomicBool::new(false);

/// Whether a validation message has been received so far.
pub fn validation_error_reported() -> bool {
    VALIDATION_ERROR.load(Ordering::Relaxed)
}

/// How validation reports are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportMode {
    /// Stop in the debugger on every report.
    Break,
    /// Log the report and let the call go on.
    Print,
}

impl ReportMode {
    pub fn new(use_break: bool) -> Self {
        if use_break {
            Self::Break
        } else {
            Self::Print
        }
    }

    pub fn callback(self) -> vk::PFN_vkDebugReportCallbackEXT {
        match self {
            Self::Break => Some(break_callback),
            Self::Print => Some(print_callback),
        }
    }
}

/// Formats a validation report the way it is printed, or
/// returns `None` for reports that are neither errors nor
/// warnings.
pub fn format_report(
    flags: vk::DebugReportFlagsEXT,
    layer_prefix: &str,
    message_code: i32,
    message: &str,
) -> Option<String> {
    let kind = if flags.contains(vk::DebugReportFlagsEXT::ERROR) {
        "ERROR"
    } else if flags.contains(vk::DebugReportFlagsEXT::WARNING) {
        "WARNING"
    } else {
        return None;
    };

    Some(format!("{kind}: [{layer_prefix}] Code {message_code} : {message}"))
}

/// Fails unless the debug report extension was enabled on the
/// instance; its commands cannot be called otherwise.
pub fn require_debug_report(extensions: &InstanceExtensions) -> Result<(), InitError> {
    if extensions.contains(&vk::EXT_DEBUG_REPORT_EXTENSION.name) {
        Ok(())
    } else {
        Err(InitError::MissingDebugReportExtension)
    }
}

pub unsafe fn create_debug_report(
    instance: &Instance,
    mode: ReportMode,
) -> Result<vk::DebugReportCallbackEXT> {
    // Only errors and warnings are of interest; the layers
    // also emit information, performance and debug reports,
    // which would drown the output.
    let info = vk::DebugReportCallbackCreateInfoEXT::builder()
        .flags(vk::DebugReportFlagsEXT::ERROR | vk::DebugReportFlagsEXT::WARNING)
        .callback(mode.callback());

    let callback = instance
        .create_debug_report_callback_ext(&info, None)
        .map_err(|code| match code {
            vk::ErrorCode::OUT_OF_HOST_MEMORY => InitError::DebugReportOutOfHostMemory,
            code => InitError::DebugReport(code),
        })?;

    info!("Debug report callback registered ({mode:?}).");
    Ok(callback)
}

unsafe fn lossy<'a>(ptr: *const c_char) -> std::borrow::Cow<'a, str> {
    if ptr.is_null() {
        "".into()
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}

extern "system" fn print_callback(
    flags: vk::DebugReportFlagsEXT,
    _: vk::DebugReportObjectTypeEXT,
    _: u64,
    _: usize,
    message_code: i32,
    layer_prefix: *const c_char,
    message: *const c_char,
    _: *mut c_void,
) -> vk::Bool32 {
    VALIDATION_ERROR.store(true, Ordering::Relaxed);

    let layer_prefix = unsafe { lossy(layer_prefix) };
    let message = unsafe { lossy(message) };

    if let Some(report) = format_report(flags, &layer_prefix, message_code, &message) {
        if flags.contains(vk::DebugReportFlagsEXT::ERROR) {
            error!("{report}");
        } else {
            warn!("{report}");
        }
    }

    // Returning true would abort the call with a
    // VALIDATION_FAILED error. Without the layers the call
    // would have gone through, so we let it.
    vk::FALSE
}

extern "system" fn break_callback(
    _: vk::DebugReportFlagsEXT,
    _: vk::DebugReportObjectTypeEXT,
    _: u64,
    _: usize,
    _: i32,
    _: *const c_char,
    _: *const c_char,
    _: *mut c_void,
) -> vk::Bool32 {
    trap();
    vk::FALSE
}

/// Raises a breakpoint trap. Outside a debugger this ends the
/// process.
fn trap() {
    #[cfg(unix)]
    unsafe {
        libc::raise(libc::SIGTRAP);
    }

    #[cfg(not(unix))]
    std::process::abort();
}
