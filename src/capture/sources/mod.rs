use std::{env, sync::Arc};

use async_trait::async_trait;
use image::RgbaImage;

use crate::capture::{
    dependencies::CaptureSource,
    types::{CaptureError, CaptureTarget, DisplayInfo},
};

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
mod monitor;

/// Human readable `os/arch` string.
pub fn platform_info() -> String {
    format!("{}/{}", env::consts::OS, env::consts::ARCH)
}

pub fn is_platform_supported() -> bool {
    cfg!(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows"
    ))
}

/// Pick the capture backend for this platform.
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub fn platform_source() -> Arc<dyn CaptureSource> {
    Arc::new(monitor::MonitorSource)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn platform_source() -> Arc<dyn CaptureSource> {
    Arc::new(UnsupportedSource)
}

/// Backend for platforms without screen capture. Always fails rather than
/// producing placeholder images.
pub struct UnsupportedSource;

#[async_trait]
impl CaptureSource for UnsupportedSource {
    async fn capture(&self, _target: CaptureTarget) -> Result<RgbaImage, CaptureError> {
        Err(CaptureError::Unsupported(platform_info()))
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError> {
        Err(CaptureError::Unsupported(platform_info()))
    }
}
