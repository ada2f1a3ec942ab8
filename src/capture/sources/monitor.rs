//! Display capture through the `xcap` crate (CoreGraphics, DXGI/GDI,
//! X11/Wayland portal depending on the platform).

use async_trait::async_trait;
use image::{RgbaImage, imageops};
use tokio::task;
use xcap::Monitor;

use crate::capture::{
    dependencies::CaptureSource,
    types::{CaptureError, CaptureTarget, DisplayInfo, Region},
};

pub struct MonitorSource;

#[async_trait]
impl CaptureSource for MonitorSource {
    async fn capture(&self, target: CaptureTarget) -> Result<RgbaImage, CaptureError> {
        task::spawn_blocking(move || capture_blocking(target))
            .await
            .map_err(|e| CaptureError::TaskFailed(e.to_string()))?
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError> {
        all_monitors()?
            .iter()
            .enumerate()
            .map(|(index, monitor)| describe(index, monitor))
            .collect()
    }
}

fn backend_err(context: &str) -> impl Fn(xcap::XCapError) -> CaptureError + '_ {
    move |e| CaptureError::Backend(format!("{context}: {e}"))
}

fn all_monitors() -> Result<Vec<Monitor>, CaptureError> {
    let monitors = Monitor::all().map_err(backend_err("failed to enumerate monitors"))?;
    if monitors.is_empty() {
        return Err(CaptureError::NoDisplays);
    }
    Ok(monitors)
}

fn describe(index: usize, monitor: &Monitor) -> Result<DisplayInfo, CaptureError> {
    let query = backend_err("failed to query monitor");
    Ok(DisplayInfo {
        index,
        name: monitor.name().map_err(&query)?,
        x: monitor.x().map_err(&query)?,
        y: monitor.y().map_err(&query)?,
        width: monitor.width().map_err(&query)?,
        height: monitor.height().map_err(&query)?,
        is_primary: monitor.is_primary().unwrap_or(false),
        scale_factor: monitor.scale_factor().unwrap_or(1.0),
    })
}

fn capture_blocking(target: CaptureTarget) -> Result<RgbaImage, CaptureError> {
    let monitors = all_monitors()?;
    let index = target.display();
    let monitor = monitors.get(index).ok_or(CaptureError::InvalidDisplay {
        index,
        available: monitors.len(),
    })?;

    log::debug!("Capturing display {} for {:?}", index, target);
    let image = monitor
        .capture_image()
        .map_err(backend_err("failed to capture screen"))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(CaptureError::EmptyCapture);
    }

    match target {
        CaptureTarget::Display(_) => Ok(image),
        CaptureTarget::Region { region, .. } => crop_region(&image, region),
    }
}

/// Cut `region` out of a full-display capture.
pub(crate) fn crop_region(image: &RgbaImage, region: Region) -> Result<RgbaImage, CaptureError> {
    let out_of_bounds = || CaptureError::RegionOutOfBounds {
        region,
        width: image.width(),
        height: image.height(),
    };

    let x = u32::try_from(region.x).map_err(|_| out_of_bounds())?;
    let y = u32::try_from(region.y).map_err(|_| out_of_bounds())?;
    let fits_x = x.checked_add(region.width).is_some_and(|end| end <= image.width());
    let fits_y = y.checked_add(region.height).is_some_and(|end| end <= image.height());
    if !fits_x || !fits_y {
        return Err(out_of_bounds());
    }

    Ok(imageops::crop_imm(image, x, y, region.width, region.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn crops_inside_bounds() {
        let image = gradient(100, 50);
        let region = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 5,
        };
        let cropped = crop_region(&image, region).unwrap();
        assert_eq!(cropped.dimensions(), (30, 5));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([10, 20, 0, 255]));
    }

    #[test]
    fn rejects_region_past_the_edge() {
        let image = gradient(100, 50);
        let region = Region {
            x: 90,
            y: 0,
            width: 20,
            height: 10,
        };
        assert!(matches!(
            crop_region(&image, region),
            Err(CaptureError::RegionOutOfBounds { width: 100, .. })
        ));
    }
}
