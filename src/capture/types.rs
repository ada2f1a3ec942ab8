//! Data types for screenshot capture functionality.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::ConfigError;

/// A pixel rectangle, relative to the origin of the display it is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for Region {
    type Err = ConfigError;

    /// Parses `"x,y,width,height"`; whitespace around each part is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ConfigError::InvalidRegion(
                "region must be in format 'x,y,width,height'".to_string(),
            ));
        }

        let mut coords = [0i64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ConfigError::InvalidRegion(format!("invalid coordinate: {part}")))?;
        }

        let [x, y, width, height] = coords;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::InvalidRegion(format!(
                "invalid region dimensions: {width}x{height}"
            )));
        }
        if x < 0 || y < 0 {
            return Err(ConfigError::InvalidRegion(format!(
                "invalid region position: ({x},{y})"
            )));
        }

        let out_of_range =
            |value: i64| ConfigError::InvalidRegion(format!("coordinate out of range: {value}"));
        Ok(Self {
            x: i32::try_from(x).map_err(|_| out_of_range(x))?,
            y: i32::try_from(y).map_err(|_| out_of_range(y))?,
            width: u32::try_from(width).map_err(|_| out_of_range(width))?,
            height: u32::try_from(height).map_err(|_| out_of_range(height))?,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// What to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTarget {
    /// The whole display at this index (0 = first enumerated display).
    Display(usize),
    /// A rectangle cropped out of the given display.
    Region { display: usize, region: Region },
}

impl CaptureTarget {
    pub fn display(&self) -> usize {
        match *self {
            CaptureTarget::Display(index) | CaptureTarget::Region { display: index, .. } => index,
        }
    }
}

/// Geometry of one attached display, as reported by `sshot info`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
    pub scale_factor: f32,
}

impl DisplayInfo {
    /// Bounds in `(x0,y0)-(x1,y1)` form.
    pub fn bounds(&self) -> String {
        format!(
            "({},{})-({},{})",
            self.x,
            self.y,
            i64::from(self.x) + i64::from(self.width),
            i64::from(self.y) + i64::from(self.height)
        )
    }
}

/// Errors that can occur during screenshot capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no displays available")]
    NoDisplays,

    #[error("display {index} not found ({available} available)")]
    InvalidDisplay { index: usize, available: usize },

    #[error("region {region} is outside display bounds {width}x{height}")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },

    #[error(
        "captured an empty image; check that the terminal has screen recording permission"
    )]
    EmptyCapture,

    #[error("screen capture failed: {0}")]
    Backend(String),

    #[error("screen capture is not supported on {0}")]
    Unsupported(String),

    #[error("capture task failed: {0}")]
    TaskFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_with_spaces() {
        let region: Region = " 100 , 200 , 800 , 600 ".parse().unwrap();
        assert_eq!(
            region,
            Region {
                x: 100,
                y: 200,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!("100,200,800".parse::<Region>().is_err());
        assert!("100,200,800,600,900".parse::<Region>().is_err());
    }

    #[test]
    fn rejects_non_numeric_and_degenerate_regions() {
        assert!(matches!(
            "100,abc,800,600".parse::<Region>(),
            Err(ConfigError::InvalidRegion(msg)) if msg.contains("abc")
        ));
        assert!("0,0,0,600".parse::<Region>().is_err());
        assert!("-5,0,10,10".parse::<Region>().is_err());
    }

    #[test]
    fn display_bounds_format() {
        let info = DisplayInfo {
            index: 0,
            name: "eDP-1".into(),
            x: 1920,
            y: 0,
            width: 1280,
            height: 1024,
            is_primary: false,
            scale_factor: 1.0,
        };
        assert_eq!(info.bounds(), "(1920,0)-(3200,1024)");
    }
}
