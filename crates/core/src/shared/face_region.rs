use std::str::FromStr;

use thiserror::Error;

/// A detected face bounding box in frame pixel coordinates.
///
/// Coordinates may extend past the frame edges; detectors near an edge
/// routinely report boxes that do. [`FaceRegion::clamped`] produces the
/// visible portion for cropping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Error parsing a region from `"x,y,w,h"` text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRegionError {
    #[error("expected 4 comma-separated fields (x,y,w,h), got {0}")]
    FieldCount(usize),
    #[error("field {field} is not an integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
    #[error("width and height must be positive, got {width}x{height}")]
    NonPositiveSize { width: i32, height: i32 },
}

impl FaceRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reflects the box across the vertical centerline of a frame that is
    /// `frame_width` pixels wide. Used when the render path shows a mirrored
    /// view of the sensor the detections were computed on.
    pub fn mirrored(&self, frame_width: u32) -> Self {
        Self {
            x: frame_width as i32 - (self.x + self.width),
            ..*self
        }
    }

    /// The intersection of this box with a `frame_width` x `frame_height`
    /// frame. Degenerate results have zero width or height.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Self {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_width as i32);
        let y2 = (self.y + self.height).min(frame_height as i32);
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl FromStr for FaceRegion {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParseRegionError::FieldCount(parts.len()));
        }

        let field = |i: usize, name: &'static str| -> Result<i32, ParseRegionError> {
            parts[i]
                .parse()
                .map_err(|_| ParseRegionError::NotAnInteger {
                    field: name,
                    value: parts[i].to_string(),
                })
        };

        let region = Self {
            x: field(0, "x")?,
            y: field(1, "y")?,
            width: field(2, "w")?,
            height: field(3, "h")?,
        };

        if region.width <= 0 || region.height <= 0 {
            return Err(ParseRegionError::NonPositiveSize {
                width: region.width,
                height: region.height,
            });
        }

        Ok(region)
    }
}
