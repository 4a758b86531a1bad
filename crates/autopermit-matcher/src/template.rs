//! Reference pattern type.

use std::path::Path;

use image::{Rgb, RgbImage};

use autopermit_core::{ButtonAction, Error, Result};

/// Divisor for the sparse sample grid: samples are taken on a stride of
/// `max(1, min(width, height) / SAMPLE_GRID_DIVISOR)`, bounding per-candidate
/// cost regardless of pattern size.
const SAMPLE_GRID_DIVISOR: u32 = 10;

/// A named reference image representing one recognizable UI button.
///
/// Immutable once loaded; the matcher reads it every cycle.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    image: RgbImage,
    action: ButtonAction,
    confidence: f32,
}

impl Template {
    /// Load a template from a reference image file.
    ///
    /// A missing or corrupt image yields `Error::PatternUnreadable`; the
    /// caller skips that single pattern for the session and continues with
    /// the others.
    pub fn load<P: AsRef<Path>>(
        name: &str,
        path: P,
        action: ButtonAction,
        confidence: f32,
    ) -> Result<Self> {
        let image = image::open(path.as_ref())
            .map_err(|e| Error::PatternUnreadable {
                name: name.to_string(),
                reason: e.to_string(),
            })?
            .into_rgb8();
        Ok(Self::from_image(name, image, action, confidence))
    }

    /// Create a template from an in-memory buffer.
    pub fn from_image(name: &str, image: RgbImage, action: ButtonAction, confidence: f32) -> Self {
        Self {
            name: name.to_string(),
            image,
            action,
            confidence,
        }
    }

    /// Configured button name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action configured for this button.
    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Confidence threshold in [0, 1] a candidate must reach to qualify.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at template-local coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Stride of the sparse sample grid.
    pub fn sample_stride(&self) -> u32 {
        (self.width().min(self.height()) / SAMPLE_GRID_DIVISOR).max(1)
    }
}
