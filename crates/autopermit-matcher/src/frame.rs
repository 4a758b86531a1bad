//! Captured frame type.

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

use autopermit_core::Point;

/// A captured pixel buffer for one detection cycle.
///
/// The origin records where the buffer's top-left corner sits in screen
/// coordinates, so match locations can be reported as absolute screen
/// points. Frames are produced fresh each cycle and never mutated.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbImage,
    origin: Point,
}

impl Frame {
    /// Create a frame from an RGB buffer and its screen-coordinate origin.
    pub fn new(image: RgbImage, origin: Point) -> Self {
        Self { image, origin }
    }

    /// Create a frame from an RGBA capture, discarding the alpha channel.
    pub fn from_rgba(image: RgbaImage, origin: Point) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image).into_rgb8(),
            origin,
        }
    }

    /// Screen-coordinate origin of the top-left corner.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at frame-local coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }
}
