//! Pixel source collaborator: window discovery and region capture.

use image::imageops;

use autopermit_core::{Error, Point, Rect, Result};
use autopermit_matcher::Frame;

/// Produces pixel buffers for screen regions and locates the detection
/// window. Failures degrade to a skipped cycle, never a fatal error.
pub trait PixelSource {
    /// Geometry of the first visible window whose title contains the given
    /// substring (case-insensitive), or `None`.
    fn locate_window(&mut self, title_substring: &str) -> Option<Rect>;

    /// Capture a rectangular screen region as a frame.
    fn capture(&mut self, region: Rect) -> Result<Frame>;
}

/// OS-backed pixel source using xcap.
#[derive(Debug, Default)]
pub struct ScreenSource;

impl ScreenSource {
    /// Create a screen source.
    pub fn new() -> Self {
        Self
    }
}

fn window_rect(window: &xcap::Window) -> Option<Rect> {
    let x = window.x().ok()?;
    let y = window.y().ok()?;
    let width = window.width().ok()?;
    let height = window.height().ok()?;
    Some(Rect::new(x, y, width, height))
}

impl PixelSource for ScreenSource {
    fn locate_window(&mut self, title_substring: &str) -> Option<Rect> {
        let windows = xcap::Window::all().ok()?;
        let needle = title_substring.to_lowercase();
        for window in &windows {
            let Ok(title) = window.title() else { continue };
            if !title.to_lowercase().contains(&needle) {
                continue;
            }
            if window.is_minimized().unwrap_or(false) {
                continue;
            }
            if let Some(rect) = window_rect(window) {
                return Some(rect);
            }
        }
        None
    }

    fn capture(&mut self, region: Rect) -> Result<Frame> {
        let monitors =
            xcap::Monitor::all().map_err(|e| Error::CaptureUnavailable(e.to_string()))?;
        let monitor = monitors
            .first()
            .ok_or_else(|| Error::CaptureUnavailable("no monitors found".to_string()))?;
        let image = monitor
            .capture_image()
            .map_err(|e| Error::CaptureUnavailable(e.to_string()))?;

        // Clamp the requested region to the captured bounds.
        let x = region.x.clamp(0, image.width() as i32) as u32;
        let y = region.y.clamp(0, image.height() as i32) as u32;
        let width = region.width.min(image.width() - x);
        let height = region.height.min(image.height() - y);
        if width == 0 || height == 0 {
            return Err(Error::CaptureUnavailable(
                "region outside capture bounds".to_string(),
            ));
        }

        let cropped = imageops::crop_imm(&image, x, y, width, height).to_image();
        Ok(Frame::from_rgba(cropped, Point::new(x as i32, y as i32)))
    }
}
