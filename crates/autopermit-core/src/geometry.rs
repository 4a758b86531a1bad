//! Geometry types for screen coordinates and regions.

use serde::{Deserialize, Serialize};

/// Point in screen coordinates (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (pixels, 0-based)
    pub x: i32,
    /// Vertical coordinate (pixels, 0-based)
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Point translated by the given offsets.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rectangular screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in screen coordinates
    pub x: i32,
    /// Top edge in screen coordinates
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }

    /// Check if a point lies within this rectangle.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }

    /// Total pixel count (width * height).
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = Point::new(140, 210);
        assert_eq!(point.x, 140);
        assert_eq!(point.y, 210);
    }

    #[test]
    fn test_point_translated() {
        let point = Point::new(10, 20).translated(5, -5);
        assert_eq!(point, Point::new(15, 15));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(100, 200, 80, 20);
        assert_eq!(rect.center(), Point::new(140, 210));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 10, 20, 10);

        assert!(rect.contains(&Point::new(10, 10))); // top-left corner
        assert!(rect.contains(&Point::new(20, 15))); // inside
        assert!(rect.contains(&Point::new(29, 19))); // bottom-right corner (inclusive)

        assert!(!rect.contains(&Point::new(9, 10))); // left
        assert!(!rect.contains(&Point::new(30, 15))); // right
        assert!(!rect.contains(&Point::new(20, 9))); // above
        assert!(!rect.contains(&Point::new(20, 20))); // below
    }

    #[test]
    fn test_rect_area() {
        let rect = Rect::new(0, 0, 1000, 800);
        assert_eq!(rect.area(), 800_000);
    }

    #[test]
    fn test_rect_serialization() {
        let rect = Rect::new(-5, 3, 640, 480);
        let json = serde_json::to_string(&rect).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(rect, deserialized);
    }
}
