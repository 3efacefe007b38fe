// Core geometry types shared by the window manager and hosts

use serde::{Deserialize, Serialize};

/// Window bounds. `left`/`top` may be negative: windows can be dragged off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Check whether a point falls inside (right/bottom edges exclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }
}

/// Pointer position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`, saturating at the `i32` bounds
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

/// Size of the host canvas the desktop is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Host-specific measurements used for launch placement and maximize bounds.
///
/// The defaults are in pixels; the terminal host supplies a cell-based set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopMetrics {
    /// Height reserved at the bottom of the viewport for the taskbar
    pub taskbar_reserve: i32,
    /// Size used when restoring a window that never captured its own size
    pub default_width: i32,
    pub default_height: i32,
    /// Launch position of the first window, before cascading
    pub cascade_left: i32,
    pub cascade_top: i32,
    /// Offset added per created window
    pub cascade_step: i32,
}

impl Default for DesktopMetrics {
    fn default() -> Self {
        Self {
            taskbar_reserve: 38,
            default_width: 540,
            default_height: 340,
            cascade_left: 120,
            cascade_top: 80,
            cascade_step: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_excludes_far_edges() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 12)));
        assert!(!rect.contains(Point::new(12, 15)));
    }

    #[test]
    fn test_contains_off_screen_rect() {
        let rect = Rect::new(-20, -5, 30, 10);
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(-20, -5)));
        assert!(!rect.contains(Point::new(10, 0)));
    }
}
