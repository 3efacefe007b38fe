// Pure geometry transitions for drag, maximize and restore

use super::types::{DesktopMetrics, Point, Rect, Viewport};

/// Move a window so the grab point stays under the pointer.
///
/// No clamping: the result may lie partly or fully outside the viewport.
pub fn apply_drag(geom: Rect, pointer: Point, grab_offset: Point) -> Rect {
    Rect {
        left: pointer.x.saturating_sub(grab_offset.x),
        top: pointer.y.saturating_sub(grab_offset.y),
        ..geom
    }
}

/// Compute maximized bounds.
///
/// Returns `(maximized, saved)` where `saved` is the geometry to come back to on restore.
pub fn maximize(geom: Rect, viewport: Viewport, taskbar_reserve: i32) -> (Rect, Rect) {
    let maximized = Rect::new(
        0,
        0,
        viewport.width.max(0),
        (viewport.height - taskbar_reserve).max(0),
    );
    (maximized, geom)
}

/// Geometry to restore after leaving the maximized state.
///
/// Falls back to `fallback` when nothing was ever saved.
pub fn restore(saved: Option<Rect>, fallback: Rect) -> Rect {
    saved.unwrap_or(fallback)
}

/// Fallback used by [`restore`]: default size at the window's current position
pub fn default_bounds_at(current: Rect, metrics: &DesktopMetrics) -> Rect {
    Rect::new(
        current.left,
        current.top,
        metrics.default_width,
        metrics.default_height,
    )
}

/// Launch geometry for the `ordinal`-th window created in a session (1-based).
pub fn cascade_origin(ordinal: u64, metrics: &DesktopMetrics) -> Rect {
    let step = metrics.cascade_step.saturating_mul(ordinal.min(i32::MAX as u64) as i32);
    Rect::new(
        metrics.cascade_left.saturating_add(step),
        metrics.cascade_top.saturating_add(step),
        metrics.default_width,
        metrics.default_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_keeps_size_and_follows_pointer() {
        let geom = Rect::new(100, 50, 540, 340);
        let grab = Point::new(12, 4);

        let moved = apply_drag(geom, Point::new(300, 200), grab);
        assert_eq!(moved, Rect::new(288, 196, 540, 340));
    }

    #[test]
    fn test_drag_allows_off_screen() {
        let geom = Rect::new(0, 0, 200, 100);
        let moved = apply_drag(geom, Point::new(-50, -10), Point::new(30, 5));
        assert_eq!(moved.left, -80);
        assert_eq!(moved.top, -15);
    }

    #[test]
    fn test_drag_saturates_at_extreme_pointers() {
        let geom = Rect::new(10, 10, 200, 100);
        let moved = apply_drag(geom, Point::new(i32::MIN, i32::MAX), Point::new(5, -5));
        assert_eq!((moved.left, moved.top), (i32::MIN, i32::MAX));
        assert_eq!(moved.right(), i32::MIN + 200);
        assert_eq!(moved.bottom(), i32::MAX);
    }

    #[test]
    fn test_maximize_reserves_taskbar_strip() {
        let geom = Rect::new(140, 100, 540, 340);
        let (maximized, saved) = maximize(geom, Viewport::new(1920, 1080), 38);

        assert_eq!(maximized, Rect::new(0, 0, 1920, 1042));
        assert_eq!(saved, geom);
    }

    #[test]
    fn test_maximize_tiny_viewport_never_negative() {
        let (maximized, _) = maximize(Rect::new(0, 0, 10, 10), Viewport::new(20, 10), 38);
        assert_eq!(maximized.height, 0);
    }

    #[test]
    fn test_restore_prefers_saved_geometry() {
        let saved = Rect::new(5, 6, 7, 8);
        let fallback = Rect::new(0, 0, 540, 340);
        assert_eq!(restore(Some(saved), fallback), saved);
        assert_eq!(restore(None, fallback), fallback);
    }

    #[test]
    fn test_cascade_offsets_each_window() {
        let metrics = DesktopMetrics::default();
        assert_eq!(cascade_origin(1, &metrics), Rect::new(140, 100, 540, 340));
        assert_eq!(cascade_origin(3, &metrics), Rect::new(180, 140, 540, 340));
    }
}
