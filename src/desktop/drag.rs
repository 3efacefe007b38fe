use serde::{Deserialize, Serialize};

use crate::geometry::{apply_drag, Point, Rect};
use crate::state::window::WindowId;

/// Pointer-down to pointer-up move of one window by its title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position relative to the window origin at drag start
    pub grab_offset: Point,
}

impl DragSession {
    pub fn begin(window_id: WindowId, window_origin: Point, pointer: Point) -> Self {
        Self {
            window_id,
            grab_offset: pointer.offset_from(window_origin),
        }
    }

    pub fn apply(&self, geometry: Rect, pointer: Point) -> Rect {
        apply_drag(geometry, pointer, self.grab_offset)
    }
}
