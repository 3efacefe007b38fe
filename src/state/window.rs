use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Rect;

/// Opaque window identity handed out by a monotonic counter
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Drawn on the desktop
    Normal,
    /// Hidden, still registered and reachable from the taskbar
    Minimized,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum MaximizeState {
    Normal,
    /// Spanning the viewport above the taskbar
    Maximized,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct WindowInstance {
    pub id: WindowId,
    pub app_id: String,           // Owning application tag (e.g. "terminal")
    pub title: String,            // Title bar and taskbar label
    pub geometry: Rect,
    pub z_index: u64,             // Larger = closer to the front
    pub visibility: Visibility,
    pub maximize: MaximizeState,
    pub saved_geometry: Option<Rect>, // Pre-maximize bounds
}

impl WindowInstance {
    pub fn is_minimized(&self) -> bool {
        self.visibility == Visibility::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximize == MaximizeState::Maximized
    }

    /// Taskbar entries share the window's id
    pub fn taskbar_entry(&self) -> WindowId {
        self.id
    }
}
