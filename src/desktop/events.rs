// Events emitted by the desktop session for hosts to mirror

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::state::window::{WindowId, WindowInstance};

/// Result of a window manager mutation, queued in the session outbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesktopEvent {
    /// Window and its taskbar entry were created together
    WindowCreated { window: WindowInstance },
    /// Window raised to the front (and restored if it was minimized)
    WindowFocused { id: WindowId, z_index: u64 },
    WindowMinimized { id: WindowId },
    /// Maximize state flipped; carries the new bounds
    WindowMaximizeToggled {
        id: WindowId,
        maximized: bool,
        geometry: Rect,
    },
    /// Drag ended on this window with the final bounds
    WindowMoved { id: WindowId, geometry: Rect },
    /// Window and its taskbar entry were removed together
    WindowClosed { id: WindowId },
}
