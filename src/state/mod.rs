use std::collections::HashMap;

use self::window::{MaximizeState, Visibility, WindowId, WindowInstance};
use crate::geometry::Rect;

pub mod taskbar;
pub mod window;

/// Authoritative store of open windows.
///
/// The registry does not reject a second window for the same app id; callers
/// check [`WindowRegistry::find`] first.
pub struct WindowRegistry {
    windows: HashMap<WindowId, WindowInstance>,
    order: Vec<WindowId>, // Insertion order
    next_id: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
        }
    }

    /// Insert a new window and return its fresh id
    pub fn register(&mut self, app_id: &str, title: &str, geometry: Rect, z_index: u64) -> WindowId {
        self.next_id += 1;
        let id = WindowId(self.next_id);

        let window = WindowInstance {
            id,
            app_id: app_id.to_string(),
            title: title.to_string(),
            geometry,
            z_index,
            visibility: Visibility::Normal,
            maximize: MaximizeState::Normal,
            saved_geometry: None,
        };

        self.windows.insert(id, window);
        self.order.push(id);
        id
    }

    /// Look up the window owned by an application
    pub fn find(&self, app_id: &str) -> Option<WindowId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(|w| w.app_id == app_id))
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowInstance> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowInstance> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Remove a window. Unknown ids are ignored.
    pub fn remove(&mut self, id: WindowId) -> Option<WindowInstance> {
        if let Some(index) = self.order.iter().position(|x| *x == id) {
            self.order.remove(index);
        }
        self.windows.remove(&id)
    }

    /// All windows in insertion order
    pub fn all(&self) -> Vec<&WindowInstance> {
        self.order.iter().filter_map(|id| self.windows.get(id)).collect()
    }

    /// Highest z-index in use, 0 when empty
    pub fn max_z(&self) -> u64 {
        self.windows.values().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Number of ids handed out so far, including closed windows
    pub fn created_count(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
