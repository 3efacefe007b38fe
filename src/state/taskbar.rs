use serde::{Deserialize, Serialize};

use super::window::WindowId;

/// Taskbar button for an open window. Shares the window's id.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub label: String,
}

/// Projection of the open windows, in creation order.
///
/// Only the desktop session mutates it, in the same step as the registry.
#[derive(Debug, Default, Clone)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, window_id: WindowId, label: String) {
        self.entries.push(TaskbarEntry { window_id, label });
    }

    pub(crate) fn remove(&mut self, window_id: WindowId) -> Option<TaskbarEntry> {
        let index = self.entries.iter().position(|e| e.window_id == window_id)?;
        Some(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn entry(&self, window_id: WindowId) -> Option<&TaskbarEntry> {
        self.entries.iter().find(|e| e.window_id == window_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
