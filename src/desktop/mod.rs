// Window manager: one desktop session owning the registry, taskbar, z counter and drag slot

pub mod content;
pub mod drag;
pub mod events;

use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use self::content::{AppContent, Surface};
use self::drag::DragSession;
use self::events::DesktopEvent;
use crate::geometry::{self, DesktopMetrics, Point, Viewport};
use crate::state::taskbar::Taskbar;
use crate::state::window::{MaximizeState, Visibility, WindowId, WindowInstance};
use crate::state::WindowRegistry;

/// Content attached to a window together with its rendered surface
struct MountedContent {
    content: Box<dyn AppContent>,
    surface: Surface,
}

/// All mutable desktop state. Hosts own one and pass it by reference.
///
/// Every operation is total: unknown ids and repeated calls are no-ops.
pub struct DesktopSession {
    id: Uuid,
    registry: WindowRegistry,
    taskbar: Taskbar,
    mounts: HashMap<WindowId, MountedContent>,
    z_counter: u64,
    drag: Option<DragSession>,
    metrics: DesktopMetrics,
    events: Vec<DesktopEvent>,
}

impl DesktopSession {
    pub fn new() -> Self {
        Self::with_metrics(DesktopMetrics::default())
    }

    pub fn with_metrics(metrics: DesktopMetrics) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "desktop session created");
        Self {
            id,
            registry: WindowRegistry::new(),
            taskbar: Taskbar::new(),
            mounts: HashMap::new(),
            z_counter: 0,
            drag: None,
            metrics,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn metrics(&self) -> &DesktopMetrics {
        &self.metrics
    }

    /// Open the window for `app_id`, or bring the existing one to the front.
    ///
    /// `build` runs only when a new window is created. Its content is rendered,
    /// registered with a taskbar entry, attached, and only then initialized.
    pub fn open_or_focus<F>(&mut self, app_id: &str, title: &str, build: F) -> WindowId
    where
        F: FnOnce() -> Box<dyn AppContent>,
    {
        if let Some(existing) = self.registry.find(app_id) {
            debug!(session = %self.id, app_id, window = %existing, "app already open, focusing");
            self.focus(existing);
            return existing;
        }

        let mut content = build();
        let surface = content.render();

        let geometry = geometry::cascade_origin(self.registry.created_count() + 1, &self.metrics);
        let z_index = self.next_z();
        let id = self.registry.register(app_id, title, geometry, z_index);
        self.taskbar.push(id, title.to_string());
        self.mounts.insert(id, MountedContent { content, surface });

        if let Some(window) = self.registry.get(id) {
            self.events.push(DesktopEvent::WindowCreated {
                window: window.clone(),
            });
        }
        info!(session = %self.id, app_id, window = %id, z_index, "window created");

        // Surface is attached; init hooks may now inspect it
        if let Some(mount) = self.mounts.get_mut(&id) {
            mount.content.init(&mut mount.surface);
        }

        id
    }

    /// Un-minimize and raise above every other window
    pub fn focus(&mut self, id: WindowId) {
        if !self.registry.contains(id) {
            debug!(session = %self.id, window = %id, "focus on unknown window ignored");
            return;
        }
        let z_index = self.next_z();
        if let Some(window) = self.registry.get_mut(id) {
            window.visibility = Visibility::Normal;
            window.z_index = z_index;
        }
        self.events.push(DesktopEvent::WindowFocused { id, z_index });
    }

    /// Start moving a window by its title bar
    pub fn begin_drag(&mut self, id: WindowId, pointer: Point) {
        if let Some(active) = self.drag {
            if active.window_id != id {
                debug!(session = %self.id, active = %active.window_id, requested = %id, "drag already active");
                return;
            }
        }
        let Some(window) = self.registry.get(id) else {
            debug!(session = %self.id, window = %id, "drag on unknown window ignored");
            return;
        };

        self.drag = Some(DragSession::begin(id, window.geometry.origin(), pointer));
        self.focus(id);
    }

    pub fn update_drag(&mut self, pointer: Point) {
        let Some(session) = self.drag else {
            return;
        };
        match self.registry.get_mut(session.window_id) {
            Some(window) => window.geometry = session.apply(window.geometry, pointer),
            None => {
                debug!(session = %self.id, window = %session.window_id, "drag target vanished");
                self.drag = None;
            }
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            if let Some(window) = self.registry.get(session.window_id) {
                self.events.push(DesktopEvent::WindowMoved {
                    id: window.id,
                    geometry: window.geometry,
                });
            }
        }
    }

    /// Hide a window; it stays registered and keeps its taskbar entry
    pub fn minimize(&mut self, id: WindowId) {
        let Some(window) = self.registry.get_mut(id) else {
            return;
        };
        window.visibility = Visibility::Minimized;
        self.events.push(DesktopEvent::WindowMinimized { id });
    }

    /// Flip between maximized and the geometry saved when maximizing
    pub fn toggle_maximize(&mut self, id: WindowId, viewport: Viewport) {
        let metrics = self.metrics;
        let Some(window) = self.registry.get_mut(id) else {
            return;
        };

        match window.maximize {
            MaximizeState::Normal => {
                let (maximized, saved) =
                    geometry::maximize(window.geometry, viewport, metrics.taskbar_reserve);
                window.saved_geometry = Some(saved);
                window.geometry = maximized;
                window.maximize = MaximizeState::Maximized;
            }
            MaximizeState::Maximized => {
                let fallback = geometry::default_bounds_at(window.geometry, &metrics);
                window.geometry = geometry::restore(window.saved_geometry.take(), fallback);
                window.maximize = MaximizeState::Normal;
            }
        }

        self.events.push(DesktopEvent::WindowMaximizeToggled {
            id,
            maximized: window.is_maximized(),
            geometry: window.geometry,
        });
    }

    /// Remove the window, its taskbar entry and its content in one step
    pub fn close(&mut self, id: WindowId) {
        let Some(window) = self.registry.remove(id) else {
            return;
        };
        self.taskbar.remove(id);
        self.mounts.remove(&id);
        if self.drag.is_some_and(|d| d.window_id == id) {
            self.drag = None;
        }
        self.events.push(DesktopEvent::WindowClosed { id });
        info!(session = %self.id, app_id = %window.app_id, window = %id, "window closed");
    }

    /// Taskbar button click
    pub fn activate_taskbar_entry(&mut self, id: WindowId) {
        self.focus(id);
    }

    /// Forward a line of user input to the window's content
    pub fn deliver_input(&mut self, id: WindowId, line: &str) {
        if let Some(mount) = self.mounts.get_mut(&id) {
            mount.content.on_input(&mut mount.surface, line);
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowInstance> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn surface(&self, id: WindowId) -> Option<&Surface> {
        self.mounts.get(&id).map(|m| &m.surface)
    }

    pub fn active_drag(&self) -> Option<DragSession> {
        self.drag
    }

    /// Windows back to front
    pub fn windows_by_z(&self) -> Vec<&WindowInstance> {
        let mut windows = self.registry.all();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Visible window with the highest z-index
    pub fn front_most(&self) -> Option<&WindowInstance> {
        self.registry
            .all()
            .into_iter()
            .filter(|w| !w.is_minimized())
            .max_by_key(|w| w.z_index)
    }

    /// Take the queued events
    pub fn drain_events(&mut self) -> Vec<DesktopEvent> {
        std::mem::take(&mut self.events)
    }

    fn next_z(&mut self) -> u64 {
        self.z_counter = self.z_counter.max(self.registry.max_z()) + 1;
        self.z_counter
    }
}

impl Default for DesktopSession {
    fn default() -> Self {
        Self::new()
    }
}
