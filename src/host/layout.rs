// Screen layout and hit testing for the terminal host, in cell coordinates

use crate::apps::AppId;
use crate::desktop::DesktopSession;
use crate::geometry::{DesktopMetrics, Point, Rect, Viewport};
use crate::state::window::{WindowId, WindowInstance};

const START_LABEL: &str = "[Start]";
const TASK_LABEL_MAX: usize = 16;
const ICON_WIDTH: i32 = 18;
const START_MENU_WIDTH: i32 = 24;

/// Cell-based placement: one taskbar row, windows cascading right of the icon column
pub fn terminal_metrics() -> DesktopMetrics {
    DesktopMetrics {
        taskbar_reserve: 1,
        default_width: 56,
        default_height: 16,
        cascade_left: ICON_WIDTH + 2,
        cascade_top: 0,
        cascade_step: 2,
    }
}

/// Where a click on a window landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHit {
    Minimize,
    Maximize,
    Close,
    Title,
    Content,
}

/// Something on the taskbar or desktop a click can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    StartButton,
    TaskButton(WindowId),
    StartMenuItem(AppId),
    Icon(AppId),
    Window(WindowId, WindowHit),
    Desktop,
}

pub fn taskbar_row(viewport: Viewport) -> i32 {
    (viewport.height - 1).max(0)
}

pub fn start_button(viewport: Viewport) -> Rect {
    Rect::new(0, taskbar_row(viewport), START_LABEL.len() as i32, 1)
}

pub fn task_label(title: &str) -> String {
    let label: String = title.chars().take(TASK_LABEL_MAX).collect();
    format!("[{}]", label)
}

/// Taskbar buttons left to right, stopping before `limit` columns
pub fn task_buttons(session: &DesktopSession, viewport: Viewport, limit: i32) -> Vec<(WindowId, Rect)> {
    let row = taskbar_row(viewport);
    let mut x = START_LABEL.len() as i32 + 1;
    let mut out = Vec::new();
    for entry in session.taskbar().entries() {
        let width = task_label(&entry.label).chars().count() as i32;
        if x + width > limit {
            break;
        }
        out.push((entry.window_id, Rect::new(x, row, width, 1)));
        x += width + 1;
    }
    out
}

pub fn start_menu(viewport: Viewport) -> Rect {
    let height = AppId::LAUNCHABLE.len() as i32 + 2;
    Rect::new(0, taskbar_row(viewport) - height, START_MENU_WIDTH, height)
}

/// Launcher icons stacked down the left edge
pub fn icons() -> Vec<(AppId, Rect)> {
    AppId::LAUNCHABLE
        .iter()
        .enumerate()
        .map(|(i, app)| (*app, Rect::new(1, 1 + 2 * i as i32, ICON_WIDTH, 1)))
        .collect()
}

/// Title-bar buttons `[_][□][X]`, right-aligned inside the border
pub fn title_buttons(geometry: Rect) -> [(WindowHit, Rect); 3] {
    let close = geometry.right().saturating_sub(4);
    [
        (WindowHit::Minimize, Rect::new(close.saturating_sub(6), geometry.top, 3, 1)),
        (WindowHit::Maximize, Rect::new(close.saturating_sub(3), geometry.top, 3, 1)),
        (WindowHit::Close, Rect::new(close, geometry.top, 3, 1)),
    ]
}

pub fn hit_window(window: &WindowInstance, point: Point) -> Option<WindowHit> {
    if window.is_minimized() || !window.geometry.contains(point) {
        return None;
    }
    for (hit, rect) in title_buttons(window.geometry) {
        if rect.contains(point) {
            return Some(hit);
        }
    }
    if point.y == window.geometry.top {
        Some(WindowHit::Title)
    } else {
        Some(WindowHit::Content)
    }
}

/// Resolve a click, front to back: start menu, taskbar, windows, then icons
pub fn hit_test(
    session: &DesktopSession,
    viewport: Viewport,
    menu_open: bool,
    status_width: i32,
    point: Point,
) -> Target {
    if menu_open {
        let menu = start_menu(viewport);
        if menu.contains(point) {
            let row = point.y - menu.top - 1;
            let app = usize::try_from(row)
                .ok()
                .and_then(|r| AppId::LAUNCHABLE.get(r).copied());
            if let Some(app) = app {
                return Target::StartMenuItem(app);
            }
            return Target::Desktop;
        }
    }

    if point.y == taskbar_row(viewport) {
        if start_button(viewport).contains(point) {
            return Target::StartButton;
        }
        let limit = viewport.width - status_width;
        for (id, rect) in task_buttons(session, viewport, limit) {
            if rect.contains(point) {
                return Target::TaskButton(id);
            }
        }
        return Target::Desktop;
    }

    for window in session.windows_by_z().into_iter().rev() {
        if let Some(hit) = hit_window(window, point) {
            return Target::Window(window.id, hit);
        }
    }

    for (app, rect) in icons() {
        if rect.contains(point) {
            return Target::Icon(app);
        }
    }
    Target::Desktop
}

/// Intersection with the visible desktop, `None` when nothing of it shows
pub fn clip(rect: Rect, viewport: Viewport) -> Option<Rect> {
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right().min(viewport.width);
    let bottom = rect.bottom().min(taskbar_row(viewport));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(left, top, right - left, bottom - top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps;
    use pretty_assertions::assert_eq;

    fn view() -> Viewport {
        Viewport::new(100, 30)
    }

    #[test]
    fn test_title_buttons_sit_left_of_border() {
        let [(_, min), (_, max), (_, close)] = title_buttons(Rect::new(10, 5, 40, 10));
        assert_eq!(close, Rect::new(46, 5, 3, 1));
        assert_eq!(max, Rect::new(43, 5, 3, 1));
        assert_eq!(min, Rect::new(40, 5, 3, 1));
    }

    #[test]
    fn test_hit_test_prefers_front_window() {
        let mut session = DesktopSession::with_metrics(terminal_metrics());
        let back = apps::launch(&mut session, AppId::About, None);
        let front = apps::launch(&mut session, AppId::Terminal, None);

        // Both cascade near the icon column; the overlap belongs to the later window
        let overlap = Point::new(30, 5);
        assert_eq!(
            hit_test(&session, view(), false, 0, overlap),
            Target::Window(front, WindowHit::Content)
        );

        session.focus(back);
        assert_eq!(
            hit_test(&session, view(), false, 0, overlap),
            Target::Window(back, WindowHit::Content)
        );
    }

    #[test]
    fn test_minimized_window_is_click_through() {
        let mut session = DesktopSession::with_metrics(terminal_metrics());
        let id = apps::launch(&mut session, AppId::About, None);
        let top = session.window(id).unwrap().geometry.top;
        session.minimize(id);
        assert_eq!(hit_test(&session, view(), false, 0, Point::new(30, top + 1)), Target::Desktop);
    }

    #[test]
    fn test_taskbar_and_start_button() {
        let mut session = DesktopSession::with_metrics(terminal_metrics());
        let id = apps::launch(&mut session, AppId::Browser, None);
        let row = taskbar_row(view());

        assert_eq!(hit_test(&session, view(), false, 0, Point::new(2, row)), Target::StartButton);
        // "[Start] [Safari]"
        assert_eq!(hit_test(&session, view(), false, 0, Point::new(9, row)), Target::TaskButton(id));
        assert_eq!(hit_test(&session, view(), false, 0, Point::new(60, row)), Target::Desktop);
    }

    #[test]
    fn test_task_buttons_respect_status_area() {
        let mut session = DesktopSession::with_metrics(terminal_metrics());
        apps::launch(&mut session, AppId::Browser, None);
        apps::launch(&mut session, AppId::Terminal, None);
        // [Safari] ends at column 16, [Zenux Terminal] would end at 33
        assert_eq!(task_buttons(&session, view(), 20).len(), 1);
        assert_eq!(task_buttons(&session, view(), 40).len(), 2);
    }

    #[test]
    fn test_start_menu_rows_map_to_apps() {
        let session = DesktopSession::with_metrics(terminal_metrics());
        let menu = start_menu(view());
        let first = Point::new(3, menu.top + 1);
        assert_eq!(
            hit_test(&session, view(), true, 0, first),
            Target::StartMenuItem(AppId::Explorer)
        );
        assert_eq!(
            hit_test(&session, view(), false, 0, Point::new(3, 1)),
            Target::Icon(AppId::Explorer)
        );
    }

    #[test]
    fn test_clip_to_desktop() {
        assert_eq!(clip(Rect::new(-5, 2, 10, 4), view()), Some(Rect::new(0, 2, 5, 4)));
        assert_eq!(clip(Rect::new(90, 27, 20, 10), view()), Some(Rect::new(90, 27, 10, 2)));
        assert_eq!(clip(Rect::new(120, 2, 10, 4), view()), None);
    }
}
