// Terminal host: boot monitor, desktop, taskbar and lock screen drawn with ratatui

pub mod layout;
pub mod login;
mod render;

use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use self::layout::{Target, WindowHit};
use self::login::LoginForm;
use crate::apps::{self, AppId};
use crate::clock::{self, Clock, SystemClock, TemperatureSensor};
use crate::config::ShellConfig;
use crate::desktop::DesktopSession;
use crate::error::ShellError;
use crate::geometry::{Point, Viewport};
use crate::session::{GateState, SessionGate};
use crate::state::window::WindowId;
use crate::storage::{MemoryStorage, StorageHandle};

const BOOT_LOG: [&str; 5] = [
    "[REAL] zenuxOS bootloader started",
    "[FAKE] Mounting /dev/html0 ...",
    "[FAKE] Checking virtual sectors ... OK",
    "[WARN] WebGL NOT available. Eaglercraft will NOT run.",
    "[REAL] Waiting for storage selection…",
];

/// A terminal has no GPU context to offer
const WEBGL_STATUS: &str = "WebGL: NOT AVAILABLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Boot,
    Desktop,
}

/// Everything the terminal host shows, driven by key, mouse and timer events
pub struct Host {
    screen: Screen,
    boot_log: Vec<String>,
    session: DesktopSession,
    gate: SessionGate,
    desktop_visible: Rc<Cell<bool>>,
    storage: Option<StorageHandle>,
    clock: Rc<dyn Clock>,
    sensor: TemperatureSensor,
    viewport: Viewport,
    menu_open: bool,
    menu_selected: usize,
    login: LoginForm,
    login_open: bool,
    /// Line being typed into the front-most window
    input: String,
    /// Window the pending `input` belongs to
    input_owner: Option<WindowId>,
    quit: bool,
}

impl Host {
    pub fn new(config: &ShellConfig, clock: Rc<dyn Clock>, viewport: Viewport) -> Self {
        let mut gate = SessionGate::new(config.trial_duration_ms, config.credentials());

        // The gate only reports transitions; visibility is this host's concern
        let desktop_visible = Rc::new(Cell::new(true));
        let visible = Rc::clone(&desktop_visible);
        gate.subscribe(move |state| visible.set(state == GateState::Active));

        Self {
            screen: Screen::Boot,
            boot_log: BOOT_LOG.iter().map(|s| s.to_string()).collect(),
            session: DesktopSession::with_metrics(layout::terminal_metrics()),
            gate,
            desktop_visible,
            storage: None,
            clock,
            sensor: TemperatureSensor::new(),
            viewport,
            menu_open: false,
            menu_selected: 0,
            login: LoginForm::new(),
            login_open: false,
            input: String::new(),
            input_owner: None,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &DesktopSession {
        &self.session
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn is_locked(&self) -> bool {
        !self.desktop_visible.get()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Leave the boot monitor: mount storage (or run virtual), start the trial, show the desktop
    pub fn start_desktop(&mut self, mount: bool) {
        if self.screen != Screen::Boot {
            return;
        }
        if mount {
            self.boot_log.push("[REAL] Zenux root mounted in memory.".to_string());
            self.storage = Some(MemoryStorage::mount_zenux());
        } else {
            self.boot_log.push("[FAKE] Running zenuxOS in virtual mode (no real disk).".to_string());
        }
        self.boot_log.push("[REAL] Launching desktop.".to_string());
        info!(mounted = mount, "[HOST] desktop starting");

        self.screen = Screen::Desktop;
        self.gate.start(self.clock.now_ms());
        self.launch(AppId::SystemMessage);
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.viewport = Viewport::new(i32::from(width), i32::from(height));
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            info!("[HOST] quit requested");
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Boot => match key.code {
                KeyCode::Enter => self.start_desktop(true),
                KeyCode::Char('v') | KeyCode::Char('V') => self.start_desktop(false),
                _ => {}
            },
            Screen::Desktop if self.is_locked() || self.login_open => self.login_key(key),
            Screen::Desktop if self.menu_open => self.menu_key(key),
            Screen::Desktop => self.desktop_key(key),
        }
        self.follow_focus();
    }

    fn login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc if !self.is_locked() => {
                self.login_open = false;
                self.login = LoginForm::new();
            }
            KeyCode::Tab | KeyCode::BackTab => self.login.toggle_field(),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Enter => {
                if self.login.submit(&mut self.gate) {
                    self.login_open = false;
                }
            }
            KeyCode::Char(c) => self.login.push(c),
            _ => {}
        }
    }

    fn menu_key(&mut self, key: KeyEvent) {
        let count = AppId::LAUNCHABLE.len();
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.menu_open = false,
            KeyCode::Up => self.menu_selected = (self.menu_selected + count - 1) % count,
            KeyCode::Down | KeyCode::Tab => self.menu_selected = (self.menu_selected + 1) % count,
            KeyCode::Enter => {
                let app = AppId::LAUNCHABLE[self.menu_selected % count];
                self.menu_open = false;
                self.launch(app);
            }
            _ => {}
        }
    }

    fn desktop_key(&mut self, key: KeyEvent) {
        let front = self.session.front_most().map(|w| w.id);
        match key.code {
            KeyCode::F(10) => {
                self.menu_open = true;
                self.menu_selected = 0;
            }
            KeyCode::F(2) if !self.gate.is_unlocked() => self.login_open = true,
            KeyCode::F(4) => {
                if let Some(id) = front {
                    self.session.close(id);
                }
            }
            KeyCode::F(5) => {
                if let Some(id) = front {
                    self.session.toggle_maximize(id, self.viewport);
                }
            }
            KeyCode::F(6) => {
                if let Some(id) = front {
                    self.session.minimize(id);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = front {
                    let line = std::mem::take(&mut self.input);
                    self.session.deliver_input(id, &line);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if self.front_accepts_input() => self.input.push(c),
            _ => {}
        }
    }

    fn front_accepts_input(&self) -> bool {
        self.session
            .front_most()
            .and_then(|w| self.session.surface(w.id))
            .is_some_and(|s| s.prompt.is_some())
    }

    /// Drop a half-typed line once another window comes to the front
    fn follow_focus(&mut self) {
        let front = self.session.front_most().map(|w| w.id);
        if front != self.input_owner {
            self.input.clear();
            self.input_owner = front;
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Desktop || self.is_locked() || self.login_open {
            return;
        }
        let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(point),
            MouseEventKind::Drag(MouseButton::Left) => self.session.update_drag(point),
            MouseEventKind::Up(MouseButton::Left) => self.session.end_drag(),
            _ => {}
        }
        self.follow_focus();
    }

    fn click(&mut self, point: Point) {
        let status_width = self.status_line().chars().count() as i32 + 1;
        let target = layout::hit_test(&self.session, self.viewport, self.menu_open, status_width, point);
        debug!(?target, x = point.x, y = point.y, "[HOST] click");

        if target != Target::StartButton {
            self.menu_open = false;
        }
        match target {
            Target::StartButton => {
                self.menu_open = !self.menu_open;
                self.menu_selected = 0;
            }
            Target::TaskButton(id) => self.session.activate_taskbar_entry(id),
            Target::StartMenuItem(app) | Target::Icon(app) => self.launch(app),
            Target::Window(id, WindowHit::Minimize) => self.session.minimize(id),
            Target::Window(id, WindowHit::Maximize) => self.session.toggle_maximize(id, self.viewport),
            Target::Window(id, WindowHit::Close) => self.session.close(id),
            Target::Window(id, WindowHit::Title) => self.session.begin_drag(id, point),
            Target::Window(id, WindowHit::Content) => self.session.focus(id),
            Target::Desktop => {}
        }
    }

    fn launch(&mut self, app: AppId) {
        apps::launch(&mut self.session, app, self.storage.as_ref());
    }

    /// Periodic tick: poll the trial gate
    pub fn tick(&mut self) {
        if self.screen != Screen::Desktop {
            return;
        }
        let was_locked = self.is_locked();
        self.gate.poll(self.clock.now_ms());
        if self.is_locked() && !was_locked {
            // Hidden desktop: no interaction may continue underneath
            self.session.end_drag();
            self.menu_open = false;
            self.login = LoginForm::new();
            self.input.clear();
        }
    }

    pub fn sample_temperature(&mut self) {
        self.sensor.sample();
    }

    /// Taskbar status: trial countdown, temperature, WebGL support and local time
    pub fn status_line(&self) -> String {
        let trial = if self.gate.is_unlocked() {
            Some("Admin".to_string())
        } else {
            self.gate
                .remaining(self.clock.now_ms())
                .map(|ms| format!("Trial {}", clock::format_remaining(ms)))
        };
        let mut parts: Vec<String> = trial.into_iter().collect();
        parts.push(self.sensor.label());
        parts.push(WEBGL_STATUS.to_string());
        parts.push(clock::wall_clock_label());
        parts.join(" | ")
    }

    /// Log queued desktop events as JSON
    pub fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            match serde_json::to_string(&event) {
                Ok(json) => debug!(target: "zenuxos_lib::events", "{}", json),
                Err(e) => warn!("[HOST] event not serializable: {}", e),
            }
        }
    }
}

/// Raw mode, alternate screen and mouse capture for the life of the value
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self, ShellError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}

/// Blocking reader thread feeding terminal events into the async loop
fn spawn_input_reader(tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("[HOST] terminal input closed: {}", e);
                break;
            }
        }
    });
}

/// Run the shell until the user quits
pub async fn run(config: ShellConfig) -> Result<(), ShellError> {
    let mut guard = TerminalGuard::enter()?;
    let size = guard.terminal.size()?;
    let viewport = Viewport::new(i32::from(size.width), i32::from(size.height));
    let mut host = Host::new(&config, Rc::new(SystemClock), viewport);

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx);

    let mut tick = tokio::time::interval(Duration::from_millis(config.tick_ms.max(50)));
    let mut temperature =
        tokio::time::interval(Duration::from_millis(config.temperature_interval_ms.max(50)));

    info!(session = %host.session.id(), "[HOST] shell running");
    loop {
        guard.terminal.draw(|frame| host.draw(frame))?;

        tokio::select! {
            received = rx.recv() => match received {
                Some(ev) => host.handle_event(ev),
                None => break,
            },
            _ = tick.tick() => host.tick(),
            _ = temperature.tick() => host.sample_temperature(),
        }

        host.flush_events();
        if host.should_quit() {
            break;
        }
    }

    info!("[HOST] shell stopped");
    Ok(())
}
