// Drawing for the terminal host

use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::layout;
use super::login::{Field, LoginForm};
use super::{Host, Screen};
use crate::apps::AppId;
use crate::desktop::content::Surface;
use crate::geometry::Rect;
use crate::state::window::WindowInstance;

const DESKTOP_BG: Color = Color::Rgb(18, 24, 38);
const TASKBAR_BG: Color = Color::Rgb(30, 41, 59);

fn normal_style() -> Style {
    Style::default().fg(Color::Gray).bg(DESKTOP_BG)
}

fn taskbar_style() -> Style {
    Style::default().fg(Color::White).bg(TASKBAR_BG)
}

fn focused_style() -> Style {
    Style::default().fg(Color::White).bg(Color::Black).add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray).bg(Color::Black)
}

fn sel_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

fn to_area(rect: Rect) -> Area {
    Area::new(
        rect.left.max(0) as u16,
        rect.top.max(0) as u16,
        rect.width.max(0) as u16,
        rect.height.max(0) as u16,
    )
}

/// Pad or cut to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Border, title bar and body of a window as plain rows, unclipped.
///
/// The body shows the tail of the surface, followed by the prompt line when
/// `input` is given.
pub(super) fn window_rows(window: &WindowInstance, surface: Option<&Surface>, input: Option<&str>) -> Vec<String> {
    let width = window.geometry.width.max(2) as usize;
    let height = window.geometry.height.max(2) as usize;
    let inner = width - 2;

    let buttons = "[_][□][X]";
    let button_width = buttons.chars().count();
    let title_room = inner.saturating_sub(button_width + 1);
    let title: String = format!(" {} ", window.title).chars().take(title_room).collect();
    let fill = inner.saturating_sub(title.chars().count() + button_width);
    let mut top = fit(&format!("┌{}{}{}", title, "─".repeat(fill), buttons), width - 1);
    top.push('┐');

    let mut body: Vec<String> = surface.map(|s| s.lines.clone()).unwrap_or_default();
    if let (Some(prompt), Some(input)) = (surface.and_then(|s| s.prompt.as_deref()), input) {
        body.push(format!("{} {}_", prompt, input));
    }
    let rows = height - 2;
    let skip = body.len().saturating_sub(rows);

    let mut out = Vec::with_capacity(height);
    out.push(top);
    let mut shown = body.iter().skip(skip);
    for _ in 0..rows {
        let line = shown.next().map(String::as_str).unwrap_or("");
        out.push(format!("│{}│", fit(line, inner)));
    }
    out.push(format!("└{}┘", "─".repeat(inner)));
    out
}

impl Host {
    pub fn draw(&self, frame: &mut Frame) {
        let size = frame.area();
        frame.render_widget(Block::default().style(normal_style()), size);

        match self.screen {
            Screen::Boot => self.draw_boot(frame, size),
            Screen::Desktop if self.is_locked() => {
                draw_login(frame, size, &self.login, "Session expired", "The trial has ended. Admin login required.");
            }
            Screen::Desktop => {
                self.draw_icons(frame, size);
                self.draw_windows(frame, size);
                self.draw_taskbar(frame, size);
                if self.menu_open {
                    self.draw_start_menu(frame, size);
                }
                if self.login_open {
                    draw_login(frame, size, &self.login, "Admin login", "Esc to cancel.");
                }
            }
        }
    }

    fn draw_boot(&self, frame: &mut Frame, size: Area) {
        let mut lines: Vec<Line> = self
            .boot_log
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), normal_style())))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: mount Zenux root in memory   V: virtual mode   Ctrl+Q: quit",
            sel_style(),
        )));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" zenuxOS boot monitor ")
            .style(normal_style());
        frame.render_widget(Paragraph::new(lines).block(block), size);
    }

    fn draw_icons(&self, frame: &mut Frame, size: Area) {
        for (app, rect) in layout::icons() {
            let area = to_area(rect).intersection(size);
            if area.width == 0 || area.height == 0 {
                continue;
            }
            let label = format!("▣ {}", app.title());
            frame.render_widget(Paragraph::new(label).style(normal_style()), area);
        }
    }

    fn draw_windows(&self, frame: &mut Frame, size: Area) {
        let front = self.session.front_most().map(|w| w.id);
        for window in self.session.windows_by_z() {
            if window.is_minimized() {
                continue;
            }
            let Some(visible) = layout::clip(window.geometry, self.viewport) else {
                continue;
            };
            let area = to_area(visible).intersection(size);
            if area.width == 0 || area.height == 0 {
                continue;
            }

            let focused = Some(window.id) == front;
            let input = focused.then_some(self.input.as_str());
            let rows = window_rows(window, self.session.surface(window.id), input);
            let style = if focused { focused_style() } else { dim_style() };
            let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();

            // Scroll past whatever is off-screen to the left or top
            let dx = visible.left.saturating_sub(window.geometry.left).min(i32::from(u16::MAX)) as u16;
            let dy = visible.top.saturating_sub(window.geometry.top).min(i32::from(u16::MAX)) as u16;
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines).style(style).scroll((dy, dx)), area);
        }
    }

    fn draw_taskbar(&self, frame: &mut Frame, size: Area) {
        if size.height == 0 {
            return;
        }
        let row = Area::new(size.x, size.y + size.height - 1, size.width, 1);
        let status = self.status_line();
        let status_width = status.chars().count() as i32 + 1;
        let limit = self.viewport.width - status_width;

        let mut spans = vec![Span::styled("[Start]", sel_style())];
        let mut x = 7;
        let front = self.session.front_most().map(|w| w.id);
        for (id, rect) in layout::task_buttons(&self.session, self.viewport, limit) {
            let Some(entry) = self.session.taskbar().entry(id) else {
                continue;
            };
            spans.push(Span::raw(" ".repeat((rect.left - x).max(0) as usize)));
            let style = if Some(id) == front { sel_style() } else { taskbar_style() };
            spans.push(Span::styled(layout::task_label(&entry.label), style));
            x = rect.right();
        }
        let pad = (self.viewport.width - status_width - x).max(1) as usize;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::raw(status));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(taskbar_style()), row);
    }

    fn draw_start_menu(&self, frame: &mut Frame, size: Area) {
        let area = to_area(layout::start_menu(self.viewport)).intersection(size);
        let lines: Vec<Line> = AppId::LAUNCHABLE
            .iter()
            .enumerate()
            .map(|(i, app)| {
                let style = if i == self.menu_selected { sel_style() } else { taskbar_style() };
                Line::from(Span::styled(format!(" {}", app.title()), style))
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" zenuxOS ")
            .style(taskbar_style());
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn draw_login(frame: &mut Frame, size: Area, form: &LoginForm, title: &str, hint: &str) {
    let width = 48.min(size.width);
    let height = 9.min(size.height);
    let area = Area::new(
        size.x + (size.width - width) / 2,
        size.y + (size.height - height) / 2,
        width,
        height,
    );

    let field = |label: &str, value: String, active: bool| {
        let style = if active { sel_style() } else { taskbar_style() };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), taskbar_style()),
            Span::styled(format!("{}{}", value, if active { "_" } else { "" }), style),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(hint.to_string(), taskbar_style())),
        Line::from(""),
        field("Username", form.username.clone(), form.focus == Field::Username),
        field("Password", form.masked_secret(), form.focus == Field::Secret),
        Line::from(""),
    ];
    match &form.message {
        Some(msg) => lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::LightRed).bg(TASKBAR_BG),
        ))),
        None => lines.push(Line::from(Span::styled("Tab: switch field   Enter: submit", taskbar_style()))),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .style(taskbar_style());
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
