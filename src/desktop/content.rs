// Content contract between the window manager and application modules

use serde::{Deserialize, Serialize};

/// Rendered content of a window: text lines plus an optional input prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub lines: Vec<String>,
    pub prompt: Option<String>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    pub fn println(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replace the whole body
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// An application's window content.
///
/// `render` produces the initial fragment. `init` runs exactly once, after the
/// surface is attached to its window; it must not rely on the final geometry.
pub trait AppContent {
    fn render(&mut self) -> Surface;

    fn init(&mut self, _surface: &mut Surface) {}

    /// A line of user input typed into the window
    fn on_input(&mut self, _surface: &mut Surface, _line: &str) {}
}

/// Fixed text content with no behaviour
pub struct StaticContent {
    text: String,
}

impl StaticContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl AppContent for StaticContent {
    fn render(&mut self) -> Surface {
        Surface::from_text(&self.text)
    }
}
