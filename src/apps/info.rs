// Text-only windows: about box, startup system message and the game notice

use super::opener::{self, Opener};
use crate::desktop::content::{AppContent, StaticContent, Surface};

pub const VERSION: &str = "1.0.0";
pub const EAGLER_URL: &str = "https://eaglercraft.com/";

pub fn about() -> StaticContent {
    StaticContent::new(
        "About zenuxOS\n\
         \n\
         Desktop simulation with Safari, DEB Inspector and an Eaglercraft window.\n\
         made by alex nguyen/apexlegends\n\
         \n\
         WebGL games (like Eaglercraft) need a graphical browser.",
    )
}

/// Shown once when the desktop first appears
pub fn system_message() -> StaticContent {
    StaticContent::new(format!(
        "ZenuxOS System Message\n\
         \n\
         made by apex: alex nguyen\n\
         2026\n\
         version {}",
        VERSION
    ))
}

/// The game needs WebGL and WebAssembly, neither of which a terminal has.
/// Typing `open` hands the game URL to the system browser.
pub struct EaglerNotice {
    opener: Opener,
}

pub fn eaglercraft() -> EaglerNotice {
    EaglerNotice::with_opener(opener::system_opener())
}

impl EaglerNotice {
    pub fn with_opener(opener: Opener) -> Self {
        Self { opener }
    }
}

impl AppContent for EaglerNotice {
    fn render(&mut self) -> Surface {
        Surface::from_text(&format!(
            "Eaglercraft cannot run\n\
             \n\
             Reason:\n  \
             - WebGL is not available.\n  \
             - WebAssembly is not available.\n\
             \n\
             Try opening it directly in your browser: {}\n\
             Type 'open' to launch it there.",
            EAGLER_URL
        ))
        .with_prompt("eaglercraft>")
    }

    fn on_input(&mut self, surface: &mut Surface, line: &str) {
        if line.trim() == "open" {
            opener::open_external(&self.opener, surface, EAGLER_URL);
        }
    }
}
