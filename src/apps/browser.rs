// Safari-style page viewer. Navigation is simulated: pages are never fetched.

use super::opener::{self, Opener};
use crate::desktop::content::{AppContent, Surface};

pub const HOME_URL: &str = "https://example.com";
const SEARCH_URL: &str = "https://duckduckgo.com/?q=";

/// Turn address-bar input into a URL. Blank input yields `None`.
pub fn to_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }

    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(url.to_string())
    } else if url.contains(' ') {
        Some(format!("{}{}", SEARCH_URL, encode_query(url)))
    } else {
        Some(format!("https://{}", url))
    }
}

/// Percent-encode a search query, leaving unreserved characters as-is
fn encode_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for byte in query.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'\'' | b'(' | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Back/forward history. Navigating drops any forward entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: Option<usize>,
}

impl History {
    pub fn navigate(&mut self, url: String) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(url);
        self.index = Some(self.entries.len() - 1);
    }

    pub fn back(&mut self) -> Option<&str> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.current()
            }
            _ => None,
        }
    }

    pub fn forward(&mut self) -> Option<&str> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);
                self.current()
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.index.and_then(|i| self.entries.get(i)).map(String::as_str)
    }
}

pub struct Browser {
    history: History,
    opener: Opener,
}

impl Browser {
    pub fn new() -> Self {
        Self::with_opener(opener::system_opener())
    }

    /// Browser whose `open` command goes through `opener`
    pub fn with_opener(opener: Opener) -> Self {
        Self {
            history: History::default(),
            opener,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn show(&self, surface: &mut Surface) {
        let url = self.history.current().unwrap_or("");
        surface.clear();
        surface.println(format!("URL: {}", url));
        surface.println("");
        surface.println(format!("[page view] {}", url));
        surface.println("Pages are not fetched in this shell.");
        surface.println("");
        surface.println("Type a URL or search, '<' back, '>' forward, 'open' for the system browser.");
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContent for Browser {
    fn render(&mut self) -> Surface {
        Surface::new().with_prompt("Search or enter website")
    }

    fn init(&mut self, surface: &mut Surface) {
        self.history.navigate(HOME_URL.to_string());
        self.show(surface);
    }

    fn on_input(&mut self, surface: &mut Surface, line: &str) {
        let moved = match line.trim() {
            "<" => self.history.back().is_some(),
            ">" => self.history.forward().is_some(),
            "open" => {
                if let Some(url) = self.history.current() {
                    opener::open_external(&self.opener, surface, url);
                }
                false
            }
            raw => match to_url(raw) {
                Some(url) => {
                    self.history.navigate(url);
                    true
                }
                None => false,
            },
        };
        if moved {
            self.show(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[test]
    fn test_to_url_normalization() {
        assert_eq!(to_url("  "), None);
        assert_eq!(to_url("HTTP://Example.com").as_deref(), Some("HTTP://Example.com"));
        assert_eq!(to_url("rust-lang.org").as_deref(), Some("https://rust-lang.org"));
        assert_eq!(
            to_url("rust window manager").as_deref(),
            Some("https://duckduckgo.com/?q=rust%20window%20manager")
        );
        assert_eq!(to_url("a&b c").as_deref(), Some("https://duckduckgo.com/?q=a%26b%20c"));
    }

    #[test]
    fn test_history_truncates_forward_entries() {
        let mut history = History::default();
        history.navigate("a".into());
        history.navigate("b".into());
        history.navigate("c".into());

        assert_eq!(history.back(), Some("b"));
        assert_eq!(history.back(), Some("a"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("b"));

        history.navigate("d".into());
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some("b"));
        assert_eq!(history.back(), Some("a"));
    }

    #[test]
    fn test_browser_starts_home_and_navigates() {
        let mut browser = Browser::new();
        let mut surface = browser.render();
        browser.init(&mut surface);
        assert_eq!(surface.lines[0], "URL: https://example.com");

        browser.on_input(&mut surface, "docs.rs");
        assert_eq!(surface.lines[0], "URL: https://docs.rs");

        browser.on_input(&mut surface, "<");
        assert_eq!(surface.lines[0], "URL: https://example.com");

        browser.on_input(&mut surface, "<");
        assert_eq!(surface.lines[0], "URL: https://example.com");
        assert_eq!(browser.history().current(), Some(HOME_URL));
    }

    #[test]
    fn test_open_hands_current_url_to_opener() {
        let opened = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&opened);
        let mut browser = Browser::with_opener(Box::new(move |url: &str| {
            log.borrow_mut().push(url.to_string());
            Ok(())
        }));
        let mut surface = browser.render();
        browser.init(&mut surface);
        browser.on_input(&mut surface, "docs.rs");
        browser.on_input(&mut surface, " open ");

        assert_eq!(*opened.borrow(), vec!["https://docs.rs".to_string()]);
        assert_eq!(surface.lines[0], "URL: https://docs.rs");
        assert_eq!(
            surface.lines.last().map(String::as_str),
            Some("Opened https://docs.rs in the system browser.")
        );
        assert_eq!(browser.history().current(), Some("https://docs.rs"));
    }

    #[test]
    fn test_open_failure_keeps_page() {
        let mut browser = Browser::with_opener(Box::new(|_: &str| {
            Err(io::Error::new(io::ErrorKind::Other, "no display"))
        }));
        let mut surface = browser.render();
        browser.init(&mut surface);
        browser.on_input(&mut surface, "open");

        assert_eq!(surface.lines[0], "URL: https://example.com");
        assert_eq!(
            surface.lines.last().map(String::as_str),
            Some("Could not open https://example.com: no display")
        );
    }
}
