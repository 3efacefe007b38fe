use crate::desktop::content::{AppContent, Surface};
use crate::storage::{EntryKind, StorageHandle};

pub const PROMPT: &str = "zenux@os:~$";

/// Toy command interpreter. Reads the shared storage root when one is mounted.
pub struct Terminal {
    storage: Option<StorageHandle>,
}

impl Terminal {
    pub fn new(storage: Option<StorageHandle>) -> Self {
        Self { storage }
    }

    fn run(&self, surface: &mut Surface, line: &str) {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return;
        };
        let args: Vec<&str> = words.collect();

        match cmd {
            "help" => surface.println("Commands: help, ls, clear, echo"),
            "ls" => match &self.storage {
                None => surface.println("Zenux root not mounted (virtual mode)."),
                Some(storage) => {
                    let entries = storage.borrow().entries("").unwrap_or_default();
                    for entry in entries {
                        let marker = match entry.kind {
                            EntryKind::Directory => "d",
                            EntryKind::File => "f",
                        };
                        surface.println(format!("{} {}", marker, entry.name));
                    }
                }
            },
            "clear" => surface.clear(),
            "echo" => surface.println(args.join(" ")),
            other => surface.println(format!("{}: command not found", other)),
        }
    }
}

impl AppContent for Terminal {
    fn render(&mut self) -> Surface {
        Surface::new().with_prompt(PROMPT)
    }

    fn init(&mut self, surface: &mut Surface) {
        surface.println("zenuxOS terminal");
        surface.println("Type 'help' for commands.");
        surface.println("");
    }

    fn on_input(&mut self, surface: &mut Surface, line: &str) {
        surface.println(format!("{} {}", PROMPT, line));
        self.run(surface, line.trim());
    }
}
