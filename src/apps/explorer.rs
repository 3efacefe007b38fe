use crate::desktop::content::{AppContent, Surface};
use crate::storage::{EntryKind, StorageHandle};

/// Lists the storage root once the window is attached
pub struct Explorer {
    storage: Option<StorageHandle>,
}

impl Explorer {
    pub fn new(storage: Option<StorageHandle>) -> Self {
        Self { storage }
    }
}

impl AppContent for Explorer {
    fn render(&mut self) -> Surface {
        Surface::from_text("Loading Zenux filesystem…")
    }

    fn init(&mut self, surface: &mut Surface) {
        let Some(storage) = &self.storage else {
            surface.set_text("Zenux root not available (virtual mode).");
            return;
        };

        surface.clear();
        surface.println("Zenux FS (memory)");
        surface.println("");
        for entry in storage.borrow().entries("").unwrap_or_default() {
            let marker = match entry.kind {
                EntryKind::Directory => "📁",
                EntryKind::File => "📄",
            };
            surface.println(format!("{} {}", marker, entry.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_virtual_mode_message() {
        let mut explorer = Explorer::new(None);
        let mut surface = explorer.render();
        assert_eq!(surface.text(), "Loading Zenux filesystem…");
        explorer.init(&mut surface);
        assert_eq!(surface.text(), "Zenux root not available (virtual mode).");
    }

    #[test]
    fn test_lists_root_entries() {
        let mut explorer = Explorer::new(Some(MemoryStorage::mount_zenux()));
        let mut surface = explorer.render();
        explorer.init(&mut surface);
        assert_eq!(surface.lines.len(), 2 + 6);
        assert_eq!(surface.lines[2], "📁 Downloads");
    }
}
