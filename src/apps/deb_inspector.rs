// Debian package inspector. Emulated only: nothing is unpacked or executed.

use tracing::warn;

use crate::desktop::content::{AppContent, Surface};
use crate::storage::StorageHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
    pub arch: String,
    pub maintainer: String,
    pub description: String,
}

impl PackageMeta {
    /// Simulated metadata derived from the package file name
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = strip_deb_suffix(file_name);
        let name = if stem.is_empty() { "unknown-package" } else { stem };
        Self {
            name: name.to_string(),
            version: "1.0.0-emulated".to_string(),
            arch: "amd64 (virtual)".to_string(),
            maintainer: "unknown@zenux.local".to_string(),
            description: "Emulated Debian package inside zenuxOS. No real binaries will be executed."
                .to_string(),
        }
    }

    /// The file list an emulated package pretends to ship
    pub fn fake_files(&self) -> Vec<String> {
        let n = &self.name;
        vec![
            format!("usr/bin/{}", n),
            format!("usr/share/doc/{}/README", n),
            format!("usr/share/{}/index.html", n),
            format!("usr/share/{}/app.js", n),
            format!("usr/share/{}/style.css", n),
        ]
    }
}

fn strip_deb_suffix(file_name: &str) -> &str {
    let len = file_name.len();
    if len >= 4 && file_name.is_char_boundary(len - 4) && file_name[len - 4..].eq_ignore_ascii_case(".deb") {
        &file_name[..len - 4]
    } else {
        file_name
    }
}

/// Guess source languages from file extensions, in first-seen order
pub fn detect_languages<S: AsRef<str>>(files: &[S]) -> Vec<&'static str> {
    let mut langs: Vec<&'static str> = Vec::new();
    for name in files {
        let name = name.as_ref();
        let lang = if name.ends_with(".js") || name.ends_with(".html") {
            Some("HTML/JS (browser runnable)")
        } else if name.ends_with(".py") {
            Some("Python (not runnable in browser)")
        } else if name.ends_with(".sh") {
            Some("Shell script (not runnable in browser)")
        } else if name.ends_with(".so") || !name.contains('.') {
            Some("Native binary (not runnable in browser)")
        } else if name.ends_with(".cpp") || name.ends_with(".hpp") {
            Some("C++ source")
        } else if name.ends_with(".rb") {
            Some("Ruby")
        } else if name.ends_with(".php") {
            Some("PHP")
        } else if name.ends_with(".go") {
            Some("Go")
        } else if name.ends_with(".rs") {
            Some("Rust")
        } else {
            None
        };
        if let Some(lang) = lang {
            if !langs.contains(&lang) {
                langs.push(lang);
            }
        }
    }
    if langs.is_empty() {
        langs.push("Unknown / data only");
    }
    langs
}

pub struct DebInspector {
    storage: Option<StorageHandle>,
    package: Option<PackageMeta>,
}

impl DebInspector {
    pub fn new(storage: Option<StorageHandle>) -> Self {
        Self {
            storage,
            package: None,
        }
    }

    pub fn package(&self) -> Option<&PackageMeta> {
        self.package.as_ref()
    }

    fn load(&mut self, surface: &mut Surface, file_name: &str) {
        if !file_name.to_ascii_lowercase().ends_with(".deb") {
            surface.println("No .deb loaded.");
            self.package = None;
            return;
        }

        let meta = PackageMeta::from_file_name(file_name);
        surface.println(format!("Loaded .deb: {}", file_name));
        surface.println("[DEB EMU] Reading package metadata (simulated)…");
        surface.println(format!("Package: {}", meta.name));
        surface.println(format!("Version: {}", meta.version));
        surface.println(format!("Architecture: {}", meta.arch));
        surface.println(format!("Maintainer: {}", meta.maintainer));
        surface.println(meta.description.clone());

        let files = meta.fake_files();
        surface.println("File overview:");
        for file in &files {
            surface.println(format!("  {}", file));
        }
        surface.println("[DEB EMU] Detected languages:");
        for lang in detect_languages(&files) {
            surface.println(format!("  - {}", lang));
        }
        surface.println("[DEB EMU] Ready to install (virtual only).");
        self.package = Some(meta);
    }

    fn install(&mut self, surface: &mut Surface) {
        let Some(meta) = &self.package else {
            surface.println("No package loaded. Load a .deb first.");
            return;
        };
        let Some(storage) = &self.storage else {
            surface.println("Zenux root not mounted. Installation simulated only, nothing written to disk.");
            surface.println("[DEB EMU] Installation complete (virtual only).");
            return;
        };

        surface.println(format!(
            "[DEB EMU] Installing {} into Zenux/apps/deb-installs/{} …",
            meta.name, meta.name
        ));
        let path = format!("apps/deb-installs/{}/README.emu.txt", meta.name);
        let readme = format!(
            "This is a virtual installation of {}\nInstalled by zenuxOS DEB Inspector.\nNo real system files were changed.\n",
            meta.name
        );
        match storage.borrow_mut().write_file(&path, &readme) {
            Ok(()) => {
                surface.println("[DEB EMU] Created virtual package folder and README.emu.txt");
                surface.println("[DEB EMU] Installation complete (emulated).");
            }
            Err(e) => {
                warn!("[DEB EMU] install of {} failed: {}", meta.name, e);
                surface.println("[DEB EMU] Installation failed (virtual filesystem error).");
            }
        }
    }
}

impl AppContent for DebInspector {
    fn render(&mut self) -> Surface {
        Surface::from_text(
            "Ready. Use 'load <file.deb>' or 'install' (emulated only).\nNo package loaded.",
        )
        .with_prompt("deb>")
    }

    fn on_input(&mut self, surface: &mut Surface, line: &str) {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some(("load", file)) => self.load(surface, file.trim()),
            None if line == "load" => surface.println("No .deb loaded."),
            None if line == "install" => self.install(surface),
            None if line.is_empty() => {}
            _ => surface.println("Commands: load <file.deb>, install"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_meta_from_file_name() {
        assert_eq!(PackageMeta::from_file_name("hello_2.10.deb").name, "hello_2.10");
        assert_eq!(PackageMeta::from_file_name("TOOL.DEB").name, "TOOL");
        assert_eq!(PackageMeta::from_file_name(".deb").name, "unknown-package");
    }

    #[test]
    fn test_detect_languages() {
        let files = ["usr/bin/tool", "a.py", "b.js", "c.html", "d.rs", "e.py"];
        assert_eq!(
            detect_languages(&files),
            vec![
                "Native binary (not runnable in browser)",
                "Python (not runnable in browser)",
                "HTML/JS (browser runnable)",
                "Rust",
            ]
        );
        assert_eq!(detect_languages(&["data.bin"]), vec!["Unknown / data only"]);
    }

    #[test]
    fn test_fake_package_languages() {
        let meta = PackageMeta::from_file_name("hello.deb");
        assert_eq!(
            detect_languages(&meta.fake_files()),
            vec!["Native binary (not runnable in browser)", "HTML/JS (browser runnable)"]
        );
    }

    #[test]
    fn test_install_requires_loaded_package() {
        let mut inspector = DebInspector::new(None);
        let mut surface = inspector.render();
        inspector.on_input(&mut surface, "install");
        assert_eq!(surface.lines.last().unwrap(), "No package loaded. Load a .deb first.");
    }

    #[test]
    fn test_install_virtual_mode() {
        let mut inspector = DebInspector::new(None);
        let mut surface = inspector.render();
        inspector.on_input(&mut surface, "load hello.deb");
        inspector.on_input(&mut surface, "install");
        assert_eq!(
            surface.lines.last().unwrap(),
            "[DEB EMU] Installation complete (virtual only)."
        );
    }

    #[test]
    fn test_install_writes_readme_into_storage() {
        let storage = MemoryStorage::mount_zenux();
        let mut inspector = DebInspector::new(Some(storage.clone()));
        let mut surface = inspector.render();

        inspector.on_input(&mut surface, "load hello.deb");
        assert_eq!(inspector.package().map(|p| p.name.as_str()), Some("hello"));
        inspector.on_input(&mut surface, "install");

        let readme = storage
            .borrow()
            .read_file("apps/deb-installs/hello/README.emu.txt")
            .map(str::to_string);
        assert!(readme.unwrap().starts_with("This is a virtual installation of hello"));
    }

    #[test]
    fn test_loading_non_deb_resets() {
        let mut inspector = DebInspector::new(None);
        let mut surface = inspector.render();
        inspector.on_input(&mut surface, "load hello.deb");
        inspector.on_input(&mut surface, "load notes.txt");
        assert!(inspector.package().is_none());
        assert_eq!(surface.lines.last().unwrap(), "No .deb loaded.");
    }
}
