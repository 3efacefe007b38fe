// Host-provided storage: an in-memory directory tree shared with application modules

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// Directories created when the Zenux root is mounted
pub const ZENUX_LAYOUT: [&str; 6] = ["system", "apps", "user", "logs", "Downloads", "config"];

/// Shared handle given to apps; absent in virtual mode
pub type StorageHandle = Rc<RefCell<MemoryStorage>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File(String),
}

/// Directory tree kept in memory. Paths are `/`-separated and relative to the root.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    root: Node,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            root: Node::Dir(BTreeMap::new()),
        }
    }

    /// Fresh storage with the Zenux directory layout
    pub fn mount_zenux() -> StorageHandle {
        let mut storage = Self::new();
        for dir in ZENUX_LAYOUT {
            // Root is a directory, so these cannot collide with files
            let _ = storage.ensure_dir(dir);
        }
        Rc::new(RefCell::new(storage))
    }

    /// Create a directory and its parents. Fails if a file is in the way.
    pub fn ensure_dir(&mut self, path: &str) -> Result<(), ShellError> {
        let mut node = &mut self.root;
        for part in split(path) {
            node = match node {
                Node::Dir(children) => children
                    .entry(part.to_string())
                    .or_insert_with(|| Node::Dir(BTreeMap::new())),
                Node::File(_) => {
                    return Err(ShellError::Storage(format!("'{}' is not a directory", path)))
                }
            };
        }
        match node {
            Node::Dir(_) => Ok(()),
            Node::File(_) => Err(ShellError::Storage(format!("'{}' is a file", path))),
        }
    }

    /// Create or overwrite a file; parent directories are created
    pub fn write_file(&mut self, path: &str, contents: &str) -> Result<(), ShellError> {
        let parts = split(path);
        let Some((name, parents)) = parts.split_last() else {
            return Err(ShellError::Storage("empty file path".to_string()));
        };
        self.ensure_dir(&parents.join("/"))?;

        let not_dir = || ShellError::Storage(format!("'{}' is not a directory", parents.join("/")));
        let Node::Dir(children) = self.node_mut(parents).ok_or_else(not_dir)? else {
            return Err(not_dir());
        };
        if let Some(Node::Dir(_)) = children.get(*name) {
            return Err(ShellError::Storage(format!("'{}' is a directory", path)));
        }
        children.insert(name.to_string(), Node::File(contents.to_string()));
        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Option<&str> {
        match self.node(&split(path))? {
            Node::File(contents) => Some(contents),
            Node::Dir(_) => None,
        }
    }

    /// Directory listing, directories first then files, each by name
    pub fn entries(&self, path: &str) -> Option<Vec<DirEntry>> {
        let Node::Dir(children) = self.node(&split(path))? else {
            return None;
        };
        let mut out: Vec<DirEntry> = children
            .iter()
            .map(|(name, node)| DirEntry {
                name: name.clone(),
                kind: match node {
                    Node::Dir(_) => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                },
            })
            .collect();
        out.sort_by(|a, b| {
            let rank = |k: EntryKind| matches!(k, EntryKind::File) as u8;
            rank(a.kind).cmp(&rank(b.kind)).then_with(|| a.name.cmp(&b.name))
        });
        Some(out)
    }

    fn node(&self, parts: &[&str]) -> Option<&Node> {
        let mut node = &self.root;
        for part in parts {
            node = match node {
                Node::Dir(children) => children.get(*part)?,
                Node::File(_) => return None,
            };
        }
        Some(node)
    }

    fn node_mut(&mut self, parts: &[&str]) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for part in parts {
            node = match node {
                Node::Dir(children) => children.get_mut(*part)?,
                Node::File(_) => return None,
            };
        }
        Some(node)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_creates_layout() {
        let storage = MemoryStorage::mount_zenux();
        let names: Vec<String> = storage
            .borrow()
            .entries("")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Downloads", "apps", "config", "logs", "system", "user"]);
    }

    #[test]
    fn test_write_and_read_nested_file() {
        let mut storage = MemoryStorage::new();
        storage
            .write_file("apps/deb-installs/hello/README.emu.txt", "virtual")
            .unwrap();

        assert_eq!(storage.read_file("apps/deb-installs/hello/README.emu.txt"), Some("virtual"));
        assert_eq!(
            storage.entries("apps/deb-installs").unwrap(),
            vec![DirEntry {
                name: "hello".to_string(),
                kind: EntryKind::Directory
            }]
        );
    }

    #[test]
    fn test_directories_listed_before_files() {
        let mut storage = MemoryStorage::new();
        storage.write_file("a.txt", "").unwrap();
        storage.ensure_dir("zeta").unwrap();

        let kinds: Vec<EntryKind> = storage.entries("/").unwrap().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntryKind::Directory, EntryKind::File]);
    }

    #[test]
    fn test_file_in_the_way() {
        let mut storage = MemoryStorage::new();
        storage.write_file("notes", "x").unwrap();
        assert!(matches!(storage.ensure_dir("notes/inner"), Err(ShellError::Storage(_))));
        assert!(storage.write_file("notes/inner.txt", "y").is_err());
        assert!(storage.entries("notes").is_none());
    }

    #[test]
    fn test_storage_errors_name_the_path() {
        let mut storage = MemoryStorage::new();
        storage.ensure_dir("apps").unwrap();
        let err = storage.write_file("apps", "x").unwrap_err();
        assert!(matches!(err, ShellError::Storage(_)));
        assert_eq!(err.to_string(), "storage error: 'apps' is a directory");
        assert!(matches!(storage.write_file("/", "x"), Err(ShellError::Storage(_))));
    }
}
