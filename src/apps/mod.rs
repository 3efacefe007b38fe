// Application catalog: the content providers the desktop can launch

pub mod browser;
pub mod deb_inspector;
pub mod explorer;
pub mod info;
pub mod opener;
pub mod terminal;

use serde::{Deserialize, Serialize};

use crate::desktop::content::AppContent;
use crate::desktop::DesktopSession;
use crate::state::window::WindowId;
use crate::storage::StorageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppId {
    Explorer,
    Browser,
    Terminal,
    DebInspector,
    Eaglercraft,
    About,
    SystemMessage,
}

impl AppId {
    /// Apps offered on the desktop and in the start menu
    pub const LAUNCHABLE: [AppId; 6] = [
        AppId::Explorer,
        AppId::Browser,
        AppId::Terminal,
        AppId::DebInspector,
        AppId::Eaglercraft,
        AppId::About,
    ];

    /// Parse from a launcher tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "explorer" => Some(AppId::Explorer),
            "browser" => Some(AppId::Browser),
            "terminal" => Some(AppId::Terminal),
            "debinspector" => Some(AppId::DebInspector),
            "eaglercraft" => Some(AppId::Eaglercraft),
            "about" => Some(AppId::About),
            "sysmsg" => Some(AppId::SystemMessage),
            _ => None,
        }
    }

    /// Application id stored on windows
    pub fn tag(&self) -> &'static str {
        match self {
            AppId::Explorer => "explorer",
            AppId::Browser => "browser",
            AppId::Terminal => "terminal",
            AppId::DebInspector => "debinspector",
            AppId::Eaglercraft => "eaglercraft",
            AppId::About => "about",
            AppId::SystemMessage => "sysmsg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppId::Explorer => "Zenux Explorer",
            AppId::Browser => "Safari",
            AppId::Terminal => "Zenux Terminal",
            AppId::DebInspector => "DEB Inspector",
            AppId::Eaglercraft => "Eaglercraft",
            AppId::About => "About zenuxOS",
            AppId::SystemMessage => "ZenuxOS Info",
        }
    }

    /// Build fresh content for a new window of this app
    pub fn build(&self, storage: Option<StorageHandle>) -> Box<dyn AppContent> {
        match self {
            AppId::Explorer => Box::new(explorer::Explorer::new(storage)),
            AppId::Browser => Box::new(browser::Browser::new()),
            AppId::Terminal => Box::new(terminal::Terminal::new(storage)),
            AppId::DebInspector => Box::new(deb_inspector::DebInspector::new(storage)),
            AppId::Eaglercraft => Box::new(info::eaglercraft()),
            AppId::About => Box::new(info::about()),
            AppId::SystemMessage => Box::new(info::system_message()),
        }
    }
}

/// Open the app's window, or focus it if it is already open
pub fn launch(session: &mut DesktopSession, app: AppId, storage: Option<&StorageHandle>) -> WindowId {
    let storage = storage.cloned();
    session.open_or_focus(app.tag(), app.title(), move || app.build(storage))
}

/// Launch by tag; unknown tags open nothing
pub fn launch_by_tag(
    session: &mut DesktopSession,
    tag: &str,
    storage: Option<&StorageHandle>,
) -> Option<WindowId> {
    AppId::from_tag(tag).map(|app| launch(session, app, storage))
}
