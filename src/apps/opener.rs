// Hands URLs to the host desktop's default browser

use std::io;

use tracing::{info, warn};

use crate::desktop::content::Surface;

/// Launches a URL outside the shell
pub type Opener = Box<dyn Fn(&str) -> io::Result<()>>;

/// The platform handler (`xdg-open`, `open`, `start`), detached from the shell
pub fn system_opener() -> Opener {
    Box::new(|url: &str| open::that_detached(url))
}

/// Open `url` externally and report the outcome on `surface`.
///
/// Failures are logged and shown; they never close the window.
pub fn open_external(opener: &Opener, surface: &mut Surface, url: &str) -> bool {
    match opener(url) {
        Ok(()) => {
            info!("[OPENER] handed {} to the system browser", url);
            surface.println(format!("Opened {} in the system browser.", url));
            true
        }
        Err(e) => {
            warn!("[OPENER] could not open {}: {}", url, e);
            surface.println(format!("Could not open {}: {}", url, e));
            false
        }
    }
}
