// License: MIT

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;

use std::sync::Arc;

use crate::core::probe::{FocusProbe, ProbeError};

/// Browser identifiers whose window/tab title refines the logged
/// application name. `WM_CLASS` values on X11, application names on macOS.
pub fn default_browsers() -> Vec<String> {
    #[cfg(target_os = "macos")]
    let names = ["Google Chrome", "Safari", "Firefox"];

    #[cfg(not(target_os = "macos"))]
    let names = ["firefox", "Navigator", "chromium", "google-chrome"];

    names.iter().map(|s| s.to_string()).collect()
}

/// Builds the platform probe. Failure here is not fatal to the daemon; the
/// caller substitutes an [`UnavailableProbe`] so tracking still runs with
/// visible placeholder rows.
pub fn create(browsers: Vec<String>) -> Result<Arc<dyn FocusProbe>, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::X11Probe::new(browsers)?))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::MacProbe::new(browsers)))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let _ = browsers;
        Err(ProbeError::Unsupported)
    }
}

/// Stands in when no platform probe could be constructed. Every sample
/// fails, so the exported log shows placeholder rows instead of the daemon
/// refusing to run.
pub struct UnavailableProbe {
    reason: String,
}

impl UnavailableProbe {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl FocusProbe for UnavailableProbe {
    fn probe(&self) -> Result<String, ProbeError> {
        Err(ProbeError::Query(self.reason.clone()))
    }
}
