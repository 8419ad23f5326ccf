// License: MIT

use std::process::Command;

use objc2_app_kit::NSWorkspace;

use crate::core::probe::{FocusProbe, ProbeError};

/// Focus probe backed by `NSWorkspace.frontmostApplication`.
///
/// For configured browsers the active tab title, fetched through an
/// AppleScript one-liner, refines the identifier. Script failure (browser
/// busy, automation permission denied) falls back to the bare application
/// name.
pub struct MacProbe {
    browsers: Vec<String>,
}

impl MacProbe {
    pub fn new(browsers: Vec<String>) -> Self {
        Self { browsers }
    }

    fn is_browser(&self, app: &str) -> bool {
        self.browsers.iter().any(|b| b.eq_ignore_ascii_case(app))
    }
}

impl FocusProbe for MacProbe {
    fn probe(&self) -> Result<String, ProbeError> {
        let app = frontmost_application_name()?;

        if self.is_browser(&app) {
            if let Some(title) = active_tab_title(&app) {
                return Ok(title);
            }
        }

        Ok(app)
    }
}

fn frontmost_application_name() -> Result<String, ProbeError> {
    let workspace = unsafe { NSWorkspace::sharedWorkspace() };

    let app = unsafe { workspace.frontmostApplication() }
        .ok_or_else(|| ProbeError::Query("no frontmost application".to_string()))?;

    let name = unsafe { app.localizedName() }
        .ok_or_else(|| ProbeError::Query("frontmost application has no name".to_string()))?;

    Ok(name.to_string())
}

fn active_tab_title(browser: &str) -> Option<String> {
    // Safari names things differently from the Chromium family.
    let script = if browser.eq_ignore_ascii_case("Safari") {
        format!(r#"tell application "{browser}" to get name of current tab of front window"#)
    } else {
        format!(r#"tell application "{browser}" to get title of active tab of front window"#)
    };

    let out = Command::new("osascript").arg("-e").arg(&script).output().ok()?;

    if !out.status.success() {
        return None;
    }

    let title = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if title.is_empty() { None } else { Some(title) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires a desktop session
    fn probes_frontmost_application() {
        let probe = MacProbe::new(Vec::new());
        let app = probe.probe().unwrap();
        assert!(!app.is_empty());
    }
}
