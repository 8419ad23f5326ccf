// License: MIT

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt, Window};
use x11rb::rust_connection::RustConnection;

use crate::core::probe::{FocusProbe, ProbeError};

/// Focus probe backed by the EWMH `_NET_ACTIVE_WINDOW` hint.
///
/// The application identifier is the `WM_CLASS` instance name; for
/// configured browsers the window title (which X11 browsers keep in sync
/// with the active tab) refines it.
pub struct X11Probe {
    conn: RustConnection,
    root: Window,
    browsers: Vec<String>,
}

impl X11Probe {
    pub fn new(browsers: Vec<String>) -> Result<Self, ProbeError> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|e| ProbeError::Query(format!("failed to connect to X server: {e}")))?;
        let root = conn.setup().roots[screen_num].root;

        Ok(Self {
            conn,
            root,
            browsers,
        })
    }

    fn atom(&self, name: &str) -> Result<u32, ProbeError> {
        self.conn
            .intern_atom(false, name.as_bytes())
            .map_err(|e| ProbeError::Query(format!("intern_atom: {e}")))?
            .reply()
            .map_err(|e| ProbeError::Query(format!("intern_atom reply: {e}")))
            .map(|r| r.atom)
    }

    fn window_property(&self, window: Window, atom: u32) -> Option<String> {
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::ANY, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.is_empty() {
            return None;
        }

        String::from_utf8(reply.value).ok()
    }

    fn active_window_id(&self) -> Result<Window, ProbeError> {
        let atom = self.atom("_NET_ACTIVE_WINDOW")?;
        let reply = self
            .conn
            .get_property(false, self.root, atom, AtomEnum::WINDOW, 0, 1)
            .map_err(|e| ProbeError::Query(format!("get_property: {e}")))?
            .reply()
            .map_err(|e| ProbeError::Query(format!("get_property reply: {e}")))?;

        if reply.value.len() >= 4 {
            let id = u32::from_ne_bytes([
                reply.value[0],
                reply.value[1],
                reply.value[2],
                reply.value[3],
            ]);
            if id != 0 {
                return Ok(id);
            }
        }

        Err(ProbeError::Query("no active window".to_string()))
    }

    fn window_title(&self, window: Window) -> Option<String> {
        let atom = self.atom("_NET_WM_NAME").ok()?;
        self.window_property(window, atom)
            .or_else(|| self.window_property(window, AtomEnum::WM_NAME.into()))
    }

    fn is_browser(&self, app: &str) -> bool {
        self.browsers.iter().any(|b| b.eq_ignore_ascii_case(app))
    }
}

impl FocusProbe for X11Probe {
    fn probe(&self) -> Result<String, ProbeError> {
        let window = self.active_window_id()?;

        let app = self
            .window_property(window, AtomEnum::WM_CLASS.into())
            .and_then(|s| s.split('\0').next().map(str::to_string))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProbeError::Query("active window has no WM_CLASS".to_string()))?;

        // Tab-title refinement; failure falls back to the bare identifier.
        if self.is_browser(&app) {
            if let Some(title) = self.window_title(window).filter(|t| !t.is_empty()) {
                return Ok(title);
            }
        }

        Ok(app)
    }
}
