/// Window opening: the collaborator a composed document is handed to.
///
/// [`WindowRegistry`] is the headless host shipped with the engine: it keeps
/// the open windows by name. Opening a name that is already open replaces
/// the window's source.

use std::collections::HashMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info};

/// Request to open (or re-target) a named window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub name: String,
    pub src: String,
}

/// Handle to an opened window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

pub trait WindowOpener: Send {
    fn open(&mut self, request: WindowRequest) -> Result<WindowId>;
}

/// A window known to a [`WindowRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindow {
    id: WindowId,
    src: String,
    /// Times the window was (re)opened
    loads: u32,
}

impl OpenWindow {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn loads(&self) -> u32 {
        self.loads
    }
}

/// Headless window host, keyed by window name
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<String, OpenWindow>,
    next_id: u64,
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an open window by name
    pub fn window(&self, name: &str) -> Option<&OpenWindow> {
        self.windows.get(name)
    }

    /// Close a window by name
    ///
    /// Returns the closed window, or None if not found.
    pub fn close_window(&mut self, name: &str) -> Option<OpenWindow> {
        let closed = self.windows.remove(name);
        if closed.is_some() {
            engine_debug!("glaxier::WindowRegistry", "Closed window '{}'", name);
        }
        closed
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Names of all open windows, sorted
    pub fn window_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.windows.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Close every window
    pub fn clear(&mut self) {
        self.windows.clear();
    }
}

impl WindowOpener for WindowRegistry {
    fn open(&mut self, request: WindowRequest) -> Result<WindowId> {
        if request.name.is_empty() {
            engine_bail!("glaxier::WindowRegistry", WindowOpenFailed: "window name is empty");
        }
        if request.src.is_empty() {
            engine_bail!("glaxier::WindowRegistry", WindowOpenFailed:
                "window '{}' has no source", request.name);
        }

        if let Some(window) = self.windows.get_mut(&request.name) {
            window.src = request.src;
            window.loads += 1;
            engine_debug!("glaxier::WindowRegistry", "Reloaded window '{}' from {}", request.name, window.src);
            return Ok(window.id);
        }

        let id = WindowId(self.next_id);
        self.next_id += 1;
        engine_info!("glaxier::WindowRegistry", "Opened window '{}' from {}", request.name, request.src);
        self.windows.insert(request.name, OpenWindow { id, src: request.src, loads: 1 });
        Ok(id)
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
