use std::ops::Range;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use clipboard::{ClipboardContext, ClipboardProvider};
use log::{debug, warn};

use crate::{ClipboardError, KeysmithError};

/// Write-only access to a platform clipboard.
pub trait ClipboardBackend {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. A fresh context is opened for every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn context() -> Result<ClipboardContext, ClipboardError> {
        <ClipboardContext as ClipboardProvider>::new().map_err(|e| ClipboardError::Init(e.to_string()))
    }

    /// Writes `text`, then clears it after `secs` seconds on a background
    /// thread unless something else was copied in the meantime.
    ///
    /// On X11 the selection is served from inside this process, so a
    /// short-lived caller must [`wait_for_clear`] before exiting or the
    /// contents vanish with it.
    pub fn copy_with_timeout(&mut self, text: &str, secs: u64) -> Result<ClearHandle, ClipboardError> {
        self.write_text(text)?;

        let text = text.to_string();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            let cleared = clear_if_unchanged::<ClipboardContext>(&text)?;
            if cleared {
                debug!("Cleared clipboard after {}s", secs);
            }
            Ok(())
        });

        Ok(handle)
    }
}

pub type ClearHandle = JoinHandle<Result<(), ClipboardError>>;

/// Empties the clipboard if it still holds `text`. Returns whether it did.
pub fn clear_if_unchanged<C: ClipboardProvider>(text: &str) -> Result<bool, ClipboardError> {
    let mut ctx = C::new().map_err(|e| {
        warn!("Failed to open clipboard for clearing: {}", e);
        ClipboardError::Init(e.to_string())
    })?;
    let current = ctx.get_contents().map_err(|e| {
        warn!("Failed to read clipboard before clearing: {}", e);
        ClipboardError::Read(e.to_string())
    })?;
    if current != text {
        debug!("Clipboard changed since copy, leaving it alone");
        return Ok(false);
    }
    ctx.set_contents(String::new()).map_err(|e| {
        warn!("Failed to clear clipboard: {}", e);
        ClipboardError::Write(e.to_string())
    })?;
    Ok(true)
}

/// Blocks until the clearing thread finishes and reports its outcome.
pub fn wait_for_clear(handle: ClearHandle) -> Result<(), ClipboardError> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => {
            warn!("Clipboard clearing thread panicked");
            Err(ClipboardError::Write("clearing thread panicked".to_string()))
        }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx = Self::context()?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// In-process clipboard for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// A clipboard that refuses every write, like a browser outside a secure context.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedClipboard;

impl ClipboardBackend for DeniedClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Denied)
    }
}

/// Read-only text field showing the current password.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisplayField {
    value: String,
    selection: Option<Range<usize>>,
}

impl DisplayField {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replacing the value drops any selection.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn select_all(&mut self) {
        self.selection = Some(0..self.value.chars().count());
    }

    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.clone()?;
        Some(self.value.chars().skip(range.start).take(range.len()).collect())
    }
}

pub struct ClipboardExporter<B: ClipboardBackend> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardExporter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One attempt, no retries.
    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<(), KeysmithError> {
        match self.backend.write_text(text) {
            Ok(()) => {
                debug!("Copied {} characters to clipboard", text.chars().count());
                Ok(())
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                Err(KeysmithError::ClipboardUnavailable(e))
            }
        }
    }

    pub fn copy_field(&mut self, field: &mut DisplayField) -> Result<(), KeysmithError> {
        field.select_all();
        let text = field.value().to_string();
        self.copy_to_clipboard(&text)
    }
}
