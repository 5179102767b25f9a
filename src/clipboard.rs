//! Clipboard functionality for copying calculation results.

use anyhow::{Context, Result};

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
///
/// Opened lazily on first copy, so headless sessions that never copy do not
/// need a display server.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("Failed to access clipboard")?);
        }
        let clipboard = self.inner.as_mut().context("Failed to access clipboard")?;

        clipboard
            .set_text(text.to_string())
            .context("Failed to copy to clipboard")
    }
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    SystemClipboard::new().set_text(text)
}

/// In-memory clipboard, used where no desktop clipboard is wanted.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
