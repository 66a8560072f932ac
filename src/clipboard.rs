use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

use crate::platform::ClipboardWriter;

/// Writes to the desktop clipboard through arboard.
///
/// A fresh handle is opened per write. On Linux the contents stay
/// available only while this process is running.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to copy text to clipboard")?;
        debug!(chars = text.chars().count(), "Clipboard updated");
        Ok(())
    }
}
