//! Clipboard integration for the copy-fragment affordance.

use anyhow::{Context, Result};

/// System clipboard handle. Initialization can fail in headless
/// environments; the UI reports that as a status message instead of
/// crashing.
pub struct Clipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self {
            inner: arboard::Clipboard::new().ok(),
        }
    }

    /// Copy text to the system clipboard.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .inner
            .as_mut()
            .context("system clipboard unavailable")?;
        clipboard
            .set_text(text.to_owned())
            .context("failed to write to clipboard")
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
