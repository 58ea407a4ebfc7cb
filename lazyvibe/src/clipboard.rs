//! System clipboard access.

use anyhow::{Context, Result};

/// Somewhere copied text goes.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard via `arboard`.
///
/// The handle is opened on first copy and kept for the life of the app: on
/// X11 and Wayland the owner of the selection must stay alive to serve it.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Failed to open clipboard")?,
        };
        // A handle that failed to write is dropped and reopened next time
        clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard")?;
        self.handle = Some(clipboard);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_opened_lazily() {
        let clipboard = SystemClipboard::new();
        assert!(clipboard.handle.is_none());
    }
}
