use arboard::Clipboard;
use client_core::{ClipboardError, ClipboardSink};

/// System clipboard. The handle is kept open because on X11 the copied text only
/// lives as long as the owning `Clipboard`.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.handle.is_none() {
            self.handle = Some(Clipboard::new().map_err(|err| ClipboardError(err.to_string()))?);
        }
        let result = match self.handle.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()),
            None => return Err(ClipboardError("clipboard handle unavailable".to_string())),
        };
        if let Err(err) = result {
            // Reopen on the next attempt.
            self.handle = None;
            return Err(ClipboardError(err.to_string()));
        }
        Ok(())
    }
}
