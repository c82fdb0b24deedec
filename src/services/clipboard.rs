//! Clipboard access for the copy button.

use crate::types::errors::ClipboardError;

/// Trait defining clipboard writes.
pub trait ClipboardTrait {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, via `arboard`.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    /// Opens lazily: a headless session without a display still starts.
    pub fn new() -> Self {
        Self { inner: None }
    }
}

#[cfg(feature = "clipboard")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardTrait for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
            None => Err(ClipboardError::Unavailable("clipboard not initialized".to_string())),
        }
    }
}

/// Stand-in used when no clipboard is compiled in or reachable.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardTrait for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard support in this build".to_string(),
        ))
    }
}

/// The best clipboard this build offers.
pub fn default_clipboard() -> Box<dyn ClipboardTrait> {
    #[cfg(feature = "clipboard")]
    {
        Box::new(SystemClipboard::new())
    }
    #[cfg(not(feature = "clipboard"))]
    {
        Box::new(NoClipboard)
    }
}
