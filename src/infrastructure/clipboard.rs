use arboard::Clipboard;

/// Places report text on the system clipboard.
pub struct ClipboardSink;

impl ClipboardSink {
    pub fn copy_text(text: &str) -> Result<(), String> {
        let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
        clipboard.set_text(text.to_string()).map_err(|e| e.to_string())?;
        tracing::debug!(len = text.len(), "Copied report to clipboard");
        Ok(())
    }
}
