// src/clipboard/mod.rs
use crate::utils::error::ClipboardError;

/// Write-only access to a clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The host clipboard, via `arboard`.
///
/// A platform handle is opened for each copy and dropped before returning.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    /// Linux only: block until another program replaces the selection, so the
    /// text outlives this process without a clipboard manager.
    hold: bool,
}

impl SystemClipboard {
    pub fn new(hold: bool) -> Self {
        Self { hold }
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;

        #[cfg(target_os = "linux")]
        if self.hold {
            use arboard::SetExtLinux;
            tracing::info!("Holding clipboard selection until something else is copied...");
            clipboard.set().wait().text(text.to_owned())?;
            return Ok(());
        }

        #[cfg(not(target_os = "linux"))]
        if self.hold {
            tracing::debug!("--hold-clipboard has no effect on this platform");
        }

        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

/// Keeps the copied text in memory. Used when the system clipboard is
/// switched off and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
