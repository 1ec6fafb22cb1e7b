// src/clipboard.rs
use std::io;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::watch;

/// How long the "copied" indicator stays up after a successful copy.
pub const COPIED_PULSE: Duration = Duration::from_millis(2000);

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Pipes the text into an external clipboard tool (`wl-copy`, `pbcopy`,
/// `xclip -selection clipboard`, ...).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl ClipboardWriter for CommandClipboard {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {}", self.program, status),
            ))
        }
    }
}

/// Fallback writer for when no clipboard tool is usable. Nothing is
/// written anywhere; the page shows the address for manual selection instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClipboard;

#[async_trait]
impl ClipboardWriter for ManualClipboard {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        debug!("Leaving {} on the page for manual copy", text);
        Ok(())
    }
}

/// How the last copy went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    Manual,
}

/// Signal that reads `Some(method)` for a short while after each copy.
#[derive(Debug, Clone)]
pub struct CopiedPulse {
    tx: Arc<watch::Sender<Option<CopyMethod>>>,
    generation: Arc<AtomicU64>,
    hold: Duration,
}

impl Default for CopiedPulse {
    fn default() -> Self {
        Self::new(COPIED_PULSE)
    }
}

impl CopiedPulse {
    pub fn new(hold: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            hold,
        }
    }

    pub fn copied(&self) -> Option<CopyMethod> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CopyMethod>> {
        self.tx.subscribe()
    }

    /// Raises the signal; it drops again `hold` after the most recent raise.
    pub fn raise(&self, method: CopyMethod) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(Some(method));

        let tx = self.tx.clone();
        let current = self.generation.clone();
        let hold = self.hold;
        tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            if current.load(Ordering::SeqCst) == generation {
                tx.send_replace(None);
            }
        });
    }
}

/// Copies `text` with `primary`, falling back to `fallback` when it fails or
/// there is none. The pulse is raised only if one of them succeeded.
pub async fn copy_with_fallback(
    primary: Option<&dyn ClipboardWriter>,
    fallback: &dyn ClipboardWriter,
    text: &str,
    pulse: &CopiedPulse,
) -> io::Result<CopyMethod> {
    let method = match primary {
        Some(primary) => match primary.write_text(text).await {
            Ok(()) => {
                debug!("Copied {} to clipboard", text);
                CopyMethod::Clipboard
            }
            Err(e) => {
                warn!("Clipboard write failed, using fallback: {}", e);
                fallback.write_text(text).await?;
                CopyMethod::Manual
            }
        },
        None => {
            fallback.write_text(text).await?;
            CopyMethod::Manual
        }
    };
    pulse.raise(method);
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tokio::time::sleep;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl ClipboardWriter for Recording {
        async fn write_text(&self, text: &str) -> io::Result<()> {
            self.0.lock().push(text.to_string());
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl ClipboardWriter for Failing {
        async fn write_text(&self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no clipboard"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn primary_success_raises_pulse() {
        let primary = Recording::default();
        let fallback = Recording::default();
        let pulse = CopiedPulse::default();

        let method = copy_with_fallback(Some(&primary), &fallback, "mc.example.net", &pulse).await.unwrap();

        assert_eq!(method, CopyMethod::Clipboard);
        assert_eq!(*primary.0.lock(), vec!["mc.example.net".to_string()]);
        assert!(fallback.0.lock().is_empty());
        assert_eq!(pulse.copied(), Some(CopyMethod::Clipboard));

        sleep(COPIED_PULSE + Duration::from_millis(1)).await;
        assert_eq!(pulse.copied(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_when_primary_fails() {
        let fallback = Recording::default();
        let pulse = CopiedPulse::default();

        let method = copy_with_fallback(Some(&Failing), &fallback, "mc.example.net", &pulse).await.unwrap();

        assert_eq!(method, CopyMethod::Manual);
        assert_eq!(*fallback.0.lock(), vec!["mc.example.net".to_string()]);
        assert_eq!(pulse.copied(), Some(CopyMethod::Manual));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_primary_goes_straight_to_fallback() {
        let pulse = CopiedPulse::default();
        let method = copy_with_fallback(None, &ManualClipboard, "mc.example.net", &pulse).await.unwrap();

        assert_eq!(method, CopyMethod::Manual);
        assert_eq!(pulse.copied(), Some(CopyMethod::Manual));
    }

    #[tokio::test(start_paused = true)]
    async fn both_failing_leaves_pulse_down() {
        let pulse = CopiedPulse::default();
        let result = copy_with_fallback(Some(&Failing), &Failing, "mc.example.net", &pulse).await;

        assert!(result.is_err());
        assert_eq!(pulse.copied(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_copy_extends_pulse() {
        let pulse = CopiedPulse::default();
        pulse.raise(CopyMethod::Clipboard);
        sleep(Duration::from_millis(1500)).await;
        pulse.raise(CopyMethod::Clipboard);

        sleep(Duration::from_millis(1000)).await;
        assert!(pulse.copied().is_some());

        sleep(Duration::from_millis(1100)).await;
        assert_eq!(pulse.copied(), None);
    }

    #[test]
    fn parses_clipboard_command_line() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_none());
    }
}
