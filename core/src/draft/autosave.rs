//! Debounced draft writer.
//!
//! A background task owns the draft file. Each edit replaces the pending
//! snapshot and restarts the debounce timer, so a burst of keystrokes
//! produces one write and two writes can never race. Closing the flow
//! cancels any pending write; flushing forces one.

use std::io::Error as IoError;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use reframe_protocol::DiaryEntry;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::debug;
use tracing::warn;

use super::DraftFile;
use super::DraftStore;
use super::FileDraftStore;

enum AutosaveCmd {
    Update(DiaryEntry),
    Flush { ack: oneshot::Sender<Option<DateTime<Utc>>> },
    Shutdown { ack: oneshot::Sender<()> },
}

#[derive(Clone, Debug)]
pub struct DraftAutosave {
    tx: Sender<AutosaveCmd>,
    saved_rx: watch::Receiver<Option<DateTime<Utc>>>,
}

impl DraftAutosave {
    pub fn spawn(store: FileDraftStore, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<AutosaveCmd>(64);
        let (saved_tx, saved_rx) = watch::channel(None);
        tokio::task::spawn(autosave_writer(store, rx, debounce, saved_tx));
        Self { tx, saved_rx }
    }

    /// Replace the pending snapshot and restart the debounce timer.
    pub async fn update(&self, entry: DiaryEntry) -> std::io::Result<()> {
        self.tx
            .send(AutosaveCmd::Update(entry))
            .await
            .map_err(|e| IoError::other(format!("failed to queue draft snapshot: {e}")))
    }

    /// Write any pending snapshot immediately. Returns the stamp of the
    /// write, or `None` when nothing was pending.
    pub async fn flush(&self) -> std::io::Result<Option<DateTime<Utc>>> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(AutosaveCmd::Flush { ack: ack_tx })
            .await
            .map_err(|e| IoError::other(format!("failed to request draft flush: {e}")))?;
        ack_rx
            .await
            .map_err(|e| IoError::other(format!("failed waiting for draft flush: {e}")))
    }

    /// Stop the writer, discarding any pending snapshot. Closing the flow
    /// abandons the draft at its last debounced write.
    pub async fn shutdown(&self) -> std::io::Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        match self.tx.send(AutosaveCmd::Shutdown { ack: ack_tx }).await {
            Ok(()) => ack_rx
                .await
                .map_err(|e| IoError::other(format!("failed waiting for autosave shutdown: {e}"))),
            Err(e) => {
                warn!("failed to send autosave shutdown command: {e}");
                Err(IoError::other(format!(
                    "failed to send autosave shutdown command: {e}"
                )))
            }
        }
    }

    /// Stamp of the most recent successful write by this session's writer.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        *self.saved_rx.borrow()
    }
}

async fn autosave_writer(
    store: FileDraftStore,
    mut rx: mpsc::Receiver<AutosaveCmd>,
    debounce: Duration,
    saved_tx: watch::Sender<Option<DateTime<Utc>>>,
) {
    let mut pending: Option<DiaryEntry> = None;
    loop {
        let cmd = if pending.is_some() {
            tokio::select! {
                cmd = rx.recv() => cmd,
                // A fresh sleep is armed on every loop turn, so a new
                // Update above effectively restarts the timer.
                _ = tokio::time::sleep(debounce) => {
                    write_pending(&store, &mut pending, &saved_tx);
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match cmd {
            Some(AutosaveCmd::Update(entry)) => pending = Some(entry),
            Some(AutosaveCmd::Flush { ack }) => {
                let stamp = write_pending(&store, &mut pending, &saved_tx);
                let _ = ack.send(stamp);
            }
            Some(AutosaveCmd::Shutdown { ack }) => {
                if pending.take().is_some() {
                    debug!("discarding pending draft snapshot on shutdown");
                }
                let _ = ack.send(());
                break;
            }
            None => break,
        }
    }
}

fn write_pending(
    store: &FileDraftStore,
    pending: &mut Option<DiaryEntry>,
    saved_tx: &watch::Sender<Option<DateTime<Utc>>>,
) -> Option<DateTime<Utc>> {
    let entry = pending.take()?;
    let draft = DraftFile { last_modified: Utc::now(), entry };
    match store.save(&draft) {
        Ok(()) => {
            let _ = saved_tx.send(Some(draft.last_modified));
            Some(draft.last_modified)
        }
        Err(err) => {
            // Losing a draft write is degraded-but-functional; the form
            // state itself is untouched.
            warn!("draft autosave failed: {err}");
            None
        }
    }
}
