//! File-backed activity log.
//!
//! Events go through an unbounded channel to a single writer task that owns
//! the file. `record` never waits on disk. On shutdown the writer drains
//! what is queued, flushes and exits.

use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::activity::{ActivityEvent, ActivityRecorder};
use crate::observability::metrics;

/// Appends activity events to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    tx: mpsc::UnboundedSender<ActivityEvent>,
}

impl ActivityLog {
    /// Open (or create) the log file and start the writer task.
    pub async fn open(
        path: impl AsRef<Path>,
        shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<(Self, JoinHandle<()>)> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        tracing::info!(path = %path.display(), "Activity log opened");

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(rx, file, shutdown));
        Ok((Self { tx }, writer))
    }
}

impl ActivityRecorder for ActivityLog {
    fn record(&self, event: &str, attributes: &[(&str, String)]) {
        if self.tx.send(ActivityEvent::new(event, attributes)).is_err() {
            tracing::debug!(event, "Activity writer stopped, event dropped");
            return;
        }
        metrics::record_activity(event, "file");
    }
}

async fn run_writer(
    mut rx: mpsc::UnboundedReceiver<ActivityEvent>,
    mut file: File,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Some(event) => write_event(&mut file, &event).await,
                None => break,
            },
            _ = shutdown.recv() => {
                rx.close();
                while let Some(event) = rx.recv().await {
                    write_event(&mut file, &event).await;
                }
                break;
            }
        }
    }

    if let Err(e) = file.flush().await {
        tracing::error!(error = %e, "Failed to flush activity log");
    }
    tracing::info!("Activity writer stopped");
}

async fn write_event(file: &mut File, event: &ActivityEvent) {
    let mut line = match serde_json::to_vec(event) {
        Ok(line) => line,
        Err(e) => {
            tracing::error!(event = %event.event, error = %e, "Failed to encode activity event");
            return;
        }
    };
    line.push(b'\n');

    if let Err(e) = file.write_all(&line).await {
        tracing::error!(event = %event.event, error = %e, "Failed to write activity event");
    }
}
