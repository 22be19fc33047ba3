//! JSON-lines outbox for contact messages
//!
//! Each accepted message is appended as one JSON object per line, tagged
//! with a reference the form shows back to the sender. A separate process
//! can drain the file and do the actual delivery.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use folio_core::{ContactError, ContactMessage, ContactSink, Delivery};
use serde::Serialize;

#[derive(Serialize)]
struct OutboxRecord<'a> {
    reference: &'a str,
    received_at: u64,
    #[serde(flatten)]
    message: &'a ContactMessage,
}

/// Appends messages to a JSON-lines file
#[derive(Debug)]
pub struct OutboxSink {
    path: PathBuf,
    sequence: AtomicU32,
}

impl OutboxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sequence: AtomicU32::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_reference(&self, received_at: u64) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("msg-{received_at}-{seq}")
    }
}

impl ContactSink for OutboxSink {
    fn submit(&self, message: &ContactMessage) -> Result<Delivery, ContactError> {
        let received_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let reference = self.next_reference(received_at);

        let record = OutboxRecord {
            reference: &reference,
            received_at,
            message,
        };
        let mut line =
            serde_json::to_string(&record).map_err(|e| ContactError::Sink(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ContactError::Sink(format!("{}: {e}", self.path.display())))?;
        file.write_all(line.as_bytes())
            .map_err(|e| ContactError::Sink(format!("{}: {e}", self.path.display())))?;

        tracing::info!(%reference, path = %self.path.display(), "contact message queued");
        Ok(Delivery::Queued { reference })
    }
}
