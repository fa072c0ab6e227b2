//! JSONL file writer for intervention events.
//!
//! Each [`InterventionEvent`] is serialized as a single JSON line with a
//! `type` field and a `logged_at` timestamp, appended via a buffered writer.

use icgl_application::InterventionLog;
use icgl_domain::InterventionEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL intervention log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event so
/// the audit trail survives a crash; write failures are logged and dropped
/// rather than failing the sign-off path.
pub struct JsonlInterventionLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInterventionLog {
    /// Create a new log appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create intervention log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open intervention log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InterventionLog for JsonlInterventionLog {
    fn record(&self, event: &InterventionEvent) {
        let line = serde_json::json!({
            "type": "intervention",
            "logged_at": chrono::Utc::now().to_rfc3339(),
            "event": event,
        });

        let mut writer = match self.writer.lock() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write intervention event: {}", e);
            return;
        }
        if let Err(e) = writer.flush() {
            warn!("Failed to flush intervention log: {}", e);
        }
    }
}

impl Drop for JsonlInterventionLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
