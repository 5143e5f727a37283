//! Panel transcripts as JSON Lines.
//!
//! One line per [`ConversationEvent`]: the event payload plus `type`, `seq`
//! and an RFC3339 `timestamp`. Files are opened in append mode so repeated
//! runs can share one transcript.

use chrono::{SecondsFormat, Utc};
use panel_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    seq: AtomicU64,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Writing panel transcript to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            seq: AtomicU64::new(0),
        })
    }

    /// Start a new timestamped transcript inside `dir`.
    ///
    /// Returns `None` (after a warning) when the file cannot be created; a
    /// missing transcript never stops a panel run.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = format!("panel-{}.jsonl", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = dir.as_ref().join(name);
        match Self::open(&path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                warn!("Could not create transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "seq".to_string(),
            Value::from(self.seq.fetch_add(1, Ordering::Relaxed)),
        );
        map.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
