//! Append-only audit recorder.
//!
//! Each completed request produces one [`AuditRecord`], written as one
//! self-contained JSON line. The file handle is opened lazily on the first
//! write and reused afterwards; appends are serialized on an async mutex
//! so concurrent requests never interleave partial lines.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use warden_types::{AuditRecord, ExecutionResult};

/// Maximum length of [`AuditRecord::output_summary`], in characters.
pub const OUTPUT_SUMMARY_MAX_CHARS: usize = 500;

/// Keys preferred for the output summary, in order.
const SUMMARY_KEYS: &[&str] = &["summary", "answer", "notes"];

/// Failure to append an audit record.
#[derive(Debug, Error)]
pub enum AuditWriteError {
    #[error("failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write audit log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Appends [`AuditRecord`]s to a JSON Lines file.
pub struct AuditRecorder {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl AuditRecorder {
    /// Create a recorder for `path`. Nothing is touched on disk until the
    /// first [`record`](Self::record).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Path to the audit log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSON line.
    ///
    /// A failed write drops the cached handle so the next call reopens
    /// the file. Opening terminates a partial trailing line first, so a
    /// torn write never swallows the next record.
    pub async fn record(&self, entry: &AuditRecord) -> Result<(), AuditWriteError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut guard = self.file.lock().await;
        let mut file = match guard.take() {
            Some(file) => file,
            None => self.open().await.map_err(|e| self.io_error(e))?,
        };

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;
        *guard = Some(file);

        debug!(audit_id = %entry.audit_id, path = %self.path.display(), "audit record appended");
        Ok(())
    }

    /// Read every record in the log. A missing file yields an empty list;
    /// malformed lines are skipped with a warning.
    pub async fn read_all(&self) -> std::io::Result<Vec<AuditRecord>> {
        read_records(&self.path).await
    }

    async fn open(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;

        let len = file.metadata().await?.len();
        if len > 0 {
            file.seek(SeekFrom::Start(len - 1)).await?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last).await?;
            if last[0] != b'\n' {
                warn!(path = %self.path.display(), "audit log ends mid-line, terminating it");
                file.write_all(b"\n").await?;
            }
        }
        Ok(file)
    }

    fn io_error(&self, source: std::io::Error) -> AuditWriteError {
        AuditWriteError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Read all audit records from a JSON Lines file.
pub async fn read_records(path: &Path) -> std::io::Result<Vec<AuditRecord>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AuditRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping invalid audit line");
            }
        }
    }
    Ok(records)
}

/// Short, log-safe summary of an execution result.
///
/// Prefers the first string value among `summary`, `answer` and `notes`;
/// otherwise the compact JSON of the whole result. Truncated to
/// [`OUTPUT_SUMMARY_MAX_CHARS`] characters. Empty when there is no result.
pub fn summarize_output(result: Option<&ExecutionResult>) -> String {
    let Some(result) = result else {
        return String::new();
    };
    if result.is_empty() {
        return String::new();
    }

    for key in SUMMARY_KEYS {
        if let Some(serde_json::Value::String(value)) = result.get(*key) {
            return truncate_chars(value, OUTPUT_SUMMARY_MAX_CHARS);
        }
    }

    let serialized = serde_json::to_string(result).unwrap_or_default();
    truncate_chars(&serialized, OUTPUT_SUMMARY_MAX_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
