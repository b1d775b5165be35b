//! Append-only audit log.
//!
//! One line per event, `YYYY-MM-DD HH:MM:SS.mmm - LEVEL - message`, appended
//! to a fixed file for the process lifetime. The handle is opened once at
//! startup and passed to whoever needs it; there is no ambient global to
//! mutate. Cloning shares the underlying writer.
//!
//! Every audit event is mirrored to `tracing` at the matching level so
//! regular diagnostics keep flowing through the installed subscriber.

use chrono::Utc;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "INFO"),
            AuditLevel::Warning => write!(f, "WARNING"),
            AuditLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Shared handle to the audit file.
#[derive(Clone)]
pub struct AuditLog {
    path: PathBuf,
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl AuditLog {
    /// Open (or create) the audit file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    /// File this log appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event line and flush it to disk.
    pub fn record(&self, level: AuditLevel, message: impl AsRef<str>) {
        let message = message.as_ref();
        match level {
            AuditLevel::Info => info!(target: "audit", "{message}"),
            AuditLevel::Warning => warn!(target: "audit", "{message}"),
            AuditLevel::Error => error!(target: "audit", "{message}"),
        }

        let line = format!(
            "{} - {} - {}\n",
            Utc::now().format(TIMESTAMP_FORMAT),
            level,
            message
        );
        let mut writer = self.writer.lock();
        // An unwritable audit file must not take down order flow.
        if let Err(err) = writer.write_all(line.as_bytes()).and_then(|()| writer.flush()) {
            error!(error = %err, path = %self.path.display(), "failed to append audit line");
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.record(AuditLevel::Info, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.record(AuditLevel::Error, message);
    }

    /// Flush buffered lines; also happens on every `record`.
    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}
