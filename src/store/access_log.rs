//! Capped append-only audit trail of sensitive record operations.
//!
//! The log shares the record store's backend and lives under its own key.
//! There is no upsert; entries are only ever appended, and the log is
//! truncated to the most recent entries by dropping from the front.

use tracing::error;

use crate::error::{Error, Result};
use crate::models::AccessLogEntry;

use super::backend::StorageBackend;
use super::RecordStore;

pub const ACCESS_LOG_KEY: &str = "data_access_log";

/// Entries beyond this are dropped oldest-first to keep storage bounded.
pub const MAX_LOG_ENTRIES: usize = 1000;

impl<S: StorageBackend> RecordStore<S> {
    /// The full access log, oldest first. Read failures degrade to empty.
    pub fn access_log(&self) -> Vec<AccessLogEntry> {
        self.load_list(ACCESS_LOG_KEY)
    }

    /// Append one entry, truncating to the most recent `MAX_LOG_ENTRIES`.
    pub fn log_access(&mut self, entry: AccessLogEntry) -> Result<()> {
        let mut entries = self.access_log();
        entries.push(entry);
        if entries.len() > MAX_LOG_ENTRIES {
            let excess = entries.len() - MAX_LOG_ENTRIES;
            entries.drain(..excess);
        }
        self.store_list(ACCESS_LOG_KEY, &entries)
            .map_err(|source| {
                error!(error = %source, "failed to record data access");
                Error::save_failed("access log", source)
            })
    }

    /// The full log as indented JSON.
    pub fn export_access_log(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.access_log()).map_err(|e| {
            error!(error = %e, "failed to export access log");
            Error::ExportFailed(e.into())
        })
    }

    /// Remove the log key entirely.
    pub fn clear_access_log(&mut self) -> Result<()> {
        self.backend_mut().remove(ACCESS_LOG_KEY).map_err(|source| {
            error!(error = %source, "failed to clear access log");
            Error::ClearFailed(source)
        })
    }
}
