use thiserror::Error;

/// Errors surfaced to callers of the record store.
///
/// Write-path failures deliberately carry only a coarse description of the
/// operation; the underlying cause is attached as a source and logged at the
/// point of failure. Read-path failures never reach this type (reads degrade
/// to an empty collection).
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to save {what} data")]
    SaveFailed {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to delete {what}")]
    DeleteFailed {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to clear data")]
    ClearFailed(#[source] anyhow::Error),

    #[error("failed to export data")]
    ExportFailed(#[source] anyhow::Error),

    #[error("failed to import data")]
    ImportFailed(#[source] anyhow::Error),

    #[error("storage unavailable: {0}")]
    Storage(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn save_failed(what: &'static str, source: anyhow::Error) -> Self {
        Self::SaveFailed { what, source }
    }

    pub(crate) fn delete_failed(what: &'static str, source: anyhow::Error) -> Self {
        Self::DeleteFailed { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_display() {
        let err = Error::save_failed("member", anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "failed to save member data");
    }

    #[test]
    fn test_delete_failed_display() {
        let err = Error::delete_failed("baby dedication", anyhow::anyhow!("nope"));
        assert_eq!(err.to_string(), "failed to delete baby dedication");
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;
        let err = Error::save_failed("member", anyhow::anyhow!("disk full"));
        let source = err.source().expect("source attached");
        assert!(source.to_string().contains("disk full"));
    }
}
