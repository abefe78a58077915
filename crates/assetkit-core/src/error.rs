//! Error types.
//!
//! `StoreError` is the collaborator's reason. The facade wraps it without
//! rewriting it: `FetchError` is transparent, `DeleteError` says which step
//! failed and keeps the store's reason as its source.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a media store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("permission to access the media library was not granted")]
    PermissionDenied,

    #[error("media store unavailable: {0}")]
    Unavailable(String),

    #[error("media store is busy")]
    Busy,

    #[error("change conflicts with the current library state: {0}")]
    Conflict(String),

    #[error(
        "delete aborted; assets that could not be restored were kept in {}: {source}",
        .staging.display()
    )]
    Stranded {
        staging: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("media store I/O error: {0}")]
    Io(#[source] io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied,
            _ => StoreError::Io(err),
        }
    }
}

/// The store could not produce the asset collection.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct FetchError(#[from] StoreError);

impl FetchError {
    pub fn reason(&self) -> &StoreError {
        &self.0
    }

    pub fn into_inner(self) -> StoreError {
        self.0
    }
}

/// Bulk delete failed. Nothing was removed.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("could not fetch assets to delete: {0}")]
    Fetch(#[source] StoreError),

    #[error("media store rejected the delete: {0}")]
    Rejected(#[source] StoreError),
}

impl DeleteError {
    pub fn reason(&self) -> &StoreError {
        match self {
            DeleteError::Fetch(e) | DeleteError::Rejected(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn permission_io_errors_become_permission_denied() {
        let err: StoreError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, StoreError::PermissionDenied));

        let err: StoreError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn fetch_error_displays_store_reason_verbatim() {
        let err = FetchError::from(StoreError::Unavailable("offline".into()));
        assert_eq!(err.to_string(), "media store unavailable: offline");
        assert!(matches!(err.reason(), StoreError::Unavailable(_)));
    }

    #[test]
    fn delete_error_keeps_store_reason_as_source() {
        let err = DeleteError::Rejected(StoreError::Busy);
        assert!(matches!(err.reason(), StoreError::Busy));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("media store is busy"));
    }
}
