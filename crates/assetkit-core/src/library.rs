//! Media library facade — list and bulk delete over an injected store.
//!
//! Every call goes to the store. Nothing is cached between calls, so a
//! `delete` never operates on the snapshot a previous `list` returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DeleteError, FetchError};
use crate::models::MediaAssetDescriptor;
use crate::store::MediaStore;

/// Result of a committed bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    /// Number of assets in the committed change. Zero for an empty library.
    pub requested: usize,
}

/// The media library facade.
pub struct MediaLibrary<S: MediaStore> {
    store: Arc<S>,
}

impl<S: MediaStore> MediaLibrary<S> {
    pub fn new(store: S) -> Self {
        Self::with_shared(Arc::new(store))
    }

    /// Wrap a store that is also held elsewhere.
    pub fn with_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// List every asset currently in the store, in the store's order.
    ///
    /// The order carries no meaning. Fetch failures are returned as-is; no
    /// partial list is ever produced.
    pub fn list(&self) -> Result<Vec<MediaAssetDescriptor>, FetchError> {
        let assets = self.store.fetch_assets()?;
        Ok(assets.iter().map(MediaAssetDescriptor::from_asset).collect())
    }

    /// Delete every asset currently in the store as one change.
    ///
    /// The set is fetched again here, not taken from an earlier `list`.
    /// Assets added by someone else after that fetch are not part of the
    /// change and survive it; assets listed earlier but already gone are
    /// simply not requested. Rejections are not retried.
    pub fn delete(&self) -> Result<DeleteSummary, DeleteError> {
        let assets = self.store.fetch_assets().map_err(DeleteError::Fetch)?;
        let requested = assets.len();
        log::debug!("assetkit: requesting delete of {} assets", requested);

        match self.store.delete_assets(&assets) {
            Ok(()) => {
                log::info!("assetkit: deleted {} assets", requested);
                Ok(DeleteSummary { requested })
            }
            Err(e) => {
                log::warn!("assetkit: delete of {} assets rejected: {}", requested, e);
                Err(DeleteError::Rejected(e))
            }
        }
    }
}

impl<S: MediaStore> Clone for MediaLibrary<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MediaStore> std::fmt::Debug for MediaLibrary<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaLibrary").finish_non_exhaustive()
    }
}
