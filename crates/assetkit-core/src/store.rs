//! The media store contract.
//!
//! A store is the external subsystem that owns and persists assets. The
//! facade needs exactly two primitives from it: fetch everything, and
//! delete a batch atomically.

use crate::error::StoreError;
use crate::models::NativeMediaType;

/// A store-side asset handle.
pub trait StoredAsset {
    /// The store's stable identifier for this asset.
    fn local_identifier(&self) -> &str;
    fn media_type(&self) -> NativeMediaType;
}

/// Trait for media store backends.
///
/// Implementations are shared across threads and manage their own
/// locking. Both methods block until the store has answered.
pub trait MediaStore: Send + Sync {
    type Asset: StoredAsset;

    /// Fetch the full, unfiltered collection of assets currently present.
    fn fetch_assets(&self) -> Result<Vec<Self::Asset>, StoreError>;

    /// Remove exactly `assets` as one change. Either every asset is removed
    /// or none is.
    fn delete_assets(&self, assets: &[Self::Asset]) -> Result<(), StoreError>;
}
