//! assetkit-core — list and clear a device media library.
//!
//! A thin facade over an external media store. Two operations: `list`
//! returns a descriptor per asset, `delete` removes every asset in one
//! atomic change.
//!
//! # Architecture
//!
//! ```text
//! Layer 0: Store (MediaStore trait: fetch all, atomic batch delete)
//! Layer 1: Facade (MediaLibrary: list, delete)
//! Layer 2: Agents (automation server via FFI, CLI)
//! ```

pub mod error;
pub mod library;
pub mod models;
pub mod paths;
pub mod store;
pub mod stores;

pub use error::{DeleteError, FetchError, StoreError};
pub use library::{DeleteSummary, MediaLibrary};
pub use models::*;
pub use store::{MediaStore, StoredAsset};
pub use stores::{DirectoryStore, MemoryStore};
