//! assetkit data models.
//!
//! Descriptors are plain values: an id and a kind, nothing that points
//! back into a store.

pub mod media;

pub use media::{map_type, MediaAssetDescriptor, MediaKind, NativeMediaType};
