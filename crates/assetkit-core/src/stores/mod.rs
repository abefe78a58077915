//! Concrete media stores.

pub mod directory;
pub mod memory;

pub use directory::{DirectoryStore, FileAsset};
pub use memory::{MemoryAsset, MemoryStore};

/// FNV-1a hash, stable across runs and platforms.
pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
