//! assetkit path conventions.
//!
//! Where the library lives on disk and what the store reserves inside it.

use std::path::PathBuf;

/// Environment variable overriding the library root.
pub const ROOT_ENV: &str = "ASSETKIT_ROOT";

/// Prefix of the hidden staging directory a delete works in.
pub const STAGING_PREFIX: &str = ".assetkit-delete-";

/// Library root: `$ASSETKIT_ROOT`, else `~/.assetkit/library`.
pub fn library_root() -> PathBuf {
    match std::env::var_os(ROOT_ENV) {
        Some(root) if !root.is_empty() => PathBuf::from(root),
        _ => default_root(),
    }
}

pub fn default_root() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".assetkit").join("library")
}
