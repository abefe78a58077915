//! In-process media store.
//!
//! Holds assets in a Vec behind a mutex. Used by tests and by embedders
//! that keep their own media index. Faults can be armed to make the next
//! fetch or change fail.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::models::NativeMediaType;
use crate::store::{MediaStore, StoredAsset};

use super::fnv1a;

/// Asset handle owned by a `MemoryStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAsset {
    local_identifier: String,
    media_type: NativeMediaType,
}

impl StoredAsset for MemoryAsset {
    fn local_identifier(&self) -> &str {
        &self.local_identifier
    }

    fn media_type(&self) -> NativeMediaType {
        self.media_type
    }
}

#[derive(Default)]
struct MemoryState {
    assets: Vec<MemoryAsset>,
    next_serial: u64,
    fetch_fault: Option<StoreError>,
    change_fault: Option<StoreError>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset and return its generated identifier.
    pub fn insert(&self, media_type: NativeMediaType) -> String {
        let mut state = self.state.lock();
        state.next_serial += 1;
        let id = local_identifier(state.next_serial);
        state.assets.push(MemoryAsset {
            local_identifier: id.clone(),
            media_type,
        });
        id
    }

    /// Add an asset under a caller-chosen identifier.
    pub fn insert_with_id(&self, id: impl Into<String>, media_type: NativeMediaType) {
        self.state.lock().assets.push(MemoryAsset {
            local_identifier: id.into(),
            media_type,
        });
    }

    pub fn len(&self) -> usize {
        self.state.lock().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make the next `fetch_assets` fail with `reason`.
    pub fn fail_fetches(&self, reason: StoreError) {
        self.state.lock().fetch_fault = Some(reason);
    }

    /// Make the next `delete_assets` be rejected with `reason`.
    pub fn reject_changes(&self, reason: StoreError) {
        self.state.lock().change_fault = Some(reason);
    }
}

impl MediaStore for MemoryStore {
    type Asset = MemoryAsset;

    fn fetch_assets(&self) -> Result<Vec<MemoryAsset>, StoreError> {
        let mut state = self.state.lock();
        if let Some(fault) = state.fetch_fault.take() {
            return Err(fault);
        }
        Ok(state.assets.clone())
    }

    fn delete_assets(&self, assets: &[MemoryAsset]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if let Some(fault) = state.change_fault.take() {
            return Err(fault);
        }

        let doomed: HashSet<&str> = assets.iter().map(|a| a.local_identifier()).collect();

        // Every requested asset must still be present, otherwise nothing is removed
        let present: HashSet<&str> = state
            .assets
            .iter()
            .map(|a| a.local_identifier())
            .filter(|id| doomed.contains(id))
            .collect();
        if let Some(missing) = doomed.iter().find(|id| !present.contains(*id)) {
            return Err(StoreError::Conflict(format!("asset {} no longer exists", missing)));
        }

        state
            .assets
            .retain(|a| !doomed.contains(a.local_identifier()));
        Ok(())
    }
}

/// Identifier in the `UUID/L0/001` shape of platform local identifiers.
fn local_identifier(serial: u64) -> String {
    let a = mix(serial);
    let b = mix(serial ^ 0x9e37_79b9_7f4a_7c15);
    format!(
        "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}/L0/001",
        (a >> 32) as u32,
        (a >> 16) & 0xffff,
        a & 0xffff,
        (b >> 48) & 0xffff,
        b & 0xffff_ffff_ffff,
    )
}

fn mix(value: u64) -> u64 {
    fnv1a(&value.to_le_bytes())
}
