//! Media classification types and the asset descriptor.
//!
//! `NativeMediaType` is what a store reports. `MediaKind` is what callers
//! see: a plain string on the wire, with a textual fallback so that every
//! native value has a rendering.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::StoredAsset;

/// Media type tag as reported by a store, modelled on platform media-type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeMediaType {
    Unknown,
    Image,
    Video,
    Audio,
    /// A raw code outside the known set.
    Other(i64),
}

impl NativeMediaType {
    /// Convert a raw platform code.
    pub fn from_raw(code: i64) -> Self {
        match code {
            0 => NativeMediaType::Unknown,
            1 => NativeMediaType::Image,
            2 => NativeMediaType::Video,
            3 => NativeMediaType::Audio,
            other => NativeMediaType::Other(other),
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            NativeMediaType::Unknown => 0,
            NativeMediaType::Image => 1,
            NativeMediaType::Video => 2,
            NativeMediaType::Audio => 3,
            NativeMediaType::Other(code) => code,
        }
    }
}

impl fmt::Display for NativeMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeMediaType::Unknown => f.write_str("unknown"),
            NativeMediaType::Image => f.write_str("image"),
            NativeMediaType::Video => f.write_str("video"),
            NativeMediaType::Audio => f.write_str("audio"),
            NativeMediaType::Other(code) => write!(f, "media-type({})", code),
        }
    }
}

/// Coarse classification exposed to callers.
///
/// Serializes to a bare string: `"audio"`, `"image"`, `"video"`,
/// `"unknown"`, or the fallback text carried by `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Image,
    Video,
    Unknown,
    Other(String),
}

impl MediaKind {
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Unknown => "unknown",
            MediaKind::Other(text) => text,
        }
    }

    fn from_label(label: String) -> Self {
        match label.as_str() {
            "audio" => MediaKind::Audio,
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            "unknown" => MediaKind::Unknown,
            _ => MediaKind::Other(label),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MediaKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(MediaKind::from_label)
    }
}

/// Map a store's native type tag to the exposed kind. Total, never fails.
pub fn map_type(native: NativeMediaType) -> MediaKind {
    match native {
        NativeMediaType::Audio => MediaKind::Audio,
        NativeMediaType::Image => MediaKind::Image,
        NativeMediaType::Unknown => MediaKind::Unknown,
        NativeMediaType::Video => MediaKind::Video,
        other => MediaKind::Other(other.to_string()),
    }
}

/// Snapshot of one asset at fetch time. Holds no reference to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaAssetDescriptor {
    id: String,
    #[serde(rename = "type")]
    kind: MediaKind,
}

impl MediaAssetDescriptor {
    pub fn new(id: impl Into<String>, kind: MediaKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub(crate) fn from_asset<A: StoredAsset>(asset: &A) -> Self {
        Self::new(asset.local_identifier(), map_type(asset.media_type()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &MediaKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_fixed_kinds() {
        assert_eq!(map_type(NativeMediaType::Audio).as_str(), "audio");
        assert_eq!(map_type(NativeMediaType::Image).as_str(), "image");
        assert_eq!(map_type(NativeMediaType::Unknown).as_str(), "unknown");
        assert_eq!(map_type(NativeMediaType::Video).as_str(), "video");
    }

    #[test]
    fn unrecognized_types_fall_back_to_text() {
        for code in [4, 42, -1, i64::MAX] {
            let kind = map_type(NativeMediaType::from_raw(code));
            assert!(matches!(kind, MediaKind::Other(_)));
            assert!(!kind.as_str().is_empty());
            assert!(kind.as_str().contains(&code.to_string()));
        }
    }

    #[test]
    fn raw_codes_roundtrip() {
        for code in -2..8 {
            assert_eq!(NativeMediaType::from_raw(code).raw(), code);
        }
    }

    #[test]
    fn descriptor_serializes_as_id_and_type() {
        let desc = MediaAssetDescriptor::new("ABC/L0/001", MediaKind::Image);
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json, serde_json::json!({"id": "ABC/L0/001", "type": "image"}));
    }

    #[test]
    fn fallback_kind_serializes_as_its_text() {
        let desc = MediaAssetDescriptor::new("x", map_type(NativeMediaType::Other(9)));
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["type"], "media-type(9)");

        let back: MediaAssetDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), &MediaKind::Other("media-type(9)".into()));
    }
}
