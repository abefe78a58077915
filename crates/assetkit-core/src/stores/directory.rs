//! Filesystem media store — every regular file under a root directory is an asset.
//!
//! Hidden entries are not assets. A delete moves the whole batch into a
//! hidden staging directory first, so a failure part-way through can put
//! every file back before the error is returned.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use lofty::file::FileType;
use lofty::probe::Probe;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::models::NativeMediaType;
use crate::paths::STAGING_PREFIX;
use crate::store::{MediaStore, StoredAsset};

use super::fnv1a;

/// Supported audio extensions.
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "m4a", "aac", "ogg", "wav", "opus", "wma", "aiff", "alac", "caf",
];

/// Supported video extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "avi", "mov", "m4v", "3gp"];

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "heic", "heif", "tiff", "dng",
];

/// ISO-BMFF major brands that denote audio-only files.
const AUDIO_BRANDS: &[&[u8; 4]] = &[b"M4A ", b"M4B ", b"M4P "];

/// Moves a file. Used both to stage and to restore.
type Mover = dyn Fn(&Path, &Path) -> io::Result<()> + Send + Sync;

/// Asset handle for a file in a `DirectoryStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAsset {
    local_identifier: String,
    path: PathBuf,
    media_type: NativeMediaType,
}

impl FileAsset {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoredAsset for FileAsset {
    fn local_identifier(&self) -> &str {
        &self.local_identifier
    }

    fn media_type(&self) -> NativeMediaType {
        self.media_type
    }
}

pub struct DirectoryStore {
    root: PathBuf,
    /// Serializes change transactions.
    changes: Mutex<()>,
    mover: Box<Mover>,
}

impl DirectoryStore {
    /// Open a library at `root`. The directory is not created; fetching from
    /// a missing root fails with `Unavailable`.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            changes: Mutex::new(()),
            mover: Box::new(move_file),
        }
    }

    /// Open a library at `root`, creating the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::open(root);
        fs::create_dir_all(&store.root)?;
        Ok(store)
    }

    #[cfg(test)]
    fn with_mover(
        mut self,
        mover: impl Fn(&Path, &Path) -> io::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.mover = Box::new(mover);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset_for(&self, path: PathBuf) -> Option<FileAsset> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        if filename.starts_with('.') {
            return None;
        }
        let local_identifier = stable_id(&path.to_string_lossy(), &filename);
        let media_type = classify_file(&path);
        Some(FileAsset {
            local_identifier,
            path,
            media_type,
        })
    }
}

impl MediaStore for DirectoryStore {
    type Asset = FileAsset;

    fn fetch_assets(&self) -> Result<Vec<FileAsset>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "library root {} is not a directory",
                self.root.display()
            )));
        }

        let mut assets = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(asset) = self.asset_for(path) {
                assets.push(asset);
            }
        }
        assets.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(assets)
    }

    fn delete_assets(&self, assets: &[FileAsset]) -> Result<(), StoreError> {
        let _change = self.changes.lock();

        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(assets.len());
        for asset in assets {
            if asset.path.parent() != Some(self.root.as_path()) {
                return Err(StoreError::Conflict(format!(
                    "asset {} does not belong to this library",
                    asset.local_identifier
                )));
            }
            if !asset.path.is_file() {
                return Err(StoreError::Conflict(format!(
                    "asset {} no longer exists",
                    asset.local_identifier
                )));
            }
            if seen.insert(asset.path.as_path()) {
                paths.push(asset.path.as_path());
            }
        }

        if paths.is_empty() {
            return Ok(());
        }

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.root)?;

        if let Err(failure) = stage(&paths, staging.path(), &*self.mover) {
            if failure.stranded.is_empty() {
                return Err(failure.cause.into());
            }
            // Dropping the TempDir would delete the files that could not be put back
            #[allow(deprecated)]
            let kept = staging.into_path();
            log::error!(
                "assetkit: {} assets could not be restored after aborted delete, kept in {}",
                failure.stranded.len(),
                kept.display()
            );
            return Err(StoreError::Stranded {
                staging: kept,
                source: failure.cause,
            });
        }

        // Files are out of the library once staged; cleanup failures don't undo that
        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            log::warn!(
                "assetkit: could not remove staging directory {}: {}",
                staging_path.display(),
                e
            );
        }
        Ok(())
    }
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

/// An aborted staging pass.
#[derive(Debug)]
struct StageFailure {
    cause: io::Error,
    /// Original paths whose files are still in the staging directory.
    stranded: Vec<PathBuf>,
}

/// Move every file into `staging`. On the first failure, move the files
/// already staged back to where they were and report any that could not be.
fn stage(paths: &[&Path], staging: &Path, mover: &Mover) -> Result<(), StageFailure> {
    let mut staged: Vec<(&Path, PathBuf)> = Vec::with_capacity(paths.len());

    for (index, &original) in paths.iter().enumerate() {
        let name = original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = staging.join(format!("{}-{}", index, name));

        if let Err(cause) = mover(original, &target) {
            let mut stranded = Vec::new();
            for (back, from) in staged.iter().rev() {
                if let Err(restore) = mover(from.as_path(), *back) {
                    log::error!(
                        "assetkit: failed to restore {} after aborted delete: {}",
                        back.display(),
                        restore
                    );
                    stranded.push(back.to_path_buf());
                }
            }
            return Err(StageFailure { cause, stranded });
        }
        staged.push((original, target));
    }
    Ok(())
}

fn classify_file(path: &Path) -> NativeMediaType {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    classify_extension(&ext).unwrap_or_else(|| sniff_content(path))
}

fn classify_extension(ext: &str) -> Option<NativeMediaType> {
    if AUDIO_EXTENSIONS.contains(&ext) {
        Some(NativeMediaType::Audio)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(NativeMediaType::Video)
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        Some(NativeMediaType::Image)
    } else {
        None
    }
}

/// Classify a file with no recognized extension by its content.
fn sniff_content(path: &Path) -> NativeMediaType {
    if let Some(brand) = ftyp_brand(path) {
        return if AUDIO_BRANDS.contains(&&brand) {
            NativeMediaType::Audio
        } else {
            NativeMediaType::Video
        };
    }

    let guessed = Probe::open(path)
        .ok()
        .and_then(|p| p.guess_file_type().ok())
        .and_then(|p| p.file_type());
    match guessed {
        // ISO-BMFF without a readable brand, can't tell audio from video
        Some(FileType::Mp4) => NativeMediaType::Unknown,
        Some(_) => NativeMediaType::Audio,
        None => NativeMediaType::Unknown,
    }
}

/// Major brand of an ISO-BMFF file (`....ftypXXXX`), if the header has one.
fn ftyp_brand(path: &Path) -> Option<[u8; 4]> {
    let mut header = [0u8; 12];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    if &header[4..8] != b"ftyp" {
        return None;
    }
    let mut brand = [0u8; 4];
    brand.copy_from_slice(&header[8..12]);
    Some(brand)
}

/// Stable ID from file path — FNV-1a hash ensures same file → same ID across calls.
pub(crate) fn stable_id(file_path: &str, filename: &str) -> String {
    format!("{}_{:016x}", sanitize_id(filename), fnv1a(file_path.as_bytes()))
}

fn sanitize_id(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
