//! C FFI surface for assetkit.
//!
//! Pattern: opaque LibraryHandle + C strings + JSON serialization.
//!
//! An automation server (Swift, Objective-C, Kotlin, anything with a C FFI)
//! opens a handle on a library root, then calls `assetkit_list` and
//! `assetkit_delete`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use assetkit_core::{paths, DirectoryStore, MediaLibrary};

// ---------------------------------------------------------------------------
// Error handling (thread-local last error)
// ---------------------------------------------------------------------------

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_error(msg: String) {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = Some(msg));
}

fn clear_error() {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = None);
}

/// Returns the last error message (caller frees with `assetkit_string_free`).
#[no_mangle]
pub extern "C" fn assetkit_last_error() -> *mut c_char {
    LAST_ERROR.with(|cell| {
        cell.borrow_mut()
            .take()
            .and_then(|s| CString::new(s).ok())
            .map(|s| s.into_raw())
            .unwrap_or(ptr::null_mut())
    })
}

/// Frees a string returned from assetkit FFI.
///
/// # Safety
/// Must be a pointer returned from this FFI and not already freed.
#[no_mangle]
pub unsafe extern "C" fn assetkit_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

// ---------------------------------------------------------------------------
// Opaque handle
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct LibraryHandle {
    _private: [u8; 0],
}

struct LibraryHandleInner {
    library: MediaLibrary<DirectoryStore>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Opens the library rooted at `root`, creating the directory if needed.
/// A null `root` uses `$ASSETKIT_ROOT` or `~/.assetkit/library`.
///
/// # Safety
/// `root` must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn assetkit_open(root: *const c_char) -> *mut LibraryHandle {
    clear_error();
    let root = if root.is_null() {
        paths::library_root()
    } else {
        match read_cstr(root) {
            Ok(r) => r.into(),
            Err(e) => {
                set_error(e);
                return ptr::null_mut();
            }
        }
    };

    match DirectoryStore::create(root) {
        Ok(store) => {
            log::debug!("assetkit: opened library at {}", store.root().display());
            let library = MediaLibrary::new(store);
            Box::into_raw(Box::new(LibraryHandleInner { library })) as *mut LibraryHandle
        }
        Err(e) => {
            set_error(e.to_string());
            ptr::null_mut()
        }
    }
}

/// Closes the library handle.
#[no_mangle]
pub extern "C" fn assetkit_close(handle: *mut LibraryHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle as *mut LibraryHandleInner));
        }
    }
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// List every asset. Returns a JSON array of `{"id", "type"}` objects
/// (caller frees), or NULL on error.
#[no_mangle]
pub extern "C" fn assetkit_list(handle: *mut LibraryHandle) -> *mut c_char {
    clear_error();
    let library = match library_ref(handle) {
        Ok(l) => l,
        Err(e) => return err_null(e),
    };
    match library.list() {
        Ok(assets) => json_to_cstr(&assets),
        Err(e) => err_null(e.to_string()),
    }
}

/// Delete every asset as one change.
/// Returns the number of assets removed, or -1 on error.
#[no_mangle]
pub extern "C" fn assetkit_delete(handle: *mut LibraryHandle) -> i64 {
    clear_error();
    let library = match library_ref(handle) {
        Ok(l) => l,
        Err(e) => {
            set_error(e);
            return -1;
        }
    };
    match library.delete() {
        Ok(summary) => i64::try_from(summary.requested).unwrap_or(i64::MAX),
        Err(e) => {
            set_error(e.to_string());
            -1
        }
    }
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// FFI ABI version.
#[no_mangle]
pub extern "C" fn assetkit_version() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn library_ref<'a>(handle: *mut LibraryHandle) -> Result<&'a MediaLibrary<DirectoryStore>, String> {
    if handle.is_null() {
        return Err("null library handle".into());
    }
    let inner = unsafe { &*(handle as *const LibraryHandleInner) };
    Ok(&inner.library)
}

fn read_cstr(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Err("null string pointer".into());
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(String::from)
        .map_err(|e| format!("invalid UTF-8: {}", e))
}

fn json_to_cstr<T: serde::Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(s) => to_cstr(s),
        Err(e) => err_null(e.to_string()),
    }
}

fn to_cstr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn err_null(msg: String) -> *mut c_char {
    set_error(msg);
    ptr::null_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ffi_library() -> (TempDir, *mut LibraryHandle) {
        let dir = TempDir::new().expect("tempdir");
        let root = c(dir.path().to_str().expect("utf-8 tempdir"));
        let handle = unsafe { assetkit_open(root.as_ptr()) };
        assert!(!handle.is_null());
        (dir, handle)
    }

    fn read_ffi_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null(), "FFI returned null");
        let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { assetkit_string_free(ptr) };
        s
    }

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    #[test]
    fn ffi_version() {
        assert_eq!(assetkit_version(), 1);
    }

    #[test]
    fn ffi_open_close_lifecycle() {
        let (_dir, handle) = ffi_library();
        assetkit_close(handle);
    }

    #[test]
    fn ffi_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root_path = dir.path().join("nested").join("library");
        let root = c(root_path.to_str().unwrap());

        let handle = unsafe { assetkit_open(root.as_ptr()) };
        assert!(!handle.is_null());
        assert!(root_path.is_dir());
        assetkit_close(handle);
    }

    #[test]
    fn ffi_null_handle_returns_error() {
        let ptr = assetkit_list(ptr::null_mut());
        assert!(ptr.is_null());
        let err = read_ffi_string(assetkit_last_error());
        assert!(err.contains("null"));

        assert_eq!(assetkit_delete(ptr::null_mut()), -1);
        let err = read_ffi_string(assetkit_last_error());
        assert!(err.contains("null"));
    }

    #[test]
    fn ffi_list_and_delete() {
        let (dir, handle) = ffi_library();
        std::fs::write(dir.path().join("a.jpg"), b"1").unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"2").unwrap();

        let json = read_ffi_string(assetkit_list(handle));
        let assets: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0]["type"], "image");
        assert_eq!(assets[1]["type"], "video");
        assert!(assets[0]["id"].as_str().unwrap().starts_with("a_jpg_"));

        assert_eq!(assetkit_delete(handle), 2);

        let json = read_ffi_string(assetkit_list(handle));
        assert_eq!(json, "[]");

        // Empty library: success with nothing removed
        assert_eq!(assetkit_delete(handle), 0);
        assert!(assetkit_last_error().is_null());

        assetkit_close(handle);
    }

    #[test]
    fn ffi_list_error_when_root_removed() {
        let (dir, handle) = ffi_library();
        let root = dir.path().to_path_buf();
        drop(dir);
        assert!(!root.exists());

        assert!(assetkit_list(handle).is_null());
        let err = read_ffi_string(assetkit_last_error());
        assert!(err.contains("unavailable"));

        assert_eq!(assetkit_delete(handle), -1);
        let err = read_ffi_string(assetkit_last_error());
        assert!(err.contains("could not fetch"));

        assetkit_close(handle);
    }

    #[test]
    fn ffi_string_free_null_safe() {
        unsafe { assetkit_string_free(ptr::null_mut()) };
    }

    #[test]
    fn ffi_close_null_safe() {
        assetkit_close(ptr::null_mut());
    }
}
