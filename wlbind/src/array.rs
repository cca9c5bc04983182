//! Byte arrays in the native `wl_array` layout.

use std::ffi::c_void;

/// Native dynamic array, layout-compatible with the C `struct wl_array`.
///
/// Generated code only ever builds it over borrowed bytes for the duration
/// of one request call, so the native library never reallocates it.
#[repr(C)]
#[derive(Debug)]
pub struct WlArray {
    size: usize,
    alloc: usize,
    data: *mut c_void,
}

impl WlArray {
    /// View `bytes` as a native array.
    ///
    /// The native side must treat the array as read-only, which request
    /// marshaling does.
    pub fn borrowed(bytes: &[u8]) -> Self {
        Self {
            size: bytes.len(),
            alloc: bytes.len(),
            data: bytes.as_ptr() as *mut c_void,
        }
    }

    /// Pointer to hand to a native entry point.
    pub fn as_mut_ptr(&mut self) -> *mut WlArray {
        self
    }

    /// Number of bytes in the array.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the array holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Copy the contents of a native array. A null pointer yields an empty vector.
///
/// # Safety
///
/// `ptr` must be null or point to a valid `wl_array` for the duration of
/// the call.
pub unsafe fn to_vec(ptr: *const WlArray) -> Vec<u8> {
    match ptr.as_ref() {
        Some(array) if array.size > 0 && !array.data.is_null() => {
            std::slice::from_raw_parts(array.data.cast::<u8>(), array.size).to_vec()
        }
        _ => Vec::new(),
    }
}
