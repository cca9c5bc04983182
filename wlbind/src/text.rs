//! String conversions between Rust text and native C strings.
//!
//! The native library works with NUL-terminated strings, so text handed to
//! a request ends at its first NUL byte, exactly as the C library would see
//! it. Strings received from events are decoded lossily.

use std::borrow::Cow;
use std::ffi::{c_char, CStr, CString};

/// Build a C string from `text`, cutting it at the first interior NUL.
pub fn to_c_string(text: &str) -> CString {
    let bytes = match text.find('\0') {
        Some(end) => &text.as_bytes()[..end],
        None => text.as_bytes(),
    };
    match CString::new(bytes) {
        Ok(owned) => owned,
        // `bytes` holds no NUL after the cut above
        Err(_) => CString::default(),
    }
}

/// Decode a native string. A null pointer decodes to an empty string.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn from_raw(ptr: *const c_char) -> String {
    from_raw_opt(ptr).unwrap_or_default()
}

/// Decode a native string that may be absent.
///
/// # Safety
///
/// Same contract as [`from_raw`].
pub unsafe fn from_raw_opt(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    match CStr::from_ptr(ptr).to_string_lossy() {
        Cow::Borrowed(text) => Some(text.to_owned()),
        Cow::Owned(text) => Some(text),
    }
}
