//! Opaque user-data pointers for native listeners.
//!
//! Registering a listener hands the native library a `void*` that comes
//! back as the first argument of every callback. Generated glue passes the
//! address of the wrapper's boxed events block through [`of`] and turns it
//! back into a reference with [`recover`], the only place where that
//! untyped address is reinterpreted.

use std::ffi::c_void;

/// Erase a reference into a user-data pointer.
pub fn of<T>(target: &T) -> *mut c_void {
    target as *const T as *mut c_void
}

/// Recover the reference erased by [`of`].
///
/// # Safety
///
/// `data` must have been produced by [`of`] for a `T` that is still alive,
/// which holds for listener callbacks: registration passes the boxed events
/// block of the wrapper, and the wrapper destroys the native object (and
/// with it the listener) before the box is freed.
pub unsafe fn recover<'a, T>(data: *mut c_void) -> &'a T {
    &*(data as *const T)
}
