//! Exclusively owned native handles.
//!
//! A generated wrapper owns exactly one native object pointer. The pointer is
//! adopted at construction and released once, either by [`Drop`] through the
//! interface's [`Deleter`] or by handing it back with
//! [`OwnedHandle::into_raw`] (used by the generated `dispose` operation,
//! whose native entry point destroys the object itself).

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Release routine for one native interface type.
///
/// Generated glue implements this for every interface by forwarding to the
/// native `<interface>_destroy` entry point.
pub trait Deleter {
    /// The native object type released by this deleter.
    type Native;

    /// Release `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live object obtained from the native library and must
    /// not be used afterwards.
    unsafe fn delete(ptr: *mut Self::Native);
}

/// A non-null native pointer released through `D` when dropped.
///
/// The handle is neither `Clone`, `Send` nor `Sync`.
pub struct OwnedHandle<D: Deleter> {
    ptr: NonNull<D::Native>,
    _deleter: PhantomData<D>,
}

impl<D: Deleter> OwnedHandle<D> {
    /// Take ownership of `ptr`.
    ///
    /// # Panics
    ///
    /// Panics when `ptr` is null. `interface` names the native type in the
    /// panic message.
    ///
    /// # Safety
    ///
    /// `ptr` must come from the native library and must not be owned by
    /// anything else.
    pub unsafe fn adopt(ptr: *mut D::Native, interface: &str) -> Self {
        match NonNull::new(ptr) {
            Some(ptr) => Self {
                ptr,
                _deleter: PhantomData,
            },
            None => panic!("native library returned a null {} object", interface),
        }
    }

    /// Take ownership of `ptr`, or `None` when it is null.
    ///
    /// # Safety
    ///
    /// Same contract as [`OwnedHandle::adopt`].
    pub unsafe fn try_adopt(ptr: *mut D::Native) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _deleter: PhantomData,
        })
    }

    /// The owned pointer. Ownership stays with the handle.
    pub fn as_ptr(&self) -> *mut D::Native {
        self.ptr.as_ptr()
    }

    /// Give up ownership without running the deleter.
    pub fn into_raw(self) -> *mut D::Native {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl<D: Deleter> Drop for OwnedHandle<D> {
    fn drop(&mut self) {
        // SAFETY: the pointer was adopted from the native library and is
        // released exactly once, here.
        unsafe { D::delete(self.ptr.as_ptr()) }
    }
}

impl<D: Deleter> fmt::Debug for OwnedHandle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedHandle").field(&self.ptr).finish()
    }
}
