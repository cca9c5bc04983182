//! Wrapper trait and object references.
//!
//! [`Proxy`] is implemented by every generated wrapper type. The remaining
//! types describe protocol objects that show up inside event payloads:
//!
//! - [`ObjectRef`] borrows an object of a known interface without owning it.
//! - [`AnyObject`] does the same for arguments that name no interface.
//! - [`NewObject`] carries an object the server has just created for the
//!   client; the first observer to [`take`](NewObject::take) it owns it.

use std::cell::RefCell;
use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A generated wrapper around one native protocol object.
pub trait Proxy: Sized {
    /// Native object type, e.g. `ffi::wl_surface`.
    type Native;

    /// Protocol name of the interface, e.g. `"wl_surface"`.
    const INTERFACE_NAME: &'static str;

    /// Highest interface version described by the schema.
    const VERSION: u32;

    /// Adopt a native object, registering event listeners if the interface
    /// has events.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live object of this interface, owned by nobody else
    /// and without a listener installed.
    unsafe fn from_raw(ptr: *mut Self::Native) -> Self;

    /// The native object. Ownership stays with the wrapper.
    fn as_ptr(&self) -> *mut Self::Native;

    /// Give up ownership without destroying the native object.
    ///
    /// The listener registered by [`Proxy::from_raw`] stays installed and
    /// keeps its user data, so generated wrappers leak their event channels
    /// here: events dispatched later still reach the observers connected
    /// before the call. The channels are never freed. Destroy the returned
    /// object through the native library; it cannot be adopted again with
    /// [`Proxy::from_raw`] because a listener is already installed.
    fn into_raw(self) -> *mut Self::Native;

    /// Address of the native interface descriptor (`<interface>_interface`).
    fn interface() -> *const c_void;
}

/// Non-owning reference to an object of interface `P`.
pub struct ObjectRef<P: Proxy> {
    ptr: NonNull<P::Native>,
    _proxy: PhantomData<P>,
}

impl<P: Proxy> ObjectRef<P> {
    /// Wrap a native pointer, or `None` when it is null.
    pub fn from_raw(ptr: *mut P::Native) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _proxy: PhantomData,
        })
    }

    /// The referenced native object.
    pub fn as_ptr(&self) -> *mut P::Native {
        self.ptr.as_ptr()
    }

    /// Whether this reference points at the object owned by `proxy`.
    pub fn is(&self, proxy: &P) -> bool {
        self.ptr.as_ptr() == proxy.as_ptr()
    }
}

impl<P: Proxy> Clone for ObjectRef<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Proxy> Copy for ObjectRef<P> {}

impl<P: Proxy> PartialEq for ObjectRef<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<P: Proxy> Eq for ObjectRef<P> {}

impl<P: Proxy> fmt::Debug for ObjectRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef<{}>({:p})", P::INTERFACE_NAME, self.ptr)
    }
}

/// Non-owning reference to an object whose interface the schema leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyObject(NonNull<c_void>);

impl AnyObject {
    /// Wrap a native pointer, or `None` when it is null.
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// The referenced native object.
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Whether this reference points at the object owned by `proxy`.
    pub fn is<P: Proxy>(&self, proxy: &P) -> bool {
        self.0.as_ptr() == proxy.as_ptr().cast::<c_void>()
    }
}

/// Take-once slot for a wrapper created by an event.
///
/// Event payloads are shared by reference between observers, so the fresh
/// wrapper sits in a slot. If no observer takes it, it is dropped together
/// with the payload and the native object is destroyed.
pub struct NewObject<P: Proxy> {
    slot: RefCell<Option<P>>,
}

impl<P: Proxy> NewObject<P> {
    /// Put a freshly constructed wrapper in a slot.
    pub fn new(proxy: P) -> Self {
        Self {
            slot: RefCell::new(Some(proxy)),
        }
    }

    /// Adopt a native object into a slot. A null pointer gives a slot that
    /// is already empty.
    ///
    /// # Safety
    ///
    /// Same contract as [`Proxy::from_raw`] for non-null pointers.
    pub unsafe fn from_raw(ptr: *mut P::Native) -> Self {
        let proxy = if ptr.is_null() { None } else { Some(P::from_raw(ptr)) };
        Self {
            slot: RefCell::new(proxy),
        }
    }

    /// Take the wrapper. Later calls return `None`.
    pub fn take(&self) -> Option<P> {
        self.slot.borrow_mut().take()
    }

    /// Whether an observer already took the wrapper.
    pub fn is_taken(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

impl<P: Proxy> fmt::Debug for NewObject<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewObject")
            .field("interface", &P::INTERFACE_NAME)
            .field("taken", &self.is_taken())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[repr(C)]
    struct FakeNative {
        _id: u32,
    }

    thread_local! {
        static DESTROYED: Cell<u32> = const { Cell::new(0) };
    }

    struct FakeProxy {
        ptr: *mut FakeNative,
    }

    impl Drop for FakeProxy {
        fn drop(&mut self) {
            DESTROYED.with(|d| d.set(d.get() + 1));
        }
    }

    impl Proxy for FakeProxy {
        type Native = FakeNative;
        const INTERFACE_NAME: &'static str = "wl_fake";
        const VERSION: u32 = 1;

        unsafe fn from_raw(ptr: *mut FakeNative) -> Self {
            Self { ptr }
        }

        fn as_ptr(&self) -> *mut FakeNative {
            self.ptr
        }

        fn into_raw(self) -> *mut FakeNative {
            let ptr = self.ptr;
            std::mem::forget(self);
            ptr
        }

        fn interface() -> *const c_void {
            std::ptr::null()
        }
    }

    #[test]
    fn test_object_ref_identity() {
        let mut native = FakeNative { _id: 1 };
        let proxy = unsafe { FakeProxy::from_raw(&mut native) };

        let first = ObjectRef::<FakeProxy>::from_raw(&mut native).unwrap();
        let second = first;

        assert!(first.is(&proxy));
        assert_eq!(first, second);
        assert!(ObjectRef::<FakeProxy>::from_raw(std::ptr::null_mut()).is_none());
        assert!(format!("{:?}", first).starts_with("ObjectRef<wl_fake>("));

        let _ = proxy.into_raw();
    }

    #[test]
    fn test_any_object_identity() {
        let mut native = FakeNative { _id: 2 };
        let proxy = unsafe { FakeProxy::from_raw(&mut native) };

        let any = AnyObject::from_raw((&mut native as *mut FakeNative).cast()).unwrap();
        assert!(any.is(&proxy));
        assert!(AnyObject::from_raw(std::ptr::null_mut()).is_none());

        let _ = proxy.into_raw();
    }

    #[test]
    fn test_new_object_is_taken_once() {
        let mut native = FakeNative { _id: 3 };
        let slot = unsafe { NewObject::<FakeProxy>::from_raw(&mut native) };

        assert!(!slot.is_taken());
        let taken = slot.take().unwrap();
        assert!(slot.is_taken());
        assert!(slot.take().is_none());
        assert_eq!(taken.as_ptr(), &mut native as *mut FakeNative);

        let _ = taken.into_raw();
    }

    #[test]
    fn test_untaken_new_object_is_dropped() {
        let mut native = FakeNative { _id: 4 };
        DESTROYED.with(|d| d.set(0));

        let slot = unsafe { NewObject::<FakeProxy>::from_raw(&mut native) };
        drop(slot);

        assert_eq!(DESTROYED.with(|d| d.get()), 1);
        assert!(unsafe { NewObject::<FakeProxy>::from_raw(std::ptr::null_mut()) }.is_taken());
    }
}
