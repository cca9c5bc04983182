//! Mock of the native client library.
//!
//! Objects are heap cells that remember the listener table and user data
//! they were given, like `wl_proxy` does. Every entry point appends its
//! symbol to a per-thread log, so tests assert exactly what the generated
//! glue called and in which order.

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::cell::{Cell, RefCell};
use std::ffi::{c_char, c_void, CStr};

pub use wlbind::WlArray as wl_array;

/// Interface descriptor. Only the name is modelled.
#[repr(C)]
pub struct wl_interface {
    pub name: &'static str,
}

/// One native protocol object.
pub struct Object {
    listener: Cell<*const c_void>,
    data: Cell<*mut c_void>,
}

impl Object {
    /// Allocate an object without a listener.
    pub fn create() -> *mut Object {
        LIVE.with(|live| live.set(live.get() + 1));
        Box::into_raw(Box::new(Object {
            listener: Cell::new(std::ptr::null()),
            data: Cell::new(std::ptr::null_mut()),
        }))
    }
}

thread_local! {
    static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

fn record(call: impl Into<String>) {
    CALLS.with(|calls| calls.borrow_mut().push(call.into()));
}

/// Drain the calls logged on this thread.
pub fn take_calls() -> Vec<String> {
    CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
}

/// Objects created on this thread and not destroyed yet.
pub fn live_objects() -> usize {
    LIVE.with(Cell::get)
}

/// The listener table and user data installed on `ptr`, for delivering
/// events the way the dispatcher would.
///
/// # Safety
///
/// `ptr` must be a live object whose listener has type `L`.
pub unsafe fn listener<L>(ptr: *mut Object) -> (&'static L, *mut c_void) {
    let object = &*ptr;
    let table = object.listener.get().cast::<L>();
    assert!(!table.is_null(), "no listener installed");
    (&*table, object.data.get())
}

unsafe fn destroy(ptr: *mut Object, symbol: &str) {
    drop(Box::from_raw(ptr));
    LIVE.with(|live| live.set(live.get() - 1));
    record(symbol);
}

unsafe fn add_listener(ptr: *mut Object, listener: *const c_void, data: *mut c_void) -> i32 {
    let object = &*ptr;
    if !object.listener.get().is_null() {
        return -1;
    }
    object.listener.set(listener);
    object.data.set(data);
    0
}

unsafe fn text(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

fn presence<T>(ptr: *mut T) -> &'static str {
    if ptr.is_null() {
        "null"
    } else {
        "object"
    }
}

// ============================================================================
// Interfaces
// ============================================================================

macro_rules! interface {
    ($name:ident, $descriptor:ident, $destroy:ident) => {
        pub type $name = Object;

        pub static $descriptor: wl_interface = wl_interface {
            name: stringify!($name),
        };

        pub unsafe extern "C" fn $destroy(ptr: *mut $name) {
            destroy(ptr, stringify!($destroy));
        }
    };
}

macro_rules! listener {
    ($object:ident, $table:ident, $add:ident { $($event:ident: ($($arg:ty),*)),* $(,)? }) => {
        #[repr(C)]
        pub struct $table {
            $(pub $event: unsafe extern "C" fn(*mut c_void, *mut $object $(, $arg)*),)*
        }

        pub unsafe extern "C" fn $add(ptr: *mut $object, listener: *const $table, data: *mut c_void) -> i32 {
            add_listener(ptr, listener.cast(), data)
        }
    };
}

interface!(wl_registry, wl_registry_interface, wl_registry_destroy);
interface!(wl_callback, wl_callback_interface, wl_callback_destroy);
interface!(wl_compositor, wl_compositor_interface, wl_compositor_destroy);
interface!(wl_shm_pool, wl_shm_pool_interface, wl_shm_pool_destroy);
interface!(wl_shm, wl_shm_interface, wl_shm_destroy);
interface!(wl_buffer, wl_buffer_interface, wl_buffer_destroy);
interface!(wl_surface, wl_surface_interface, wl_surface_destroy);
interface!(wl_seat, wl_seat_interface, wl_seat_destroy);
interface!(xdg_wm_base, xdg_wm_base_interface, xdg_wm_base_destroy);
interface!(xdg_surface, xdg_surface_interface, xdg_surface_destroy);
interface!(xdg_toplevel, xdg_toplevel_interface, xdg_toplevel_destroy);

listener!(wl_registry, wl_registry_listener, wl_registry_add_listener {
    global: (u32, *const c_char, u32),
    global_remove: (u32),
});
listener!(wl_callback, wl_callback_listener, wl_callback_add_listener { done: (u32) });
listener!(wl_shm, wl_shm_listener, wl_shm_add_listener { format: (u32) });
listener!(wl_buffer, wl_buffer_listener, wl_buffer_add_listener { release: () });
listener!(wl_surface, wl_surface_listener, wl_surface_add_listener {
    preferred_buffer_scale: (i32),
});
listener!(wl_seat, wl_seat_listener, wl_seat_add_listener {
    capabilities: (u32),
    name: (*const c_char),
});
listener!(xdg_wm_base, xdg_wm_base_listener, xdg_wm_base_add_listener { ping: (u32) });
listener!(xdg_surface, xdg_surface_listener, xdg_surface_add_listener { configure: (u32) });
listener!(xdg_toplevel, xdg_toplevel_listener, xdg_toplevel_add_listener {
    configure: (i32, i32, *mut wl_array),
    close: (),
});

// ============================================================================
// Requests
// ============================================================================

pub unsafe extern "C" fn wl_registry_bind(
    _registry: *mut wl_registry,
    name: u32,
    interface: *const wl_interface,
    version: u32,
) -> *mut c_void {
    record(format!("wl_registry_bind({}, {}, {})", name, (*interface).name, version));
    Object::create().cast()
}

pub unsafe extern "C" fn wl_compositor_create_surface(_compositor: *mut wl_compositor) -> *mut wl_surface {
    record("wl_compositor_create_surface");
    Object::create()
}

pub unsafe extern "C" fn wl_shm_pool_create_buffer(
    _pool: *mut wl_shm_pool,
    offset: i32,
    width: i32,
    height: i32,
    stride: i32,
    format: u32,
) -> *mut wl_buffer {
    record(format!(
        "wl_shm_pool_create_buffer({}, {}, {}, {}, {})",
        offset, width, height, stride, format
    ));
    Object::create()
}

pub unsafe extern "C" fn wl_shm_pool_resize(_pool: *mut wl_shm_pool, size: i32) {
    record(format!("wl_shm_pool_resize({})", size));
}

pub unsafe extern "C" fn wl_shm_create_pool(_shm: *mut wl_shm, fd: i32, size: i32) -> *mut wl_shm_pool {
    assert!(fd >= 0, "descriptor must be open");
    record(format!("wl_shm_create_pool({})", size));
    Object::create()
}

pub unsafe extern "C" fn wl_shm_release(ptr: *mut wl_shm) {
    destroy(ptr, "wl_shm_release");
}

pub unsafe extern "C" fn wl_surface_attach(_surface: *mut wl_surface, buffer: *mut wl_buffer, x: i32, y: i32) {
    record(format!("wl_surface_attach({}, {}, {})", presence(buffer), x, y));
}

pub unsafe extern "C" fn wl_surface_frame(_surface: *mut wl_surface) -> *mut wl_callback {
    record("wl_surface_frame");
    Object::create()
}

pub unsafe extern "C" fn wl_surface_commit(_surface: *mut wl_surface) {
    record("wl_surface_commit");
}

pub unsafe extern "C" fn wl_seat_release(ptr: *mut wl_seat) {
    destroy(ptr, "wl_seat_release");
}

pub unsafe extern "C" fn xdg_wm_base_get_xdg_surface(
    _wm_base: *mut xdg_wm_base,
    surface: *mut wl_surface,
) -> *mut xdg_surface {
    record(format!("xdg_wm_base_get_xdg_surface({})", presence(surface)));
    Object::create()
}

pub unsafe extern "C" fn xdg_wm_base_pong(_wm_base: *mut xdg_wm_base, serial: u32) {
    record(format!("xdg_wm_base_pong({})", serial));
}

pub unsafe extern "C" fn xdg_surface_get_toplevel(_surface: *mut xdg_surface) -> *mut xdg_toplevel {
    record("xdg_surface_get_toplevel");
    Object::create()
}

pub unsafe extern "C" fn xdg_surface_ack_configure(_surface: *mut xdg_surface, serial: u32) {
    record(format!("xdg_surface_ack_configure({})", serial));
}

pub unsafe extern "C" fn xdg_toplevel_set_parent(_toplevel: *mut xdg_toplevel, parent: *mut xdg_toplevel) {
    record(format!("xdg_toplevel_set_parent({})", presence(parent)));
}

pub unsafe extern "C" fn xdg_toplevel_set_title(_toplevel: *mut xdg_toplevel, title: *const c_char) {
    record(format!("xdg_toplevel_set_title({})", text(title)));
}

pub unsafe extern "C" fn xdg_toplevel_set_app_id(_toplevel: *mut xdg_toplevel, app_id: *const c_char) {
    record(format!("xdg_toplevel_set_app_id({})", text(app_id)));
}

pub unsafe extern "C" fn xdg_toplevel_resize(
    _toplevel: *mut xdg_toplevel,
    seat: *mut wl_seat,
    serial: u32,
    edges: u32,
) {
    record(format!("xdg_toplevel_resize({}, {}, {})", presence(seat), serial, edges));
}
