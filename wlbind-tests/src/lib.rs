//! Bindings generated at build time from the wayland and xdg-shell test
//! schemas, compiled against the mock native library in [`ffi`].
//!
//! The build script runs `wlbind-gen` on the same fixtures its own tests
//! use, so any change to the emitters is type-checked here and driven
//! through the mock by the integration tests.

pub mod ffi;

/// Core protocol objects. `wl_display` is skipped.
pub mod wayland {
    include!(concat!(env!("OUT_DIR"), "/wayland_contract.rs"));
    include!(concat!(env!("OUT_DIR"), "/wayland_glue.rs"));
}

/// Desktop shell objects, referring back to [`wayland`] types.
pub mod xdg_shell {
    include!(concat!(env!("OUT_DIR"), "/xdg_shell_contract.rs"));
    include!(concat!(env!("OUT_DIR"), "/xdg_shell_glue.rs"));
}
