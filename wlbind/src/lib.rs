//! # wlbind
//!
//! Runtime support for Rust bindings generated by `wlbind-gen` from Wayland
//! protocol schemas.
//!
//! Generated code is split into two artifacts that are included side by side
//! in one module: the *contract* (wrapper types, event channels, request
//! traits, enums) and the *glue* (deleters, listener tables, callbacks and
//! request forwarding). Both lean on the small set of types exported here.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! mod ffi {
//!     // declarations of the native entry points, e.g. produced by bindgen
//! }
//!
//! mod xdg_shell {
//!     use super::ffi;
//!     include!(concat!(env!("OUT_DIR"), "/xdg_shell_contract.rs"));
//!     include!(concat!(env!("OUT_DIR"), "/xdg_shell_glue.rs"));
//! }
//!
//! use xdg_shell::{XdgWmBase, XdgWmBaseRequests};
//! use wlbind::Proxy;
//!
//! let wm_base: XdgWmBase = registry.bind(name, 3);
//! wm_base.events().on_ping.connect(|serial| println!("ping {serial}"));
//! ```
//!
//! ## Components
//!
//! | Item | Role |
//! |------|------|
//! | [`Signal`] | Multi-observer notification channel, one per event |
//! | [`OwnedHandle`] | Exclusively owned native pointer with a custom deleter |
//! | [`Proxy`] | Trait implemented by every generated wrapper |
//! | [`ObjectRef`] / [`AnyObject`] | Non-owning object references delivered by events |
//! | [`NewObject`] | Take-once slot for objects created by events |
//! | [`Fixed`] | 24.8 signed fixed-point number |
//! | [`array`], [`text`], [`user_data`] | Conversions used by generated callbacks |
//!
//! ## Threading
//!
//! Nothing in this crate is `Send` or `Sync`. Events are delivered on the
//! thread that dispatches the native event queue and observers run inline.

pub mod array;
pub mod fixed;
pub mod handle;
pub mod proxy;
pub mod signal;
pub mod text;
pub mod user_data;

pub use array::WlArray;
pub use fixed::Fixed;
pub use handle::{Deleter, OwnedHandle};
pub use proxy::{AnyObject, NewObject, ObjectRef, Proxy};
pub use signal::{Connection, Signal};
