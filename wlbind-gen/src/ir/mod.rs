//! Schema model module.
//!
//! This module holds the in-memory model of a protocol schema, the builder
//! that produces it from a parsed document tree, and the naming rules that
//! derive native symbols and Rust identifiers from schema names.

pub mod builder;
pub mod naming;
pub mod protocol;

pub use builder::SchemaBuilder;
pub use naming::NativeSymbols;
pub use protocol::{
    ArgKind, Argument, EnumDef, EnumEntry, Event, IntKind, Interface, Protocol, Request,
};
