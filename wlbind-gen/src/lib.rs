//! # wlbind-gen
//!
//! Compiles Wayland protocol schemas into typed Rust client bindings.
//!
//! The compiler takes the parsed schema document as a tree of
//! [`dom::Element`]s, builds a [`Protocol`] model from it and renders one of
//! two artifacts:
//!
//! - the **contract**: wrapper structs, event channels, request traits and
//!   enum newtypes
//! - the **glue**: deleters, listener tables, native callbacks and request
//!   forwarding to the C entry points
//!
//! Both artifacts are meant to be `include!`d side by side into one module
//! that also has the native declarations in scope as `ffi`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wlbind_gen::{generate, dom::Element, GeneratorConfig, Mode};
//!
//! let tree = Element::from_json(&std::fs::read_to_string("wayland.json")?)?;
//! let config = GeneratorConfig::new().with_skipped_interface("wl_display");
//!
//! let contract = generate(&tree, Mode::Contract, &config)?;
//! let glue = generate(&tree, Mode::Glue, &config)?;
//! std::fs::write(contract.file_name(), &contract.code)?;
//! std::fs::write(glue.file_name(), &glue.code)?;
//! ```
//!
//! ## Type mapping
//!
//! | Schema type | Native | Request parameter | Event payload |
//! |-------------|--------|-------------------|---------------|
//! | `int` | `i32` | `i32` | `i32` |
//! | `uint` | `u32` | `u32` | `u32` |
//! | `fixed` | `i32` | `Fixed` | `Fixed` |
//! | `fd` | `i32` | `BorrowedFd<'_>` | `OwnedFd` |
//! | `string` | `*const c_char` | `&str` | `String` |
//! | `array` | `*mut wl_array` | `&[u8]` | `Vec<u8>` |
//! | `object` | `*mut <iface>` | `&Wrapper` | `Option<ObjectRef<Wrapper>>` |
//! | `new_id` | `*mut <iface>` | return value | `NewObject<Wrapper>` |
//!
//! Nullable strings and objects become `Option`s, and `int`/`uint` arguments
//! naming an enum use the enum's newtype.

pub mod dom;
pub mod error;
pub mod generator;
pub mod ir;

pub use error::{GenError, GenResult};
pub use generator::{
    BindingGenerator, ContractEmitter, GeneratedArtifact, GeneratorConfig, GlueEmitter,
    IndentStyle, LineEnding, Mode,
};
pub use ir::{Protocol, SchemaBuilder};

use tracing::debug;

/// Build the schema model from a parsed document tree.
pub fn build_protocol(tree: &dom::Element) -> GenResult<Protocol> {
    SchemaBuilder::new().build(tree)
}

/// Render one artifact for the protocol described by `tree`.
///
/// Every interface is rendered in memory before the artifact is returned, so
/// an error never leaves a partial artifact behind.
pub fn generate(tree: &dom::Element, mode: Mode, config: &GeneratorConfig) -> GenResult<GeneratedArtifact> {
    let protocol = build_protocol(tree)?;
    let emitter = generator::emitter(mode);
    debug!(protocol = %protocol.name, generator = emitter.name(), "generating");
    emitter.generate(&protocol, config)
}
