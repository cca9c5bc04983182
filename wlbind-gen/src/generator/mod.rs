//! Code generator module.
//!
//! This module defines the generator trait and the two emitters, along with
//! the type mapping and signature rules they share.

pub mod contract;
pub mod glue;
pub mod signature;
pub mod source;
pub mod traits;
pub mod type_mapper;

pub use contract::ContractEmitter;
pub use glue::GlueEmitter;
pub use signature::{ReturnShape, Signature, SignatureDeriver};
pub use traits::{BindingGenerator, GeneratedArtifact, GeneratorConfig, IndentStyle, LineEnding, Mode};
pub use type_mapper::{Context, TypeMapper};

use crate::error::GenResult;
use crate::ir::naming::check_type_names;
use crate::ir::{Interface, Protocol};

/// The emitter for `mode`.
pub fn emitter(mode: Mode) -> Box<dyn BindingGenerator> {
    match mode {
        Mode::Contract => Box::new(ContractEmitter::new()),
        Mode::Glue => Box::new(GlueEmitter::new()),
    }
}

/// Interfaces rendered under `config`, in schema order.
///
/// Fails when two of them would generate types of the same name.
pub(crate) fn rendered_interfaces<'p>(
    protocol: &'p Protocol,
    config: &GeneratorConfig,
) -> GenResult<Vec<&'p Interface>> {
    let rendered: Vec<&Interface> = protocol
        .interfaces
        .iter()
        .filter(|iface| !config.is_skipped(&iface.name))
        .collect();
    check_type_names(rendered.iter().copied())?;
    Ok(rendered)
}
