//! Binding generator trait definition.
//!
//! This module defines the `BindingGenerator` trait implemented by the two
//! emitters and the configuration they share. A protocol always produces a
//! pair of artifacts, each from its own run:
//!
//! - [`Mode::Contract`]: the public surface (wrappers, events, request
//!   traits, enums).
//! - [`Mode::Glue`]: the implementation connecting that surface to the
//!   native library.

use std::fmt;
use std::str::FromStr;

use crate::error::GenResult;
use crate::ir::Protocol;

/// Trait for artifact emitters.
///
/// # Example
///
/// ```rust,ignore
/// use wlbind_gen::generator::{BindingGenerator, ContractEmitter, GeneratorConfig};
///
/// let emitter = ContractEmitter::new();
/// let artifact = emitter.generate(&protocol, &GeneratorConfig::default())?;
/// std::fs::write("wayland_contract.rs", artifact.code)?;
/// ```
pub trait BindingGenerator {
    /// Which artifact this generator produces.
    fn mode(&self) -> Mode;

    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Render the whole artifact for `protocol`.
    ///
    /// Either every interface renders or an error is returned; there is no
    /// partial output.
    fn generate(&self, protocol: &Protocol, config: &GeneratorConfig) -> GenResult<GeneratedArtifact>;

    /// Header comment placed at the top of the artifact.
    fn generate_preamble(&self, protocol: &Protocol, config: &GeneratorConfig) -> String {
        let nl = config.line_ending_str();
        format!(
            "// Generated by wlbind-gen from the `{}` protocol ({}). Do not edit.{}",
            protocol.name,
            self.mode(),
            nl
        )
    }
}

/// Artifact kind, selected per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Public surface.
    Contract,
    /// Native wiring.
    Glue,
}

impl Mode {
    /// Both modes, in the order a build usually runs them.
    pub const ALL: [Mode; 2] = [Mode::Contract, Mode::Glue];

    /// Lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Contract => "contract",
            Mode::Glue => "glue",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contract" => Ok(Mode::Contract),
            "glue" => Ok(Mode::Glue),
            other => Err(format!(
                "unknown mode '{}', expected 'contract' or 'glue'",
                other
            )),
        }
    }
}

/// Generator configuration options.
///
/// Both artifacts of a protocol must be generated with the same
/// configuration: the glue refers to names the contract declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the module declaring the native symbols.
    pub ffi_path: String,

    /// Path of the runtime support crate.
    pub runtime_path: String,

    /// Whether to carry schema summaries into `///` comments.
    pub generate_docs: bool,

    /// Extra `use` paths emitted at the top of the contract, e.g. wrappers
    /// of another protocol referenced by this one.
    pub imports: Vec<String>,

    /// Interfaces left out of both artifacts.
    pub skip_interfaces: Vec<String>,

    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ffi_path: "ffi".to_string(),
            runtime_path: "wlbind".to_string(),
            generate_docs: true,
            imports: Vec::new(),
            skip_interfaces: Vec::new(),
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native module path.
    pub fn with_ffi_path(mut self, path: impl Into<String>) -> Self {
        self.ffi_path = path.into();
        self
    }

    /// Set the runtime crate path.
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Set whether to generate documentation comments.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    /// Add an import emitted in the contract.
    pub fn with_import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    /// Leave an interface out of the generated artifacts.
    pub fn with_skipped_interface(mut self, interface: impl Into<String>) -> Self {
        self.skip_interfaces.push(interface.into());
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Whether `interface` is on the skip list.
    pub fn is_skipped(&self, interface: &str) -> bool {
        self.skip_interfaces.iter().any(|name| name == interface)
    }

    /// Get the indentation string based on current settings.
    pub fn indent_str(&self) -> &str {
        self.indent.as_str()
    }

    /// Get the line ending string based on current settings.
    pub fn line_ending_str(&self) -> &str {
        self.line_ending.as_str()
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Use 2 spaces for indentation
    Spaces2,

    /// Use 4 spaces for indentation (rustfmt default)
    #[default]
    Spaces4,

    /// Use tabs for indentation
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// The generated source text.
    pub code: String,

    /// Artifact kind.
    pub mode: Mode,

    /// Protocol the artifact was generated from.
    pub protocol: String,

    /// Interfaces rendered, in schema order.
    pub interfaces: Vec<String>,
}

impl GeneratedArtifact {
    /// Create a new artifact.
    pub fn new(code: impl Into<String>, mode: Mode, protocol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            mode,
            protocol: protocol.into(),
            interfaces: Vec::new(),
        }
    }

    /// Set the rendered interfaces.
    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    /// Conventional file name, e.g. `wayland_glue.rs`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.rs", self.protocol, self.mode)
    }
}
