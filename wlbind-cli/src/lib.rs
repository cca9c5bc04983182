//! # wlbind-cli
//!
//! CLI library for generating Rust client bindings from Wayland protocol
//! schemas.
//!
//! ## Architecture
//!
//! - [`config`] - `wlbind.toml` loading and CLI overrides
//! - [`reader`] - schema tree loading
//! - [`pipeline`] - schema file to artifact text
//! - [`writer`] - atomic file output and dry-run support
//! - [`error`] - error types and exit codes

pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use reader::SchemaReader;
pub use writer::FileWriter;
