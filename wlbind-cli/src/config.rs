//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `wlbind.toml` files,
//! merging command-line arguments over it and turning the result into a
//! [`GeneratorConfig`].

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wlbind_gen::{GeneratorConfig, IndentStyle, LineEnding};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "wlbind.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Code generation settings.
    pub codegen: CodegenConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `<protocol>_<mode>.rs` when no output path is
    /// given. Without it the artifact goes to stdout.
    pub dir: Option<PathBuf>,

    /// Indentation: `spaces2`, `spaces4` or `tabs`.
    pub indent: String,

    /// Line endings: `lf` or `crlf`.
    pub line_ending: String,
}

/// Code generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Module declaring the native symbols.
    pub ffi_path: String,

    /// Path of the runtime support crate.
    pub runtime_path: String,

    /// Whether to carry schema summaries into doc comments.
    pub generate_docs: bool,

    /// Extra `use` paths for the contract.
    pub imports: Vec<String>,

    /// Interfaces left out of both artifacts.
    pub skip_interfaces: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            indent: "spaces4".to_string(),
            line_ending: "lf".to_string(),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            ffi_path: defaults.ffi_path,
            runtime_path: defaults.runtime_path,
            generate_docs: defaults.generate_docs,
            imports: Vec::new(),
            skip_interfaces: Vec::new(),
        }
    }
}

impl Config {
    /// Build the generator configuration.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let indent = match self.output.indent.as_str() {
            "spaces2" => IndentStyle::Spaces2,
            "spaces4" => IndentStyle::Spaces4,
            "tabs" => IndentStyle::Tabs,
            other => {
                return Err(ConfigError::invalid_value(
                    "output.indent",
                    format!("expected spaces2, spaces4 or tabs, found '{}'", other),
                )
                .into())
            }
        };
        let line_ending = match self.output.line_ending.as_str() {
            "lf" => LineEnding::Lf,
            "crlf" => LineEnding::CrLf,
            other => {
                return Err(ConfigError::invalid_value(
                    "output.line_ending",
                    format!("expected lf or crlf, found '{}'", other),
                )
                .into())
            }
        };

        let codegen = &self.codegen;
        let mut config = GeneratorConfig::new()
            .with_ffi_path(codegen.ffi_path.as_str())
            .with_runtime_path(codegen.runtime_path.as_str())
            .with_generate_docs(codegen.generate_docs)
            .with_indent(indent)
            .with_line_ending(line_ending);
        for import in &codegen.imports {
            config = config.with_import(import.as_str());
        }
        for interface in &codegen.skip_interfaces {
            config = config.with_skipped_interface(interface.as_str());
        }
        Ok(config)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path, `wlbind.toml` in the working directory is tried. A
    /// missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&config_path, &content)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration text read from `path`.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()).into())
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref dir) = args.output_dir {
            config.output.dir = Some(dir.clone());
        }

        if let Some(ref ffi_path) = args.ffi_path {
            config.codegen.ffi_path = ffi_path.clone();
        }

        if let Some(ref runtime_path) = args.runtime_path {
            config.codegen.runtime_path = runtime_path.clone();
        }

        if args.no_docs {
            config.codegen.generate_docs = false;
        }

        config
            .codegen
            .skip_interfaces
            .extend(args.skip_interfaces.iter().cloned());

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# wlbind configuration file

[output]
# Directory receiving <protocol>_<mode>.rs when no output path is given.
# Without it the artifact is written to stdout.
# dir = "src/protocols"

# Indentation of generated code (spaces2, spaces4, tabs)
indent = "spaces4"

# Line endings of generated code (lf, crlf)
line_ending = "lf"

[codegen]
# Module declaring the native symbols, as seen from the generated code
ffi_path = "ffi"

# Path of the runtime support crate
runtime_path = "wlbind"

# Carry schema summaries into doc comments
generate_docs = true

# Extra `use` paths emitted at the top of the contract
imports = []

# Interfaces left out of both artifacts
skip_interfaces = ["wl_display"]
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output_dir: Option<PathBuf>,

    /// Native module path override.
    pub ffi_path: Option<String>,

    /// Runtime crate path override.
    pub runtime_path: Option<String>,

    /// Disable doc comments.
    pub no_docs: bool,

    /// Interfaces to skip in addition to the configured ones.
    pub skip_interfaces: Vec<String>,
}
