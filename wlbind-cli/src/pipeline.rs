//! Schema file to artifact text.

use crate::config::Config;
use crate::error::CliResult;
use crate::reader::SchemaReader;
use std::path::{Path, PathBuf};
use wlbind_gen::{GeneratedArtifact, Mode};

/// Render one artifact for the schema at `input`.
pub fn render(input: &Path, mode: Mode, config: &Config) -> CliResult<GeneratedArtifact> {
    let generator_config = config.generator_config()?;
    let tree = SchemaReader::new().read(input)?;
    let artifact = wlbind_gen::generate(&tree, mode, &generator_config)?;
    tracing::info!(
        protocol = %artifact.protocol,
        mode = %mode,
        interfaces = artifact.interfaces.len(),
        "rendered artifact"
    );
    Ok(artifact)
}

/// Where an artifact goes: an explicit path wins, `-` means stdout, and
/// without either the configured output directory is used if there is one.
pub fn destination(output: Option<&Path>, artifact: &GeneratedArtifact, config: &Config) -> Option<PathBuf> {
    match output {
        Some(path) if path == Path::new("-") => None,
        Some(path) => Some(path.to_path_buf()),
        None => config
            .output
            .dir
            .as_ref()
            .map(|dir| dir.join(artifact.file_name())),
    }
}

/// Whether `existing` is exactly what would be generated now.
pub fn is_up_to_date(existing: &str, artifact: &GeneratedArtifact) -> bool {
    existing == artifact.code
}
