//! Generates contract and glue for the wayland and xdg-shell fixtures so
//! the crate compiles exactly what `wlbind-gen` writes.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use wlbind_gen::dom::Element;
use wlbind_gen::{generate, GeneratorConfig, Mode};

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let fixtures = manifest_dir.join("../wlbind-gen/tests/fixtures");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    // wl_display is owned by the connection, never by a wrapper.
    let wayland = GeneratorConfig::new()
        .with_ffi_path("crate::ffi")
        .with_skipped_interface("wl_display");
    let xdg_shell = GeneratorConfig::new()
        .with_ffi_path("crate::ffi")
        .with_import("crate::wayland::WlSeat")
        .with_import("crate::wayland::WlSurface");

    for (fixture, config) in [("wayland.json", &wayland), ("xdg_shell.json", &xdg_shell)] {
        let path = fixtures.join(fixture);
        println!("cargo:rerun-if-changed={}", path.display());

        let tree = Element::from_json(&fs::read_to_string(&path)?)?;
        for mode in Mode::ALL {
            let artifact = generate(&tree, mode, config)?;
            fs::write(out_dir.join(artifact.file_name()), &artifact.code)?;
        }
    }
    Ok(())
}
