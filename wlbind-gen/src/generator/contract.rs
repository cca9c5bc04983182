//! Contract artifact emitter.
//!
//! The contract is the public surface of a protocol's bindings. For every
//! interface it declares:
//!
//! - a deleter type, implemented in the glue by `<interface>_destroy`
//! - the wrapper struct owning one native handle
//! - the events struct, one [`Signal`] channel per event in schema order
//! - the requests trait, one method per non-destructor request plus
//!   `dispose` when the interface has a destructor or no requests at all
//! - one newtype per enum, with its entries as associated constants
//!
//! [`Signal`]: https://docs.rs/wlbind/latest/wlbind/struct.Signal.html

use tracing::{debug, info};

use crate::error::GenResult;
use crate::generator::signature::SignatureDeriver;
use crate::generator::source::SourceWriter;
use crate::generator::traits::{BindingGenerator, GeneratedArtifact, GeneratorConfig, Mode};
use crate::generator::type_mapper::TypeMapper;
use crate::generator::rendered_interfaces;
use crate::ir::naming::{deleter_name, entry_name, enum_name, events_name, requests_name, wrapper_name};
use crate::ir::{EnumDef, Interface, Protocol};

/// Renders the contract artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractEmitter;

impl ContractEmitter {
    /// Create a new contract emitter.
    pub fn new() -> Self {
        Self
    }

    fn emit_interface(
        &self,
        w: &mut SourceWriter,
        iface: &Interface,
        mapper: &TypeMapper,
        config: &GeneratorConfig,
    ) -> GenResult<()> {
        let rt = &config.runtime_path;
        let docs = config.generate_docs;
        let wrapper = wrapper_name(&iface.name);
        let deriver = SignatureDeriver::new(mapper);
        let events = deriver.events(iface)?;
        let ops = deriver.operations(iface)?;

        // Deleter
        if docs {
            w.line(format!("/// Releases native `{}` objects.", iface.name));
        }
        w.line(format!("pub struct {};", deleter_name(&iface.name)));
        w.blank();

        // Wrapper
        if docs {
            w.doc(iface.summary.as_deref());
        }
        w.line("#[derive(Debug)]");
        w.open(format!("pub struct {}", wrapper));
        w.line(format!("hnd: {}::OwnedHandle<{}>,", rt, deleter_name(&iface.name)));
        if iface.has_events() {
            w.line(format!("events: Box<{}>,", events_name(&iface.name)));
        }
        w.close();
        w.blank();

        // Events
        if iface.has_events() {
            w.open(format!("impl {}", wrapper));
            if docs {
                w.line("/// Event channels of this object.");
            }
            w.open(format!("pub fn events(&self) -> &{}", events_name(&iface.name)));
            w.line("&self.events");
            w.close();
            w.close();
            w.blank();

            if docs {
                w.line(format!("/// Events of [`{}`], in schema order.", wrapper));
            }
            w.line("#[derive(Debug, Default)]");
            w.open(format!("pub struct {}", events_name(&iface.name)));
            for event in &events {
                if docs {
                    w.doc(event.summary.as_deref());
                    since_line(w, event.since);
                }
                w.line(format!(
                    "pub {}: {}::Signal<{}>,",
                    event.channel,
                    rt,
                    event.payload_type(mapper)
                ));
            }
            w.close();
            w.blank();
        }

        // Requests
        if !ops.requests.is_empty() || ops.dispose.is_some() {
            if docs {
                w.line(format!("/// Requests of [`{}`].", wrapper));
            }
            w.open(format!("pub trait {}", requests_name(&iface.name)));
            for (index, sig) in ops.requests.iter().enumerate() {
                if index > 0 {
                    w.blank();
                }
                if docs {
                    w.doc(sig.summary.as_deref());
                    since_line(w, sig.since);
                }
                w.line(format!("{};", sig.render_decl(mapper, rt)));
            }
            if let Some(dispose) = &ops.dispose {
                if !ops.requests.is_empty() {
                    w.blank();
                }
                if docs {
                    match dispose.summary.as_deref() {
                        Some(summary) => w.doc(Some(summary)),
                        None => w.line("/// Destroy the object."),
                    }
                    since_line(w, dispose.since);
                }
                w.line(format!("{};", dispose.render_decl(mapper, rt)));
            }
            w.close();
            w.blank();
        }

        for def in &iface.enums {
            self.emit_enum(w, iface, def, docs)?;
        }

        Ok(())
    }

    fn emit_enum(&self, w: &mut SourceWriter, iface: &Interface, def: &EnumDef, docs: bool) -> GenResult<()> {
        let name = enum_name(&iface.name, &def.name)?;

        let mut constants: Vec<String> = Vec::with_capacity(def.entries.len());
        for entry in &def.entries {
            let constant = entry_name(&iface.name, &entry.name)?;
            if constants.contains(&constant) {
                return Err(crate::error::GenError::naming(
                    iface.name.as_str(),
                    format!("{}.{}", def.name, entry.name),
                    format!("enum entry constant {} is defined twice", constant),
                ));
            }
            constants.push(constant);
        }

        if docs {
            w.doc(def.summary.as_deref());
        }
        w.line("#[repr(transparent)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]");
        w.line(format!("pub struct {}(pub u32);", name));
        w.blank();

        if !def.entries.is_empty() {
            w.open(format!("impl {}", name));
            for (entry, constant) in def.entries.iter().zip(&constants) {
                if docs {
                    w.doc(entry.summary.as_deref());
                }
                w.line(format!("pub const {}: Self = Self({});", constant, entry.value));
            }
            w.close();
            w.blank();
        }
        Ok(())
    }
}

impl BindingGenerator for ContractEmitter {
    fn mode(&self) -> Mode {
        Mode::Contract
    }

    fn name(&self) -> &'static str {
        "contract emitter"
    }

    fn generate(&self, protocol: &Protocol, config: &GeneratorConfig) -> GenResult<GeneratedArtifact> {
        let mapper = TypeMapper::new(config);
        let mut w = SourceWriter::new(config);
        let mut rendered = Vec::new();

        for line in self.generate_preamble(protocol, config).lines() {
            w.line(line);
        }
        w.blank();

        if !config.imports.is_empty() {
            for import in &config.imports {
                w.line(format!("use {};", import));
            }
            w.blank();
        }

        for iface in rendered_interfaces(protocol, config)? {
            self.emit_interface(&mut w, iface, &mapper, config)?;
            debug!(interface = %iface.name, "emitted contract");
            rendered.push(iface.name.clone());
        }

        let code = w.finish();

        info!(protocol = %protocol.name, interfaces = rendered.len(), "contract generated");
        Ok(GeneratedArtifact::new(code, Mode::Contract, protocol.name.as_str()).with_interfaces(rendered))
    }
}

fn since_line(w: &mut SourceWriter, since: Option<u32>) {
    if let Some(version) = since {
        w.line("///");
        w.line(format!("/// Available since version {}.", version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::ir::{ArgKind, Argument, EnumEntry, Event, Request};

    fn callback() -> Interface {
        Interface {
            name: "wl_callback".to_string(),
            version: 1,
            requests: vec![],
            events: vec![Event {
                name: "done".to_string(),
                args: vec![Argument::new("callback_data", ArgKind::Uint)],
                since: None,
                summary: Some("done event".to_string()),
            }],
            enums: vec![],
            summary: Some("callback object".to_string()),
        }
    }

    fn protocol(interfaces: Vec<Interface>) -> Protocol {
        Protocol {
            name: "demo".to_string(),
            interfaces,
        }
    }

    fn contract(protocol: &Protocol) -> String {
        ContractEmitter::new()
            .generate(protocol, &GeneratorConfig::default())
            .unwrap()
            .code
    }

    #[test]
    fn test_callback_contract() {
        let code = contract(&protocol(vec![callback()]));

        assert!(code.starts_with("// Generated by wlbind-gen from the `demo` protocol (contract). Do not edit.\n"));
        assert!(code.contains("pub struct WlCallbackDeleter;"));
        assert!(code.contains("    hnd: wlbind::OwnedHandle<WlCallbackDeleter>,\n"));
        assert!(code.contains("    events: Box<WlCallbackEvents>,\n"));
        assert!(code.contains("    /// done event\n    pub on_done: wlbind::Signal<u32>,\n"));
        assert!(code.contains("/// callback object\n#[derive(Debug)]\npub struct WlCallback {"));
        // no requests at all: dispose only
        assert!(code.contains("pub trait WlCallbackRequests {\n    /// Destroy the object.\n    fn dispose(self);\n}"));
        assert!(code.ends_with("}\n"));
        assert!(!code.ends_with("\n\n"));
    }

    #[test]
    fn test_requests_trait_and_dispose() {
        let buffer = Interface {
            name: "wl_buffer".to_string(),
            version: 1,
            requests: vec![Request {
                name: "destroy".to_string(),
                args: vec![],
                is_destructor: true,
                since: None,
                summary: None,
            }],
            events: vec![Event {
                name: "release".to_string(),
                args: vec![],
                since: None,
                summary: None,
            }],
            enums: vec![],
            summary: None,
        };
        let code = contract(&protocol(vec![buffer]));

        assert!(code.contains("pub trait WlBufferRequests {\n    /// Destroy the object.\n    fn dispose(self);\n}"));
        assert!(code.contains("pub on_release: wlbind::Signal<()>,"));
    }

    #[test]
    fn test_destructor_with_output() {
        let lease_request = Interface {
            name: "wp_drm_lease_request_v1".to_string(),
            version: 1,
            requests: vec![Request {
                name: "submit".to_string(),
                args: vec![Argument::new(
                    "id",
                    ArgKind::NewId {
                        interface: Some("wp_drm_lease_v1".to_string()),
                    },
                )],
                is_destructor: true,
                since: None,
                summary: Some("submit the lease request".to_string()),
            }],
            events: vec![],
            enums: vec![],
            summary: None,
        };
        let code = contract(&protocol(vec![lease_request]));

        assert!(code.contains(
            "pub trait WpDrmLeaseRequestV1Requests {\n    /// submit the lease request\n    fn dispose(self) -> WpDrmLeaseV1;\n}"
        ));
    }

    #[test]
    fn test_enum_named_like_another_wrapper() {
        let mut shm = callback();
        shm.name = "wl_shm".to_string();
        shm.enums.push(EnumDef {
            name: "pool".to_string(),
            bitfield: false,
            entries: vec![],
            summary: None,
        });
        let mut pool = callback();
        pool.name = "wl_shm_pool".to_string();

        let err = ContractEmitter::new()
            .generate(&protocol(vec![shm, pool]), &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::NamingConventionViolation { ref symbol, .. } if symbol == "WlShmPool"
        ));
    }

    #[test]
    fn test_no_events_means_no_events_field() {
        let region = Interface {
            name: "wl_region".to_string(),
            version: 1,
            requests: vec![Request {
                name: "add".to_string(),
                args: vec![
                    Argument::new("x", ArgKind::Int),
                    Argument::new("y", ArgKind::Int),
                ],
                is_destructor: false,
                since: None,
                summary: None,
            }],
            events: vec![],
            enums: vec![],
            summary: None,
        };
        let code = contract(&protocol(vec![region]));

        assert!(!code.contains("events: Box<"));
        assert!(!code.contains("WlRegionEvents"));
        assert!(code.contains("    fn add(&self, x: i32, y: i32);\n"));
    }

    #[test]
    fn test_enum_newtype() {
        let mut shm = Interface {
            name: "wl_shm".to_string(),
            version: 1,
            requests: vec![],
            events: vec![],
            enums: vec![EnumDef {
                name: "format".to_string(),
                bitfield: false,
                entries: vec![
                    EnumEntry {
                        name: "argb8888".to_string(),
                        value: 0,
                        summary: Some("32-bit ARGB format".to_string()),
                    },
                    EnumEntry {
                        name: "xrgb8888".to_string(),
                        value: 1,
                        summary: None,
                    },
                ],
                summary: None,
            }],
            summary: None,
        };
        let code = contract(&protocol(vec![shm.clone()]));

        assert!(code.contains("#[repr(transparent)]\n#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]\npub struct WlShmFormat(pub u32);"));
        assert!(code.contains("    /// 32-bit ARGB format\n    pub const ARGB8888: Self = Self(0);\n    pub const XRGB8888: Self = Self(1);\n"));

        shm.enums[0].entries[1].name = "ARGB8888".to_string();
        let err = ContractEmitter::new()
            .generate(&protocol(vec![shm]), &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, GenError::NamingConventionViolation { .. }));
    }

    #[test]
    fn test_docs_can_be_disabled() {
        let config = GeneratorConfig::new().with_generate_docs(false);
        let code = ContractEmitter::new()
            .generate(&protocol(vec![callback()]), &config)
            .unwrap()
            .code;
        assert!(!code.contains("///"));
    }

    #[test]
    fn test_imports_and_skip_list() {
        let config = GeneratorConfig::new()
            .with_import("super::wayland::WlSurface")
            .with_skipped_interface("wl_callback");
        let artifact = ContractEmitter::new()
            .generate(&protocol(vec![callback()]), &config)
            .unwrap();

        assert!(artifact.code.contains("\nuse super::wayland::WlSurface;\n"));
        assert!(!artifact.code.contains("WlCallback"));
        assert!(artifact.interfaces.is_empty());
    }
}
