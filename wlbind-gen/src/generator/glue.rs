//! Glue artifact emitter.
//!
//! The glue connects the contract to the native library. For every
//! interface it renders:
//!
//! - the `Deleter` impl forwarding to `<interface>_destroy`
//! - the `Proxy` impl, whose constructor adopts the native handle and, if
//!   the interface has events, registers the listener table before the
//!   wrapper is handed out
//! - one `extern "C"` callback per event, republishing the converted
//!   arguments on the event's channel
//! - the `#[repr(C)]` listener table, one positional slot per event in
//!   schema order, held in a `static`
//! - the requests trait impl forwarding each method to `<interface>_<request>`,
//!   and `dispose` to the destructor request or `<interface>_destroy`
//! - bit operations for bitfield enums

use tracing::{debug, info};

use crate::error::GenResult;
use crate::generator::rendered_interfaces;
use crate::generator::signature::{
    CallArg, EventSignature, Output, ReturnShape, Signature, SignatureDeriver,
};
use crate::generator::source::SourceWriter;
use crate::generator::traits::{BindingGenerator, GeneratedArtifact, GeneratorConfig, Mode};
use crate::generator::type_mapper::{NativeType, TypeMapper, WrapperType};
use crate::ir::naming::{
    deleter_name, enum_name, events_name, listener_name, listener_static, requests_name,
    wrapper_name, NativeSymbols,
};
use crate::ir::{Interface, Protocol};

/// Renders the glue artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlueEmitter;

/// Names shared by every section of one interface's glue.
struct Names<'a> {
    iface: &'a Interface,
    wrapper: String,
    native: String,
    ffi: &'a str,
    rt: &'a str,
}

impl GlueEmitter {
    /// Create a new glue emitter.
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
        let symbols = NativeSymbols::new(&iface.name)?;
        let deriver = SignatureDeriver::new(mapper);
        let events = deriver.events(iface)?;
        let ops = deriver.operations(iface)?;
        let names = Names {
            iface,
            wrapper: wrapper_name(&iface.name),
            native: format!("{}::{}", config.ffi_path, iface.name),
            ffi: &config.ffi_path,
            rt: &config.runtime_path,
        };

        self.emit_deleter(w, &names, &symbols);
        self.emit_proxy(w, &names, &symbols);
        if !events.is_empty() {
            self.emit_listener(w, &names, &events, mapper);
        }
        if !ops.requests.is_empty() || ops.dispose.is_some() {
            w.open(format!("impl {} for {}", requests_name(&iface.name), names.wrapper));
            for (index, sig) in ops.requests.iter().enumerate() {
                if index > 0 {
                    w.blank();
                }
                self.emit_request(w, &names, sig, mapper);
            }
            if let Some(dispose) = &ops.dispose {
                if !ops.requests.is_empty() {
                    w.blank();
                }
                self.emit_request(w, &names, dispose, mapper);
            }
            w.close();
            w.blank();
        }
        for def in iface.enums.iter().filter(|def| def.bitfield) {
            self.emit_bit_ops(w, &enum_name(&iface.name, &def.name)?);
        }
        Ok(())
    }

    fn emit_deleter(&self, w: &mut SourceWriter, n: &Names<'_>, symbols: &NativeSymbols<'_>) {
        w.open(format!("impl {}::Deleter for {}", n.rt, deleter_name(&n.iface.name)));
        w.line(format!("type Native = {};", n.native));
        w.blank();
        w.open(format!("unsafe fn delete(ptr: *mut {})", n.native));
        w.line(format!("unsafe {{ {}::{}(ptr); }}", n.ffi, symbols.destroy()));
        w.close();
        w.close();
        w.blank();
    }

    fn emit_proxy(&self, w: &mut SourceWriter, n: &Names<'_>, symbols: &NativeSymbols<'_>) {
        let iface = n.iface;
        w.open(format!("impl {}::Proxy for {}", n.rt, n.wrapper));
        w.line(format!("type Native = {};", n.native));
        w.line(format!("const INTERFACE_NAME: &'static str = \"{}\";", iface.name));
        w.line(format!("const VERSION: u32 = {};", iface.version));
        w.blank();

        w.open(format!("unsafe fn from_raw(ptr: *mut {}) -> Self", n.native));
        w.line(format!(
            "let hnd = unsafe {{ {}::OwnedHandle::adopt(ptr, Self::INTERFACE_NAME) }};",
            n.rt
        ));
        if iface.has_events() {
            w.line(format!("let events = Box::<{}>::default();", events_name(&iface.name)));
            w.open("unsafe");
            w.line(format!("{}::{}(", n.ffi, symbols.add_listener()));
            w.continued("ptr,");
            w.continued(format!(
                "&{} as *const {} as *const {}::{},",
                listener_static(&iface.name),
                listener_name(&iface.name),
                n.ffi,
                symbols.listener()
            ));
            w.continued(format!("{}::user_data::of(&*events),", n.rt));
            w.line(");");
            w.close();
            w.line("Self { hnd, events }");
        } else {
            w.line("Self { hnd }");
        }
        w.close();
        w.blank();

        w.open(format!("fn as_ptr(&self) -> *mut {}", n.native));
        w.line("self.hnd.as_ptr()");
        w.close();
        w.blank();

        w.open(format!("fn into_raw(self) -> *mut {}", n.native));
        if iface.has_events() {
            // the installed listener keeps pointing at the channels
            w.line("let _ = Box::leak(self.events);");
        }
        w.line("self.hnd.into_raw()");
        w.close();
        w.blank();

        w.line("#[allow(unused_unsafe)]");
        w.open("fn interface() -> *const ::std::ffi::c_void");
        w.line(format!(
            "unsafe {{ ::std::ptr::addr_of!({}::{}).cast() }}",
            n.ffi,
            symbols.descriptor()
        ));
        w.close();
        w.close();
        w.blank();
    }

    fn emit_listener(
        &self,
        w: &mut SourceWriter,
        n: &Names<'_>,
        events: &[EventSignature],
        mapper: &TypeMapper,
    ) {
        let iface = n.iface;
        let head = format!("*mut ::std::ffi::c_void, *mut {}", n.native);

        // Callbacks
        w.open(format!("impl {}", n.wrapper));
        for (index, event) in events.iter().enumerate() {
            if index > 0 {
                w.blank();
            }
            let mut params = vec![
                "__data: *mut ::std::ffi::c_void".to_string(),
                format!("__proxy: *mut {}", n.native),
            ];
            params.extend(
                event
                    .args
                    .iter()
                    .zip(event.native_types(mapper))
                    .map(|(arg, ty)| format!("{}: {}", arg.name, ty)),
            );
            w.open(format!("unsafe extern \"C\" fn {}({})", event.callback, params.join(", ")));
            w.open("unsafe");
            w.line(format!(
                "let __events = {}::user_data::recover::<{}>(__data);",
                n.rt,
                events_name(&iface.name)
            ));
            w.line(format!("__events.{}.emit(&{});", event.channel, event.payload_expr(mapper)));
            w.close();
            w.close();
        }
        w.close();
        w.blank();

        // Listener table
        w.line("#[repr(C)]");
        w.line("#[allow(dead_code)]");
        w.line(format!("struct {}(", listener_name(&iface.name)));
        for event in events {
            let mut slot = vec![head.clone()];
            slot.extend(event.native_types(mapper));
            w.continued(format!("unsafe extern \"C\" fn({}),", slot.join(", ")));
        }
        w.line(");");
        w.blank();

        w.line(format!(
            "static {}: {} = {}(",
            listener_static(&iface.name),
            listener_name(&iface.name),
            listener_name(&iface.name)
        ));
        for event in events {
            w.continued(format!("{}::{},", n.wrapper, event.callback));
        }
        w.line(");");
        w.blank();
    }

    fn emit_request(&self, w: &mut SourceWriter, n: &Names<'_>, sig: &Signature, mapper: &TypeMapper) {
        w.open(sig.render_decl(mapper, n.rt));

        let conversions: Vec<_> = sig
            .params
            .iter()
            .map(|p| mapper.param_to_native(&p.name, &p.ty))
            .collect();
        for setup in conversions.iter().filter_map(|c| c.setup.as_deref()) {
            w.line(setup);
        }

        let outs: &[Output] = match &sig.ret {
            ReturnShape::Tuple(outs) => outs,
            _ => &[],
        };
        for (index, out) in outs.iter().enumerate() {
            if let WrapperType::NewId { interface } = &out.ty {
                w.line(format!(
                    "let mut __out_{}: {} = ::std::ptr::null_mut();",
                    index,
                    mapper.native(&NativeType::Object(interface.clone()))
                ));
            }
        }

        let mut args = if sig.consumes {
            w.line("let __ptr = self.hnd.into_raw();");
            vec!["__ptr".to_string()]
        } else {
            vec!["self.hnd.as_ptr()".to_string()]
        };
        for call in &sig.call {
            match call {
                CallArg::Input(index) => args.push(conversions[*index].expr.clone()),
                CallArg::Bind => {
                    args.push("P::interface().cast()".to_string());
                    args.push("version".to_string());
                }
                CallArg::OutSlot(index) => args.push(format!("&mut __out_{}", index)),
            }
        }
        let call = format!("{}::{}({})", n.ffi, sig.symbol, args.join(", "));

        w.open("unsafe");
        match &sig.ret {
            ReturnShape::Unit => w.line(format!("{};", call)),
            ReturnShape::Single(out) | ReturnShape::Bound(out) => {
                w.line(format!("let __native = {};", call));
                w.line(mapper.native_to_output("__native", &out.ty));
            }
            ReturnShape::Tuple(outs) => {
                w.line(format!("{};", call));
                let wrapped: Vec<_> = outs
                    .iter()
                    .enumerate()
                    .map(|(index, out)| mapper.native_to_output(&format!("__out_{}", index), &out.ty))
                    .collect();
                w.line(format!("({})", wrapped.join(", ")));
            }
        }
        w.close();
        w.close();
    }

    fn emit_bit_ops(&self, w: &mut SourceWriter, name: &str) {
        for (tr, method, op) in [("BitOr", "bitor", "|"), ("BitAnd", "bitand", "&")] {
            w.open(format!("impl ::std::ops::{} for {}", tr, name));
            w.line("type Output = Self;");
            w.blank();
            w.open(format!("fn {}(self, rhs: Self) -> Self", method));
            w.line(format!("Self(self.0 {} rhs.0)", op));
            w.close();
            w.close();
            w.blank();
        }
        w.open(format!("impl {}", name));
        w.line("/// Whether every bit of `other` is set.");
        w.open("pub fn contains(self, other: Self) -> bool");
        w.line("self.0 & other.0 == other.0");
        w.close();
        w.close();
        w.blank();
    }
}

impl BindingGenerator for GlueEmitter {
    fn mode(&self) -> Mode {
        Mode::Glue
    }

    fn name(&self) -> &'static str {
        "glue emitter"
    }

    fn generate(&self, protocol: &Protocol, config: &GeneratorConfig) -> GenResult<GeneratedArtifact> {
        let mapper = TypeMapper::new(config);
        let mut w = SourceWriter::new(config);
        let mut rendered = Vec::new();

        for line in self.generate_preamble(protocol, config).lines() {
            w.line(line);
        }
        w.blank();

        for iface in rendered_interfaces(protocol, config)? {
            self.emit_interface(&mut w, iface, &mapper, config)?;
            debug!(interface = %iface.name, events = iface.events.len(), "emitted glue");
            rendered.push(iface.name.clone());
        }

        let code = w.finish();

        info!(protocol = %protocol.name, interfaces = rendered.len(), "glue generated");
        Ok(GeneratedArtifact::new(code, Mode::Glue, protocol.name.as_str()).with_interfaces(rendered))
    }
}
