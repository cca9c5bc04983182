//! Request signature derivation.
//!
//! A request's arguments split into inputs (everything but `new_id`) and
//! outputs (`new_id`), keeping schema order within each group. Inputs become
//! the method parameters; outputs decide the return shape:
//!
//! | Outputs | Return |
//! |---------|--------|
//! | none | nothing |
//! | one | the wrapper of that output's interface |
//! | several | a tuple of their wrappers, in order |
//! | one, without interface | a caller-chosen `P: Proxy`, plus a `version` parameter |
//!
//! The destructor request is not one of the operations; it becomes the
//! `dispose` method, which consumes the wrapper. `dispose` takes the
//! destructor's inputs and returns its outputs, so it has no parameters for
//! the usual argument-less destructor. An interface that declares no
//! requests at all gets a `dispose` bound to `<interface>_destroy`.
//!
//! Events get an [`EventSignature`]: the native callback parameters and the
//! payload published on the event's channel, both in schema order.

use tracing::trace;

use crate::error::{GenError, GenResult};
use crate::generator::type_mapper::{NativeType, Site, TypeMapper, WrapperType};
use crate::ir::naming::{
    callback_name, channel_name, event_name, local_name, method_name, NativeSymbols, DISPOSE,
};
use crate::ir::{Event, Interface, Request};

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Escaped Rust name.
    pub name: String,
    /// Wrapper-facing type.
    pub ty: WrapperType,
}

/// One request output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Escaped Rust name of the schema argument.
    pub name: String,
    /// Always a [`WrapperType::NewId`].
    pub ty: WrapperType,
}

/// What a request method returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// No outputs.
    Unit,
    /// Exactly one typed output.
    Single(Output),
    /// Several outputs, returned as a tuple in schema order.
    Tuple(Vec<Output>),
    /// One output without interface: the caller picks the proxy type.
    Bound(Output),
}

impl ReturnShape {
    /// Number of objects the request creates.
    pub fn arity(&self) -> usize {
        match self {
            ReturnShape::Unit => 0,
            ReturnShape::Single(_) | ReturnShape::Bound(_) => 1,
            ReturnShape::Tuple(outputs) => outputs.len(),
        }
    }
}

/// One argument of the native entry point call, in native order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArg {
    /// The input parameter at this index.
    Input(usize),
    /// Interface descriptor and version of a caller-chosen proxy type.
    Bind,
    /// Out-pointer for the tuple element at this index.
    OutSlot(usize),
}

/// Everything the emitters need to render one request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Escaped method name.
    pub method: String,
    /// Native entry point, `<interface>_<request>`.
    pub symbol: String,
    /// Inputs in schema order.
    pub params: Vec<Param>,
    /// Return shape.
    pub ret: ReturnShape,
    /// Native call arguments after the object pointer.
    pub call: Vec<CallArg>,
    /// Schema summary.
    pub summary: Option<String>,
    /// Version that introduced the request.
    pub since: Option<u32>,
    /// Whether the method takes `self` by value and releases the handle.
    pub consumes: bool,
}

impl Signature {
    /// `dispose` of an interface without requests: no inputs, no outputs,
    /// calling the deleter symbol.
    pub fn implicit_dispose(symbols: &NativeSymbols<'_>) -> Self {
        Self {
            method: DISPOSE.to_string(),
            symbol: symbols.destroy(),
            params: Vec::new(),
            ret: ReturnShape::Unit,
            call: Vec::new(),
            summary: None,
            since: None,
            consumes: true,
        }
    }

    /// Method declaration without body or trailing `;`.
    pub fn render_decl(&self, mapper: &TypeMapper, runtime_path: &str) -> String {
        let receiver = if self.consumes { "self" } else { "&self" };
        let mut params = vec![receiver.to_string()];
        params.extend(
            self.params
                .iter()
                .map(|p| format!("{}: {}", p.name, mapper.param(&p.ty))),
        );

        let generics = match self.ret {
            ReturnShape::Bound(_) => {
                params.push("version: u32".to_string());
                format!("<P: {}::Proxy>", runtime_path)
            }
            _ => String::new(),
        };

        let ret = match &self.ret {
            ReturnShape::Unit => String::new(),
            ReturnShape::Single(out) | ReturnShape::Bound(out) => {
                format!(" -> {}", mapper.output(&out.ty))
            }
            ReturnShape::Tuple(outs) => format!(
                " -> ({})",
                outs.iter()
                    .map(|o| mapper.output(&o.ty))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        format!("fn {}{}({}){}", self.method, generics, params.join(", "), ret)
    }
}

/// The request surface of one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operations {
    /// Signatures of the non-destructor requests, in schema order.
    pub requests: Vec<Signature>,
    /// `dispose`, when the interface has a destructor request or declares
    /// no requests at all.
    pub dispose: Option<Signature>,
}

/// One event argument, as the native callback receives it and as the
/// channel publishes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventArg {
    /// Escaped Rust name.
    pub name: String,
    /// Native callback parameter type.
    pub native: NativeType,
    /// Payload type.
    pub ty: WrapperType,
}

/// Everything the emitters need to render one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSignature {
    /// Channel field, `on_<event>`.
    pub channel: String,
    /// Callback function, `handle_<event>`.
    pub callback: String,
    /// Arguments in schema order.
    pub args: Vec<EventArg>,
    /// Schema summary.
    pub summary: Option<String>,
    /// Version that introduced the event.
    pub since: Option<u32>,
}

impl EventSignature {
    /// Payload type of the channel: `()`, the single argument's type, or a
    /// tuple of all argument types.
    pub fn payload_type(&self, mapper: &TypeMapper) -> String {
        match self.args.as_slice() {
            [] => "()".to_string(),
            [only] => mapper.payload(&only.ty),
            many => format!(
                "({})",
                many.iter()
                    .map(|a| mapper.payload(&a.ty))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Expression building the payload from the callback parameters.
    pub fn payload_expr(&self, mapper: &TypeMapper) -> String {
        match self.args.as_slice() {
            [] => "()".to_string(),
            [only] => mapper.native_to_payload(&only.name, &only.ty),
            many => format!(
                "({})",
                many.iter()
                    .map(|a| mapper.native_to_payload(&a.name, &a.ty))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Native types of the callback arguments after the user data and
    /// object pointers.
    pub fn native_types(&self, mapper: &TypeMapper) -> Vec<String> {
        self.args.iter().map(|a| mapper.native(&a.native)).collect()
    }
}

/// Derives request and event signatures.
#[derive(Debug, Clone)]
pub struct SignatureDeriver<'m> {
    mapper: &'m TypeMapper,
}

impl<'m> SignatureDeriver<'m> {
    /// Create a deriver using `mapper` for argument types.
    pub fn new(mapper: &'m TypeMapper) -> Self {
        Self { mapper }
    }

    /// Derive the operations of `iface`.
    pub fn operations(&self, iface: &Interface) -> GenResult<Operations> {
        let symbols = NativeSymbols::new(&iface.name)?;

        let requests = iface
            .operations()
            .map(|req| self.derive(iface, req))
            .collect::<GenResult<Vec<_>>>()?;

        let dispose = match iface.destructor() {
            Some(req) => Some(self.build(iface, req, DISPOSE.to_string(), symbols.request(req)?, true)?),
            None if iface.has_implicit_destructor() => Some(Signature::implicit_dispose(&symbols)),
            None => None,
        };

        Ok(Operations { requests, dispose })
    }

    /// Derive the signatures of all events of `iface`, in schema order.
    pub fn events(&self, iface: &Interface) -> GenResult<Vec<EventSignature>> {
        iface.events.iter().map(|event| self.event(iface, event)).collect()
    }

    /// Derive the signature of one event.
    pub fn event(&self, iface: &Interface, event: &Event) -> GenResult<EventSignature> {
        let name = event_name(&iface.name, &event.name)?;
        let site = Site::event(&iface.name, &event.name);

        let args = event
            .args
            .iter()
            .map(|arg| {
                Ok(EventArg {
                    name: local_name(&iface.name, &event.name, &arg.name)?,
                    native: self.mapper.map_native(arg, site)?,
                    ty: self.mapper.map_wrapper(arg, site)?,
                })
            })
            .collect::<GenResult<Vec<_>>>()?;
        distinct_locals(iface, &event.name, args.iter().map(|a| a.name.as_str()))?;

        trace!(interface = %iface.name, event = %event.name, args = args.len(), "derived event signature");

        Ok(EventSignature {
            channel: channel_name(name),
            callback: callback_name(name),
            args,
            summary: event.summary.clone(),
            since: event.since,
        })
    }

    /// Derive the signature of one non-destructor request.
    pub fn derive(&self, iface: &Interface, request: &Request) -> GenResult<Signature> {
        let symbols = NativeSymbols::new(&iface.name)?;
        let symbol = symbols.request(request)?;
        let method = method_name(&iface.name, &request.name)?;
        self.build(iface, request, method, symbol, false)
    }

    fn build(
        &self,
        iface: &Interface,
        request: &Request,
        method: String,
        symbol: String,
        consumes: bool,
    ) -> GenResult<Signature> {
        let site = Site::request(&iface.name, &request.name);

        let mut params = Vec::new();
        let mut outputs = Vec::new();
        let mut call = Vec::new();
        let mut bind_at = None;

        for arg in &request.args {
            let name = local_name(&iface.name, &request.name, &arg.name)?;
            let ty = self.mapper.map_wrapper(arg, site)?;
            if arg.is_new_id() {
                if matches!(ty, WrapperType::NewId { interface: None }) {
                    bind_at = Some(call.len());
                }
                outputs.push(Output { name, ty });
            } else {
                call.push(CallArg::Input(params.len()));
                params.push(Param { name, ty });
            }
        }

        distinct_locals(
            iface,
            &request.name,
            params.iter().map(|p| p.name.as_str()).chain(outputs.iter().map(|o| o.name.as_str())),
        )?;

        let ret = match (outputs.len(), bind_at) {
            (0, _) => ReturnShape::Unit,
            (1, Some(at)) => {
                if params.iter().any(|p| p.name == "version") {
                    return Err(GenError::naming(
                        iface.name.as_str(),
                        format!("{}.version", request.name),
                        "collides with the version parameter of a generic bind",
                    ));
                }
                call.insert(at, CallArg::Bind);
                ReturnShape::Bound(outputs.remove(0))
            }
            (1, None) => ReturnShape::Single(outputs.remove(0)),
            (_, Some(_)) => {
                let untyped = request
                    .args
                    .iter()
                    .find(|a| a.is_new_id() && a.kind.interface().is_none())
                    .map(|a| a.name.as_str())
                    .unwrap_or_default();
                return Err(GenError::unsupported_kind(
                    "new_id without interface",
                    iface.name.as_str(),
                    request.name.as_str(),
                    untyped,
                ));
            }
            (_, None) => {
                call.extend((0..outputs.len()).map(CallArg::OutSlot));
                ReturnShape::Tuple(outputs)
            }
        };

        trace!(
            interface = %iface.name,
            request = %request.name,
            inputs = params.len(),
            outputs = ret.arity(),
            "derived request signature"
        );

        Ok(Signature {
            method,
            symbol,
            params,
            ret,
            call,
            summary: request.summary.clone(),
            since: request.since,
            consumes,
        })
    }
}

/// Escaping can map two schema names onto one identifier (`self` and
/// `self_`); reject that instead of emitting a duplicate parameter.
fn distinct_locals<'a>(
    iface: &Interface,
    message: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> GenResult<()> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(GenError::naming(
                iface.name.as_str(),
                format!("{}.{}", message, name),
                "two arguments map to the same Rust name",
            ));
        }
        seen.push(name);
    }
    Ok(())
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::ir::{ArgKind, Argument};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_return_shape_law(outputs in proptest::collection::vec(any::<bool>(), 0..8)) {
            let args: Vec<Argument> = outputs
                .iter()
                .enumerate()
                .map(|(i, is_output)| {
                    if *is_output {
                        Argument::new(format!("id{}", i), ArgKind::NewId { interface: Some(format!("wl_obj{}", i)) })
                    } else {
                        Argument::new(format!("arg{}", i), ArgKind::Int)
                    }
                })
                .collect();
            let iface = Interface {
                name: "wl_test".to_string(),
                version: 1,
                requests: vec![Request {
                    name: "go".to_string(),
                    args,
                    is_destructor: false,
                    since: None,
                    summary: None,
                }],
                events: vec![],
                enums: vec![],
                summary: None,
            };

            let mapper = TypeMapper::default();
            let sig = SignatureDeriver::new(&mapper).derive(&iface, &iface.requests[0]).unwrap();
            let count = outputs.iter().filter(|o| **o).count();

            prop_assert_eq!(sig.params.len(), outputs.len() - count);
            prop_assert_eq!(sig.ret.arity(), count);
            match (&sig.ret, count) {
                (ReturnShape::Unit, 0) => {}
                (ReturnShape::Single(out), 1) => {
                    let first = outputs.iter().position(|o| *o).unwrap();
                    prop_assert_eq!(&out.name, &format!("id{}", first));
                }
                (ReturnShape::Tuple(outs), n) if n >= 2 => {
                    let expected: Vec<String> = outputs
                        .iter()
                        .enumerate()
                        .filter(|(_, o)| **o)
                        .map(|(i, _)| format!("id{}", i))
                        .collect();
                    let names: Vec<String> = outs.iter().map(|o| o.name.clone()).collect();
                    prop_assert_eq!(names, expected);
                }
                (shape, n) => prop_assert!(false, "unexpected shape {:?} for {} outputs", shape, n),
            }
        }
    }
}
