//! Schema argument type mappings.
//!
//! This module maps schema arguments to Rust types in two contexts and
//! renders the conversions between them.
//!
//! # Type Mappings
//!
//! | Schema | Native context | Wrapper parameter | Event payload |
//! |--------|----------------|-------------------|---------------|
//! | `int` | `i32` | `i32` | `i32` |
//! | `uint` | `u32` | `u32` | `u32` |
//! | `fixed` | `i32` | `Fixed` | `Fixed` |
//! | `fd` | `i32` | `BorrowedFd<'_>` | `OwnedFd` |
//! | `string` | `*const c_char` | `&str` | `String` |
//! | `array` | `*mut ffi::wl_array` | `&[u8]` | `Vec<u8>` |
//! | `object` | `*mut ffi::<iface>` | `&Wrapper` | `Option<ObjectRef<Wrapper>>` |
//! | `new_id` | `*mut ffi::<iface>` | returned `Wrapper` | `NewObject<Wrapper>` |
//! | `enum` | underlying integer | enum newtype | enum newtype |
//!
//! `allow-null` wraps strings and objects in `Option`. Objects without an
//! interface become `*mut c_void` natively and `AnyObject` in wrappers; a
//! request `new_id` without an interface becomes a caller-chosen proxy type.

use crate::error::{GenError, GenResult};
use crate::generator::traits::GeneratorConfig;
use crate::ir::naming::{enum_type_name, is_identifier, wrapper_name};
use crate::ir::{ArgKind, Argument, IntKind};

/// Which side of the binding a type is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Native ABI signatures: listener slots and entry points.
    Native,
    /// The typed surface seen by users of the wrappers.
    Wrapper,
}

/// Whether an argument belongs to a request or an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client to server.
    Request,
    /// Server to client.
    Event,
}

/// The message an argument belongs to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site<'a> {
    /// Enclosing interface.
    pub interface: &'a str,
    /// Enclosing request or event.
    pub message: &'a str,
    /// Request or event.
    pub direction: Direction,
}

impl<'a> Site<'a> {
    /// An argument of request `message`.
    pub fn request(interface: &'a str, message: &'a str) -> Self {
        Self {
            interface,
            message,
            direction: Direction::Request,
        }
    }

    /// An argument of event `message`.
    pub fn event(interface: &'a str, message: &'a str) -> Self {
        Self {
            interface,
            message,
            direction: Direction::Event,
        }
    }
}

/// A mapped type, in either context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Native ABI type.
    Native(NativeType),
    /// Wrapper-facing type.
    Wrapper(WrapperType),
}

/// Native ABI types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeType {
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `*const c_char`
    CStr,
    /// `*mut ffi::wl_array`
    Array,
    /// `*mut ffi::<interface>`, or `*mut c_void` without an interface.
    Object(Option<String>),
}

/// Wrapper-facing types. How they are spelled depends on where they appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperType {
    /// `i32`
    Int,
    /// `u32`
    Uint,
    /// 24.8 fixed point.
    Fixed,
    /// File descriptor.
    Fd,
    /// Text.
    Text {
        /// `allow-null`
        nullable: bool,
    },
    /// Byte array.
    Bytes,
    /// Existing object.
    Object {
        /// Referenced interface, if named.
        interface: Option<String>,
        /// `allow-null`
        nullable: bool,
    },
    /// Object created by the message.
    NewId {
        /// Referenced interface, if named.
        interface: Option<String>,
    },
    /// Enum newtype.
    Enum {
        /// Rust type name, e.g. `WlShmFormat`.
        type_name: String,
        /// Wire integer type.
        underlying: IntKind,
    },
}

/// A parameter conversion: an optional `let` statement that keeps temporaries
/// alive for the call, and the expression passed to the native entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Statement run before the call.
    pub setup: Option<String>,
    /// Native argument expression.
    pub expr: String,
}

/// Maps schema arguments to Rust types.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    ffi: String,
    rt: String,
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}

impl TypeMapper {
    /// Create a mapper using the module paths of `config`.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            ffi: config.ffi_path.clone(),
            rt: config.runtime_path.clone(),
        }
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Map `arg` in the given context.
    pub fn map(&self, arg: &Argument, context: Context, site: Site<'_>) -> GenResult<TypeRef> {
        match context {
            Context::Native => self.map_native(arg, site).map(TypeRef::Native),
            Context::Wrapper => self.map_wrapper(arg, site).map(TypeRef::Wrapper),
        }
    }

    /// Map `arg` to its native ABI type.
    pub fn map_native(&self, arg: &Argument, site: Site<'_>) -> GenResult<NativeType> {
        Ok(match &arg.kind {
            ArgKind::Int | ArgKind::Fixed | ArgKind::Fd => NativeType::I32,
            ArgKind::Uint => NativeType::U32,
            ArgKind::String => NativeType::CStr,
            ArgKind::Array => NativeType::Array,
            ArgKind::Object { interface } => NativeType::Object(checked(interface, arg, site)?),
            ArgKind::NewId { interface: None } if site.direction == Direction::Event => {
                return Err(unsupported(arg, site))
            }
            ArgKind::NewId { interface } => NativeType::Object(checked(interface, arg, site)?),
            ArgKind::Enum { underlying, .. } => match underlying {
                IntKind::Int => NativeType::I32,
                IntKind::Uint => NativeType::U32,
            },
            ArgKind::Other(_) => return Err(unsupported(arg, site)),
        })
    }

    /// Map `arg` to its wrapper-facing type.
    pub fn map_wrapper(&self, arg: &Argument, site: Site<'_>) -> GenResult<WrapperType> {
        Ok(match &arg.kind {
            ArgKind::Int => WrapperType::Int,
            ArgKind::Uint => WrapperType::Uint,
            ArgKind::Fixed => WrapperType::Fixed,
            ArgKind::Fd => WrapperType::Fd,
            ArgKind::String => WrapperType::Text {
                nullable: arg.allow_null,
            },
            ArgKind::Array => WrapperType::Bytes,
            ArgKind::Object { interface } => WrapperType::Object {
                interface: checked(interface, arg, site)?,
                nullable: arg.allow_null,
            },
            ArgKind::NewId { interface: None } if site.direction == Direction::Event => {
                return Err(unsupported(arg, site))
            }
            ArgKind::NewId { interface } => WrapperType::NewId {
                interface: checked(interface, arg, site)?,
            },
            ArgKind::Enum { name, underlying } => {
                if !name.split('.').all(is_identifier) {
                    return Err(GenError::naming(
                        site.interface,
                        name.as_str(),
                        "enum reference is not made of valid identifiers",
                    ));
                }
                WrapperType::Enum {
                    type_name: enum_type_name(site.interface, name),
                    underlying: *underlying,
                }
            }
            ArgKind::Other(_) => return Err(unsupported(arg, site)),
        })
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Spell a native type.
    pub fn native(&self, ty: &NativeType) -> String {
        match ty {
            NativeType::I32 => "i32".to_string(),
            NativeType::U32 => "u32".to_string(),
            NativeType::CStr => "*const ::std::ffi::c_char".to_string(),
            NativeType::Array => format!("*mut {}::wl_array", self.ffi),
            NativeType::Object(Some(interface)) => format!("*mut {}::{}", self.ffi, interface),
            NativeType::Object(None) => "*mut ::std::ffi::c_void".to_string(),
        }
    }

    /// Spell a wrapper type as a request parameter.
    pub fn param(&self, ty: &WrapperType) -> String {
        match ty {
            WrapperType::Int => "i32".to_string(),
            WrapperType::Uint => "u32".to_string(),
            WrapperType::Fixed => format!("{}::Fixed", self.rt),
            WrapperType::Fd => "::std::os::fd::BorrowedFd<'_>".to_string(),
            WrapperType::Text { nullable: false } => "&str".to_string(),
            WrapperType::Text { nullable: true } => "Option<&str>".to_string(),
            WrapperType::Bytes => "&[u8]".to_string(),
            WrapperType::Object {
                interface: Some(interface),
                nullable,
            } => optional(format!("&{}", wrapper_name(interface)), *nullable),
            WrapperType::Object {
                interface: None,
                nullable,
            } => optional(format!("{}::AnyObject", self.rt), *nullable),
            WrapperType::NewId { .. } => self.output(ty),
            WrapperType::Enum { type_name, .. } => type_name.clone(),
        }
    }

    /// Spell a wrapper type as an event payload element.
    pub fn payload(&self, ty: &WrapperType) -> String {
        match ty {
            WrapperType::Fd => "::std::os::fd::OwnedFd".to_string(),
            WrapperType::Text { nullable: false } => "String".to_string(),
            WrapperType::Text { nullable: true } => "Option<String>".to_string(),
            WrapperType::Bytes => "Vec<u8>".to_string(),
            WrapperType::Object {
                interface: Some(interface),
                ..
            } => format!("Option<{}::ObjectRef<{}>>", self.rt, wrapper_name(interface)),
            WrapperType::Object { interface: None, .. } => {
                format!("Option<{}::AnyObject>", self.rt)
            }
            WrapperType::NewId { interface } => match interface {
                Some(interface) => format!("{}::NewObject<{}>", self.rt, wrapper_name(interface)),
                None => format!("{}::NewObject<P>", self.rt),
            },
            _ => self.param(ty),
        }
    }

    /// Spell a request output. An untyped output is the generic `P`.
    pub fn output(&self, ty: &WrapperType) -> String {
        match ty {
            WrapperType::NewId {
                interface: Some(interface),
            } => wrapper_name(interface),
            WrapperType::NewId { interface: None } => "P".to_string(),
            other => self.param(other),
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Convert parameter `name` for a native call.
    pub fn param_to_native(&self, name: &str, ty: &WrapperType) -> Conversion {
        let rt = &self.rt;
        let (setup, expr) = match ty {
            WrapperType::Int | WrapperType::Uint => (None, name.to_string()),
            WrapperType::Fixed => (None, format!("{}.to_raw()", name)),
            WrapperType::Fd => (None, format!("::std::os::fd::AsRawFd::as_raw_fd(&{})", name)),
            WrapperType::Text { nullable: false } => (
                Some(format!("let {0} = {1}::text::to_c_string({0});", name, rt)),
                format!("{}.as_ptr()", name),
            ),
            WrapperType::Text { nullable: true } => (
                Some(format!("let {0} = {0}.map({1}::text::to_c_string);", name, rt)),
                format!("{}.as_ref().map_or(::std::ptr::null(), |s| s.as_ptr())", name),
            ),
            WrapperType::Bytes => (
                Some(format!("let mut {0} = {1}::WlArray::borrowed({0});", name, rt)),
                format!("{}.as_mut_ptr().cast()", name),
            ),
            WrapperType::Object {
                interface: Some(_),
                nullable: false,
            } => (None, format!("{}::Proxy::as_ptr({})", rt, name)),
            WrapperType::Object {
                interface: Some(_),
                nullable: true,
            } => (
                None,
                format!("{}.map_or(::std::ptr::null_mut(), {}::Proxy::as_ptr)", name, rt),
            ),
            WrapperType::Object {
                interface: None,
                nullable: false,
            } => (None, format!("{}.as_ptr()", name)),
            WrapperType::Object {
                interface: None,
                nullable: true,
            } => (
                None,
                format!("{}.map_or(::std::ptr::null_mut(), |o| o.as_ptr())", name),
            ),
            WrapperType::NewId { .. } => (None, name.to_string()),
            WrapperType::Enum {
                underlying: IntKind::Uint,
                ..
            } => (None, format!("{}.0", name)),
            WrapperType::Enum {
                underlying: IntKind::Int,
                ..
            } => (None, format!("{}.0 as i32", name)),
        };
        Conversion { setup, expr }
    }

    /// Convert native callback argument `name` into its payload value.
    pub fn native_to_payload(&self, name: &str, ty: &WrapperType) -> String {
        let rt = &self.rt;
        match ty {
            WrapperType::Int | WrapperType::Uint => name.to_string(),
            WrapperType::Fixed => format!("{}::Fixed::from_raw({})", rt, name),
            WrapperType::Fd => format!(
                "<::std::os::fd::OwnedFd as ::std::os::fd::FromRawFd>::from_raw_fd({})",
                name
            ),
            WrapperType::Text { nullable: false } => format!("{}::text::from_raw({})", rt, name),
            WrapperType::Text { nullable: true } => format!("{}::text::from_raw_opt({})", rt, name),
            WrapperType::Bytes => format!("{}::array::to_vec({}.cast_const().cast())", rt, name),
            WrapperType::Object {
                interface: Some(interface),
                ..
            } => format!(
                "{}::ObjectRef::<{}>::from_raw({})",
                rt,
                wrapper_name(interface),
                name
            ),
            WrapperType::Object { interface: None, .. } => {
                format!("{}::AnyObject::from_raw({})", rt, name)
            }
            WrapperType::NewId { interface } => format!(
                "{}::NewObject::<{}>::from_raw({})",
                rt,
                interface.as_deref().map(wrapper_name).unwrap_or_else(|| "P".to_string()),
                name
            ),
            WrapperType::Enum {
                type_name,
                underlying: IntKind::Uint,
            } => format!("{}({})", type_name, name),
            WrapperType::Enum {
                type_name,
                underlying: IntKind::Int,
            } => format!("{}({} as u32)", type_name, name),
        }
    }

    /// Wrap a native object pointer returned for a request output.
    pub fn native_to_output(&self, expr: &str, ty: &WrapperType) -> String {
        match ty {
            WrapperType::NewId { interface: None } => format!("P::from_raw({}.cast())", expr),
            other => format!("<{} as {}::Proxy>::from_raw({})", self.output(other), self.rt, expr),
        }
    }
}

fn optional(ty: String, nullable: bool) -> String {
    if nullable {
        format!("Option<{}>", ty)
    } else {
        ty
    }
}

fn unsupported(arg: &Argument, site: Site<'_>) -> GenError {
    let kind = match (&arg.kind, site.direction) {
        (ArgKind::NewId { interface: None }, Direction::Event) => "new_id without interface".to_string(),
        (kind, _) => kind.tag().to_string(),
    };
    GenError::unsupported_kind(kind, site.interface, site.message, arg.name.as_str())
}

/// Reject interface references that cannot be spelled as a path segment.
fn checked(interface: &Option<String>, arg: &Argument, site: Site<'_>) -> GenResult<Option<String>> {
    match interface {
        Some(name) if !is_identifier(name) => Err(GenError::naming(
            site.interface,
            name.as_str(),
            format!(
                "interface referenced by {}.{} is not a valid identifier",
                site.message, arg.name
            ),
        )),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> TypeMapper {
        TypeMapper::default()
    }

    fn object(interface: &str) -> ArgKind {
        ArgKind::Object {
            interface: Some(interface.to_string()),
        }
    }

    fn new_id(interface: Option<&str>) -> ArgKind {
        ArgKind::NewId {
            interface: interface.map(str::to_string),
        }
    }

    fn wrapper(kind: ArgKind) -> WrapperType {
        mapper()
            .map_wrapper(&Argument::new("a", kind), Site::request("wl_test", "go"))
            .unwrap()
    }

    fn native(kind: ArgKind) -> String {
        let m = mapper();
        let ty = m
            .map_native(&Argument::new("a", kind), Site::event("wl_test", "went"))
            .unwrap();
        m.native(&ty)
    }

    #[test]
    fn test_native_context() {
        assert_eq!(native(ArgKind::Int), "i32");
        assert_eq!(native(ArgKind::Uint), "u32");
        assert_eq!(native(ArgKind::Fixed), "i32");
        assert_eq!(native(ArgKind::Fd), "i32");
        assert_eq!(native(ArgKind::String), "*const ::std::ffi::c_char");
        assert_eq!(native(ArgKind::Array), "*mut ffi::wl_array");
        assert_eq!(native(object("wl_surface")), "*mut ffi::wl_surface");
        assert_eq!(native(ArgKind::Object { interface: None }), "*mut ::std::ffi::c_void");
        assert_eq!(native(new_id(Some("wl_data_offer"))), "*mut ffi::wl_data_offer");
        assert_eq!(
            native(ArgKind::Enum {
                name: "format".to_string(),
                underlying: IntKind::Uint
            }),
            "u32"
        );
    }

    #[test]
    fn test_wrapper_params() {
        let m = mapper();
        assert_eq!(m.param(&wrapper(ArgKind::Int)), "i32");
        assert_eq!(m.param(&wrapper(ArgKind::Fixed)), "wlbind::Fixed");
        assert_eq!(m.param(&wrapper(ArgKind::Fd)), "::std::os::fd::BorrowedFd<'_>");
        assert_eq!(m.param(&wrapper(ArgKind::String)), "&str");
        assert_eq!(m.param(&wrapper(ArgKind::Array)), "&[u8]");
        assert_eq!(m.param(&wrapper(object("wl_buffer"))), "&WlBuffer");
        assert_eq!(
            m.param(&wrapper(ArgKind::Enum {
                name: "wl_output.transform".to_string(),
                underlying: IntKind::Int
            })),
            "WlOutputTransform"
        );
    }

    #[test]
    fn test_nullable_params() {
        let m = mapper();
        let arg = Argument::new("buffer", object("wl_buffer")).nullable();
        let ty = m.map_wrapper(&arg, Site::request("wl_surface", "attach")).unwrap();
        assert_eq!(m.param(&ty), "Option<&WlBuffer>");

        let title = Argument::new("title", ArgKind::String).nullable();
        let ty = m.map_wrapper(&title, Site::request("xdg_toplevel", "set_title")).unwrap();
        assert_eq!(m.param(&ty), "Option<&str>");
    }

    #[test]
    fn test_payloads() {
        let m = mapper();
        assert_eq!(m.payload(&wrapper(ArgKind::String)), "String");
        assert_eq!(m.payload(&wrapper(ArgKind::Array)), "Vec<u8>");
        assert_eq!(m.payload(&wrapper(ArgKind::Fd)), "::std::os::fd::OwnedFd");
        assert_eq!(
            m.payload(&wrapper(object("wl_surface"))),
            "Option<wlbind::ObjectRef<WlSurface>>"
        );
        assert_eq!(
            m.payload(&wrapper(new_id(Some("wl_data_offer")))),
            "wlbind::NewObject<WlDataOffer>"
        );
    }

    #[test]
    fn test_outputs() {
        let m = mapper();
        let pool = wrapper(new_id(Some("wl_shm_pool")));
        assert_eq!(m.output(&pool), "WlShmPool");
        assert_eq!(
            m.native_to_output("__native", &pool),
            "<WlShmPool as wlbind::Proxy>::from_raw(__native)"
        );

        let any = wrapper(new_id(None));
        assert_eq!(m.output(&any), "P");
        assert_eq!(m.native_to_output("__native", &any), "P::from_raw(__native.cast())");
    }

    #[test]
    fn test_param_conversions() {
        let m = mapper();
        let text = m.param_to_native("title", &wrapper(ArgKind::String));
        assert_eq!(
            text.setup.as_deref(),
            Some("let title = wlbind::text::to_c_string(title);")
        );
        assert_eq!(text.expr, "title.as_ptr()");

        let fd = m.param_to_native("fd", &wrapper(ArgKind::Fd));
        assert_eq!(fd.setup, None);
        assert_eq!(fd.expr, "::std::os::fd::AsRawFd::as_raw_fd(&fd)");

        let signed = m.param_to_native(
            "transform",
            &wrapper(ArgKind::Enum {
                name: "wl_output.transform".to_string(),
                underlying: IntKind::Int,
            }),
        );
        assert_eq!(signed.expr, "transform.0 as i32");
    }

    #[test]
    fn test_payload_conversions() {
        let m = mapper();
        assert_eq!(m.native_to_payload("serial", &wrapper(ArgKind::Uint)), "serial");
        assert_eq!(
            m.native_to_payload("x", &wrapper(ArgKind::Fixed)),
            "wlbind::Fixed::from_raw(x)"
        );
        assert_eq!(
            m.native_to_payload("surface", &wrapper(object("wl_surface"))),
            "wlbind::ObjectRef::<WlSurface>::from_raw(surface)"
        );
        assert_eq!(
            m.native_to_payload(
                "format",
                &wrapper(ArgKind::Enum {
                    name: "format".to_string(),
                    underlying: IntKind::Uint
                })
            ),
            "WlTestFormat(format)"
        );
    }

    #[test]
    fn test_custom_paths() {
        let config = GeneratorConfig::new()
            .with_ffi_path("crate::sys")
            .with_runtime_path("::wlbind");
        let m = TypeMapper::new(&config);
        assert_eq!(m.native(&NativeType::Array), "*mut crate::sys::wl_array");
        assert_eq!(m.param(&WrapperType::Fixed), "::wlbind::Fixed");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let arg = Argument::new("scale", ArgKind::Other("double".to_string()));
        let err = mapper()
            .map(&arg, Context::Wrapper, Site::request("wl_output", "set_scale"))
            .unwrap_err();
        assert_eq!(
            err,
            GenError::unsupported_kind("double", "wl_output", "set_scale", "scale")
        );

        let err = mapper()
            .map(&arg, Context::Native, Site::request("wl_output", "set_scale"))
            .unwrap_err();
        assert_eq!(err.category(), "unsupported-argument-kind");
    }

    #[test]
    fn test_untyped_new_id_in_event_is_rejected() {
        let arg = Argument::new("id", new_id(None));
        let err = mapper()
            .map_wrapper(&arg, Site::event("wl_registry", "global"))
            .unwrap_err();
        assert!(matches!(err, GenError::UnsupportedArgumentKind { ref kind, .. } if kind == "new_id without interface"));
    }

    #[test]
    fn test_bad_interface_reference() {
        let arg = Argument::new("surface", object("wl-surface"));
        let err = mapper()
            .map_wrapper(&arg, Site::request("xdg_wm_base", "get_xdg_surface"))
            .unwrap_err();
        assert_eq!(err.category(), "naming-convention-violation");
    }

    #[test]
    fn test_map_dispatches_on_context() {
        let arg = Argument::new("serial", ArgKind::Uint);
        let site = Site::event("wl_callback", "done");
        assert_eq!(
            mapper().map(&arg, Context::Native, site).unwrap(),
            TypeRef::Native(NativeType::U32)
        );
        assert_eq!(
            mapper().map(&arg, Context::Wrapper, site).unwrap(),
            TypeRef::Wrapper(WrapperType::Uint)
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn known_kind() -> impl Strategy<Value = ArgKind> {
        prop_oneof![
            Just(ArgKind::Int),
            Just(ArgKind::Uint),
            Just(ArgKind::Fixed),
            Just(ArgKind::String),
            Just(ArgKind::Array),
            Just(ArgKind::Fd),
            "[a-z]{1,8}(_[a-z]{1,8}){0,2}".prop_map(|i| ArgKind::Object { interface: Some(i) }),
            "[a-z]{1,8}(_[a-z]{1,8}){0,2}".prop_map(|i| ArgKind::NewId { interface: Some(i) }),
            "[a-z]{1,8}".prop_map(|name| ArgKind::Enum {
                name,
                underlying: IntKind::Uint
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_known_kinds_map_in_both_contexts(kind in known_kind(), nullable in any::<bool>()) {
            let mapper = TypeMapper::default();
            let mut arg = Argument::new("value", kind);
            arg.allow_null = nullable;

            for site in [Site::request("wl_test", "go"), Site::event("wl_test", "went")] {
                prop_assert!(mapper.map(&arg, Context::Native, site).is_ok());
                prop_assert!(mapper.map(&arg, Context::Wrapper, site).is_ok());
            }
        }

        #[test]
        fn prop_other_tags_are_rejected_with_their_name(tag in "[a-z]{3,10}") {
            prop_assume!(!["int", "uint", "fixed", "string", "array", "fd", "object", "new_id"].contains(&tag.as_str()));
            let arg = Argument::new("value", ArgKind::Other(tag.clone()));
            let err = TypeMapper::default()
                .map(&arg, Context::Wrapper, Site::event("wl_test", "went"))
                .unwrap_err();
            prop_assert_eq!(err, GenError::unsupported_kind(tag, "wl_test", "went", "value"));
        }
    }
}
