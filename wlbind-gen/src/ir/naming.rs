//! Naming rules.
//!
//! Native symbols follow the libwayland scanner convention:
//!
//! | Symbol | Name |
//! |--------|------|
//! | deleter | `<interface>_destroy` |
//! | listener registration | `<interface>_add_listener` |
//! | listener struct | `<interface>_listener` |
//! | interface descriptor | `<interface>_interface` |
//! | request entry point | `<interface>_<request>` |
//!
//! Rust names are derived from the same schema names: wrapper types are
//! PascalCase (`wl_shm_pool` becomes `WlShmPool`), methods and parameters
//! keep their snake_case spelling with keywords escaped, constants are
//! upper-cased.

use std::collections::HashMap;

use convert_case::{Case, Casing};

use crate::error::{GenError, GenResult};
use crate::ir::{Interface, Request};

/// Method consuming a wrapper through its destructor.
pub const DISPOSE: &str = "dispose";

/// Members every generated wrapper already carries. A request may not take
/// one of these names.
pub const RESERVED_MEMBERS: &[&str] = &["as_ptr", DISPOSE, "events", "from_raw", "interface", "into_raw"];

/// Rust keywords that can be escaped as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

// =============================================================================
// Native symbols
// =============================================================================

/// Native symbol names of one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeSymbols<'a> {
    interface: &'a str,
}

impl<'a> NativeSymbols<'a> {
    /// Symbols of `interface`, which must be a valid C identifier.
    pub fn new(interface: &'a str) -> GenResult<Self> {
        if !is_identifier(interface) {
            return Err(GenError::naming(
                interface,
                interface,
                "interface name is not a valid C identifier",
            ));
        }
        Ok(Self { interface })
    }

    /// The interface name.
    pub fn interface(&self) -> &'a str {
        self.interface
    }

    /// `<interface>_destroy`
    pub fn destroy(&self) -> String {
        format!("{}_destroy", self.interface)
    }

    /// `<interface>_add_listener`
    pub fn add_listener(&self) -> String {
        format!("{}_add_listener", self.interface)
    }

    /// `<interface>_listener`
    pub fn listener(&self) -> String {
        format!("{}_listener", self.interface)
    }

    /// `<interface>_interface`
    pub fn descriptor(&self) -> String {
        format!("{}_interface", self.interface)
    }

    /// `<interface>_<request>`.
    ///
    /// Fails when the request name is not an identifier or when an ordinary
    /// request would share its symbol with the deleter, the listener
    /// registration or the interface descriptor.
    pub fn request(&self, request: &Request) -> GenResult<String> {
        let symbol = format!("{}_{}", self.interface, request.name);
        if !is_identifier(&request.name) {
            return Err(GenError::naming(
                self.interface,
                symbol,
                "request name is not a valid C identifier",
            ));
        }
        if !request.is_destructor {
            let clash = match request.name.as_str() {
                "destroy" => Some("the deleter"),
                "add_listener" => Some("the listener registration"),
                "interface" => Some("the interface descriptor"),
                _ => None,
            };
            if let Some(what) = clash {
                return Err(GenError::naming(
                    self.interface,
                    symbol,
                    format!("collides with {}", what),
                ));
            }
        }
        Ok(symbol)
    }
}

// =============================================================================
// Rust names
// =============================================================================

/// Whether `name` is a C identifier usable as a Rust identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Wrapper type name: `wl_shm_pool` becomes `WlShmPool`.
pub fn wrapper_name(interface: &str) -> String {
    interface.to_case(Case::Pascal)
}

/// Events struct name: `WlShmEvents`.
pub fn events_name(interface: &str) -> String {
    format!("{}Events", wrapper_name(interface))
}

/// Requests trait name: `WlShmRequests`.
pub fn requests_name(interface: &str) -> String {
    format!("{}Requests", wrapper_name(interface))
}

/// Deleter type name: `WlShmDeleter`.
pub fn deleter_name(interface: &str) -> String {
    format!("{}Deleter", wrapper_name(interface))
}

/// Listener table type name: `WlShmListener`.
pub fn listener_name(interface: &str) -> String {
    format!("{}Listener", wrapper_name(interface))
}

/// Listener table static name: `WL_SHM_LISTENER`.
pub fn listener_static(interface: &str) -> String {
    format!("{}_LISTENER", interface.to_ascii_uppercase())
}

/// Enum type name.
///
/// A plain reference names an enum of `owner`; a dotted reference
/// (`wl_output.transform`) names an enum of another interface.
pub fn enum_type_name(owner: &str, reference: &str) -> String {
    match reference.split_once('.') {
        Some((interface, name)) => format!("{}{}", wrapper_name(interface), name.to_case(Case::Pascal)),
        None => format!("{}{}", wrapper_name(owner), reference.to_case(Case::Pascal)),
    }
}

/// Check that no two generated types share a name.
///
/// Type names are built by concatenation, so `wl_shm` with enum `pool`
/// yields `WlShmPool`, the wrapper of `wl_shm_pool`.
pub fn check_type_names<'a>(interfaces: impl IntoIterator<Item = &'a Interface>) -> GenResult<()> {
    let mut owners: HashMap<String, String> = HashMap::new();
    for iface in interfaces {
        let mut names = vec![
            (wrapper_name(&iface.name), "wrapper".to_string()),
            (deleter_name(&iface.name), "deleter".to_string()),
            (requests_name(&iface.name), "requests trait".to_string()),
        ];
        if iface.has_events() {
            names.push((events_name(&iface.name), "events struct".to_string()));
            names.push((listener_name(&iface.name), "listener table".to_string()));
        }
        for def in &iface.enums {
            names.push((enum_name(&iface.name, &def.name)?, format!("enum {}", def.name)));
        }

        for (name, what) in names {
            let owner = format!("{} of {}", what, iface.name);
            if let Some(previous) = owners.get(&name) {
                return Err(GenError::naming(
                    iface.name.as_str(),
                    name.as_str(),
                    format!("type name of the {} is also used by the {}", owner, previous),
                ));
            }
            owners.insert(name, owner);
        }
    }
    Ok(())
}

/// Enum entry constant: `argb8888` becomes `ARGB8888`, `90` becomes `_90`.
pub fn constant_name(entry: &str) -> String {
    let upper = entry.to_ascii_uppercase();
    if upper.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", upper)
    } else {
        upper
    }
}

/// Notification channel field: `on_<event>`.
pub fn channel_name(event: &str) -> String {
    format!("on_{}", event)
}

/// Callback function name: `handle_<event>`.
pub fn callback_name(event: &str) -> String {
    format!("handle_{}", event)
}

/// Check that an event name can prefix its channel and callback names.
pub fn event_name<'a>(interface: &str, event: &'a str) -> GenResult<&'a str> {
    if is_identifier(event) {
        Ok(event)
    } else {
        Err(GenError::naming(
            interface,
            event,
            "event name is not a valid identifier",
        ))
    }
}

/// Check an enum name and return its type name.
pub fn enum_name(interface: &str, name: &str) -> GenResult<String> {
    if is_identifier(name) {
        Ok(enum_type_name(interface, name))
    } else {
        Err(GenError::naming(
            interface,
            name,
            "enum name is not a valid identifier",
        ))
    }
}

/// Check an enum entry name and return its constant name.
pub fn entry_name(interface: &str, entry: &str) -> GenResult<String> {
    let valid = !entry.is_empty() && entry.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(constant_name(entry))
    } else {
        Err(GenError::naming(
            interface,
            entry,
            "enum entry name is not made of letters, digits and underscores",
        ))
    }
}

/// Escape a schema name for use as a Rust identifier.
pub fn escape(name: &str) -> String {
    if PATH_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else if KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// A parameter or local derived from an argument name.
///
/// Names starting with `__` are reserved for generated locals.
pub fn local_name(interface: &str, owner: &str, name: &str) -> GenResult<String> {
    if !is_identifier(name) {
        return Err(GenError::naming(
            interface,
            format!("{}.{}", owner, name),
            "argument name is not a valid identifier",
        ));
    }
    if name.starts_with("__") {
        return Err(GenError::naming(
            interface,
            format!("{}.{}", owner, name),
            "names starting with '__' are reserved for generated code",
        ));
    }
    Ok(escape(name))
}

/// A request method name.
pub fn method_name(interface: &str, request: &str) -> GenResult<String> {
    if !is_identifier(request) {
        return Err(GenError::naming(
            interface,
            request,
            "request name is not a valid identifier",
        ));
    }
    if RESERVED_MEMBERS.contains(&request) {
        return Err(GenError::naming(
            interface,
            request,
            "collides with a member generated for every wrapper",
        ));
    }
    Ok(escape(request))
}
