//! Schema model definitions.
//!
//! The model is built once from the parsed document, never mutated, and
//! consumed by the emitters. Every list keeps schema order: interface order
//! keeps output reproducible, and event order is the slot order of the
//! native listener table.

use serde::{Deserialize, Serialize};

/// A whole protocol document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Protocol name, e.g. `wayland` or `xdg_shell`.
    pub name: String,

    /// Interfaces in schema order. Names are unique.
    pub interfaces: Vec<Interface>,
}

impl Protocol {
    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|iface| iface.name == name)
    }
}

/// One object type of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, e.g. `wl_surface`.
    pub name: String,

    /// Highest version described by the schema.
    pub version: u32,

    /// Requests in schema order. At most one is a destructor.
    pub requests: Vec<Request>,

    /// Events in schema order.
    pub events: Vec<Event>,

    /// Enumerations in schema order.
    pub enums: Vec<EnumDef>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Interface {
    /// The destructor request, if any.
    pub fn destructor(&self) -> Option<&Request> {
        self.requests.iter().find(|req| req.is_destructor)
    }

    /// Whether a destructor request exists.
    pub fn has_destructor(&self) -> bool {
        self.destructor().is_some()
    }

    /// Whether the interface declares no requests at all. Such objects are
    /// still destroyed through `<interface>_destroy`, so they get a
    /// `dispose` bound to it.
    pub fn has_implicit_destructor(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests other than the destructor, in schema order.
    pub fn operations(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter().filter(|req| !req.is_destructor)
    }

    /// Whether the interface emits events and therefore needs a listener.
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// A client-to-server operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Request name, e.g. `create_pool`.
    pub name: String,

    /// Arguments in schema order.
    pub args: Vec<Argument>,

    /// Whether this request destroys the object.
    pub is_destructor: bool,

    /// Version that introduced the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u32>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A server-to-client notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, e.g. `configure`.
    pub name: String,

    /// Arguments in schema order. Their order is the callback signature.
    pub args: Vec<Argument>,

    /// Version that introduced the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u32>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One argument of a request or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name.
    pub name: String,

    /// Argument type.
    pub kind: ArgKind,

    /// Whether the value may be null (strings and objects only).
    #[serde(default)]
    pub allow_null: bool,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Argument {
    /// Create an argument of the given kind.
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            allow_null: false,
            summary: None,
        }
    }

    /// Mark the argument as nullable.
    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Whether this argument creates a new object (an output of a request).
    pub fn is_new_id(&self) -> bool {
        matches!(self.kind, ArgKind::NewId { .. })
    }
}

/// Argument type tag.
///
/// The set is closed: anything the schema spells differently is kept as
/// [`ArgKind::Other`] so the type mapper can reject it by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ArgKind {
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    Uint,
    /// Signed 24.8 fixed-point number.
    Fixed,
    /// NUL-terminated string.
    String,
    /// Opaque byte array.
    Array,
    /// File descriptor.
    Fd,
    /// Existing object, of the named interface when given.
    Object {
        /// Referenced interface.
        interface: Option<String>,
    },
    /// Object created by the message, of the named interface when given.
    NewId {
        /// Referenced interface.
        interface: Option<String>,
    },
    /// Integer constrained to an enumeration.
    Enum {
        /// Enum reference as written: `format` or `wl_output.transform`.
        name: String,
        /// Wire type of the value.
        underlying: IntKind,
    },
    /// Any other type tag.
    Other(String),
}

impl ArgKind {
    /// The type tag as spelled in the schema.
    pub fn tag(&self) -> &str {
        match self {
            ArgKind::Int => "int",
            ArgKind::Uint => "uint",
            ArgKind::Fixed => "fixed",
            ArgKind::String => "string",
            ArgKind::Array => "array",
            ArgKind::Fd => "fd",
            ArgKind::Object { .. } => "object",
            ArgKind::NewId { .. } => "new_id",
            ArgKind::Enum { underlying, .. } => underlying.tag(),
            ArgKind::Other(tag) => tag,
        }
    }

    /// Referenced interface of an object or new_id argument.
    pub fn interface(&self) -> Option<&str> {
        match self {
            ArgKind::Object { interface } | ArgKind::NewId { interface } => interface.as_deref(),
            _ => None,
        }
    }
}

/// Wire integer type underlying an enum argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntKind {
    /// `int`
    Int,
    /// `uint`
    Uint,
}

impl IntKind {
    /// The type tag as spelled in the schema.
    pub fn tag(&self) -> &'static str {
        match self {
            IntKind::Int => "int",
            IntKind::Uint => "uint",
        }
    }
}

/// An enumeration declared by an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name, local to its interface.
    pub name: String,

    /// Whether entries combine as bit flags.
    pub bitfield: bool,

    /// Entries in schema order.
    pub entries: Vec<EnumEntry>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One named value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// Entry name.
    pub name: String,

    /// Numeric value.
    pub value: u32,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shm() -> Interface {
        Interface {
            name: "wl_shm".to_string(),
            version: 2,
            requests: vec![
                Request {
                    name: "create_pool".to_string(),
                    args: vec![
                        Argument::new(
                            "id",
                            ArgKind::NewId {
                                interface: Some("wl_shm_pool".to_string()),
                            },
                        ),
                        Argument::new("fd", ArgKind::Fd),
                        Argument::new("size", ArgKind::Int),
                    ],
                    is_destructor: false,
                    since: None,
                    summary: None,
                },
                Request {
                    name: "release".to_string(),
                    args: vec![],
                    is_destructor: true,
                    since: Some(2),
                    summary: None,
                },
            ],
            events: vec![],
            enums: vec![],
            summary: None,
        }
    }

    #[test]
    fn test_destructor_and_operations() {
        let iface = shm();
        assert_eq!(iface.destructor().map(|r| r.name.as_str()), Some("release"));
        let ops: Vec<_> = iface.operations().map(|r| r.name.as_str()).collect();
        assert_eq!(ops, vec!["create_pool"]);
        assert!(!iface.has_events());
        assert!(!iface.has_implicit_destructor());
    }

    #[test]
    fn test_request_less_interface_has_implicit_destructor() {
        let callback = Interface {
            name: "wl_callback".to_string(),
            version: 1,
            requests: vec![],
            events: vec![],
            enums: vec![],
            summary: None,
        };
        assert!(!callback.has_destructor());
        assert!(callback.has_implicit_destructor());
    }

    #[test]
    fn test_arg_kind_tags() {
        let kind = ArgKind::Enum {
            name: "format".to_string(),
            underlying: IntKind::Uint,
        };
        assert_eq!(kind.tag(), "uint");
        assert_eq!(ArgKind::Other("double".to_string()).tag(), "double");
        assert_eq!(
            ArgKind::NewId {
                interface: Some("wl_shm_pool".to_string())
            }
            .interface(),
            Some("wl_shm_pool")
        );
        assert_eq!(ArgKind::Int.interface(), None);
    }

    #[test]
    fn test_model_serializes_in_order() {
        let protocol = Protocol {
            name: "wayland".to_string(),
            interfaces: vec![shm()],
        };
        let json = serde_json::to_string(&protocol).unwrap();
        let back: Protocol = serde_json::from_str(&json).unwrap();

        assert_eq!(back, protocol);
        assert!(back.interface("wl_shm").is_some());
        assert!(back.interface("wl_seat").is_none());
        assert!(json.find("create_pool").unwrap() < json.find("release").unwrap());
    }
}
