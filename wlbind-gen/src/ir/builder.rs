//! Schema model builder.
//!
//! Turns a parsed document tree into a [`Protocol`]. The builder checks
//! that every required attribute is present and well-formed, that each
//! interface has at most one destructor, and that names are unique where the
//! generated code needs them to be: interfaces within the protocol, requests,
//! events and enums within an interface, arguments within a message and
//! entries within an enum. It does not check that referenced interfaces or
//! enums exist: protocols routinely reference types declared by other
//! protocols.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::Element;
use crate::error::{GenError, GenResult};
use crate::ir::{ArgKind, Argument, EnumDef, EnumEntry, Event, IntKind, Interface, Protocol, Request};

/// Builds the schema model from a parsed document.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the protocol model rooted at `root`.
    pub fn build(&self, root: &Element) -> GenResult<Protocol> {
        if root.tag != "protocol" {
            return Err(GenError::malformed(
                root.tag.as_str(),
                format!("expected a <protocol> root element, found <{}>", root.tag),
            ));
        }
        let name = required(root, "name", "protocol")?.to_string();

        let mut interfaces: Vec<Interface> = Vec::new();
        for (index, node) in root.children_named("interface").enumerate() {
            let iface = self.build_interface(node, &format!("{}.interface[{}]", name, index))?;
            if interfaces.iter().any(|seen| seen.name == iface.name) {
                return Err(GenError::malformed(
                    iface.name.as_str(),
                    "interface declared more than once",
                ));
            }
            interfaces.push(iface);
        }

        debug!(protocol = %name, interfaces = interfaces.len(), "schema model built");
        Ok(Protocol { name, interfaces })
    }

    fn build_interface(&self, node: &Element, location: &str) -> GenResult<Interface> {
        let name = required(node, "name", location)?.to_string();
        let version = match node.attr("version") {
            Some(raw) => parse_u32(raw, &name, "version")?,
            None => 1,
        };

        let requests = node
            .children_named("request")
            .map(|req| self.build_request(req, &name))
            .collect::<GenResult<Vec<_>>>()?;

        let destructors = requests.iter().filter(|req| req.is_destructor).count();
        if destructors > 1 {
            return Err(GenError::malformed(
                name.as_str(),
                format!("{} requests are flagged as destructor, at most one is allowed", destructors),
            ));
        }
        unique(requests.iter().map(|req| req.name.as_str()), &name, "request")?;

        let events = node
            .children_named("event")
            .map(|event| self.build_event(event, &name))
            .collect::<GenResult<Vec<_>>>()?;
        unique(events.iter().map(|event| event.name.as_str()), &name, "event")?;

        let enums = node
            .children_named("enum")
            .map(|e| self.build_enum(e, &name))
            .collect::<GenResult<Vec<_>>>()?;
        unique(enums.iter().map(|def| def.name.as_str()), &name, "enum")?;

        Ok(Interface {
            summary: summary(node),
            name,
            version,
            requests,
            events,
            enums,
        })
    }

    fn build_request(&self, node: &Element, iface: &str) -> GenResult<Request> {
        let name = required(node, "name", &format!("{}.request", iface))?.to_string();
        let location = format!("{}.{}", iface, name);

        Ok(Request {
            args: self.build_args(node, &location)?,
            is_destructor: node.attr("type") == Some("destructor"),
            since: since(node, &location)?,
            summary: summary(node),
            name,
        })
    }

    fn build_event(&self, node: &Element, iface: &str) -> GenResult<Event> {
        let name = required(node, "name", &format!("{}.event", iface))?.to_string();
        let location = format!("{}.{}", iface, name);

        Ok(Event {
            args: self.build_args(node, &location)?,
            since: since(node, &location)?,
            summary: summary(node),
            name,
        })
    }

    fn build_args(&self, node: &Element, location: &str) -> GenResult<Vec<Argument>> {
        let args = node
            .children_named("arg")
            .enumerate()
            .map(|(index, arg)| self.build_arg(arg, location, index))
            .collect::<GenResult<Vec<_>>>()?;
        unique(args.iter().map(|arg| arg.name.as_str()), location, "argument")?;
        Ok(args)
    }

    fn build_arg(&self, node: &Element, location: &str, index: usize) -> GenResult<Argument> {
        let name = required(node, "name", &format!("{}.arg[{}]", location, index))?.to_string();
        let arg_location = format!("{}.{}", location, name);
        let tag = required(node, "type", &arg_location)?;

        let interface = node
            .attr("interface")
            .filter(|iface| !iface.is_empty())
            .map(str::to_string);

        let kind = match (tag, node.attr("enum")) {
            ("int", Some(reference)) => enum_kind(reference, IntKind::Int, &arg_location)?,
            ("uint", Some(reference)) => enum_kind(reference, IntKind::Uint, &arg_location)?,
            (other, Some(_)) => {
                return Err(GenError::malformed(
                    arg_location,
                    format!("enum attribute on a '{}' argument, only int and uint may carry one", other),
                ))
            }
            ("int", None) => ArgKind::Int,
            ("uint", None) => ArgKind::Uint,
            ("fixed", None) => ArgKind::Fixed,
            ("string", None) => ArgKind::String,
            ("array", None) => ArgKind::Array,
            ("fd", None) => ArgKind::Fd,
            ("object", None) => ArgKind::Object { interface },
            ("new_id", None) => ArgKind::NewId { interface },
            (other, None) => ArgKind::Other(other.to_string()),
        };

        let allow_null = match node.attr("allow-null") {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(GenError::malformed(
                    arg_location,
                    format!("allow-null must be 'true' or 'false', found '{}'", other),
                ))
            }
        };

        Ok(Argument {
            name,
            kind,
            allow_null,
            summary: node.attr("summary").map(str::to_string),
        })
    }

    fn build_enum(&self, node: &Element, iface: &str) -> GenResult<EnumDef> {
        let name = required(node, "name", &format!("{}.enum", iface))?.to_string();
        let location = format!("{}.{}", iface, name);

        let entries = node
            .children_named("entry")
            .enumerate()
            .map(|(index, entry)| {
                let entry_location = format!("{}.entry[{}]", location, index);
                let entry_name = required(entry, "name", &entry_location)?.to_string();
                let raw = required(entry, "value", &entry_location)?;
                Ok(EnumEntry {
                    value: parse_u32(raw, &entry_location, "value")?,
                    summary: entry.attr("summary").map(str::to_string),
                    name: entry_name,
                })
            })
            .collect::<GenResult<Vec<_>>>()?;
        unique(entries.iter().map(|entry| entry.name.as_str()), &location, "entry")?;

        Ok(EnumDef {
            bitfield: node.attr("bitfield") == Some("true"),
            summary: summary(node),
            name,
            entries,
        })
    }
}

/// Fetch a required, non-empty attribute.
fn required<'a>(node: &'a Element, attr: &str, location: &str) -> GenResult<&'a str> {
    match node.attr(attr) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GenError::malformed(
            location,
            format!("<{}> is missing required attribute '{}'", node.tag, attr),
        )),
    }
}

/// Reject the first name that appears twice under `location`.
fn unique<'a>(names: impl IntoIterator<Item = &'a str>, location: &str, what: &str) -> GenResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(GenError::malformed(
                format!("{}.{}", location, name),
                format!("{} declared more than once", what),
            ));
        }
    }
    Ok(())
}

fn enum_kind(reference: &str, underlying: IntKind, location: &str) -> GenResult<ArgKind> {
    if reference.is_empty() || reference.split('.').count() > 2 {
        return Err(GenError::malformed(
            location,
            format!("invalid enum reference '{}'", reference),
        ));
    }
    Ok(ArgKind::Enum {
        name: reference.to_string(),
        underlying,
    })
}

/// Parse a decimal or `0x`-prefixed hexadecimal number.
fn parse_u32(raw: &str, location: &str, what: &str) -> GenResult<u32> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse::<u32>(),
    };
    parsed.map_err(|_| GenError::malformed(location, format!("{} '{}' is not a number", what, raw)))
}

fn since(node: &Element, location: &str) -> GenResult<Option<u32>> {
    node.attr("since")
        .map(|raw| parse_u32(raw, location, "since"))
        .transpose()
}

fn summary(node: &Element) -> Option<String> {
    node.first_child("description")
        .and_then(|desc| desc.attr("summary"))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
