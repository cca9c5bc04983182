//! Parsed schema document tree.
//!
//! The XML parser lives outside this crate. It hands over the document as a
//! tree of [`Element`]s: a tag, its attributes and its child elements, in
//! document order. The tree is serialisable, so an external parser can also
//! pass it along as JSON:
//!
//! ```json
//! { "tag": "protocol", "attrs": { "name": "wayland" }, "children": [
//!     { "tag": "interface", "attrs": { "name": "wl_callback", "version": "1" }, "children": [
//!         { "tag": "event", "attrs": { "name": "done", "type": "destructor" }, "children": [
//!             { "tag": "arg", "attrs": { "name": "callback_data", "type": "uint" } }
//!         ] }
//!     ] }
//! ] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One element of the parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Element name, e.g. `interface`.
    pub tag: String,

    /// Attributes by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// First child element with the given tag.
    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Parse a tree from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialise the tree to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
