//! XML content types for the element tree.
//!
//! The tree is owned top-down: a [`Document`](super::Document) owns its root
//! element and every element owns its attributes and children. The formatter
//! only ever reads it.

use super::namespace::QName;
use crate::xml::trim_xml_whitespace;

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Character data, entities already resolved.
    Text(String),
    /// A comment; the string excludes the `<!--` and `-->` delimiters.
    Comment(String),
}

impl Node {
    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}

/// An attribute scoped to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written, e.g. `x:Key` or `Background`.
    pub name: QName,
    /// Unescaped value.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute from a name as written (`Width`, `x:Key`).
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = QName::parse(&name.into());
        Attribute {
            name,
            value: value.into(),
        }
    }

    /// Returns true when the attribute carries a namespace prefix.
    pub fn is_qualified(&self) -> bool {
        self.name.prefix.is_some()
    }

    /// The local part of the name.
    pub fn local_name(&self) -> &str {
        &self.name.local
    }
}

/// An element with a qualified name, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written.
    pub name: QName,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: &str) -> Self {
        Element {
            name: QName::parse(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends an attribute.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style helper that appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// The local part of the tag name.
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Returns true if any child is an element.
    pub fn has_elements(&self) -> bool {
        self.children.iter().any(Node::is_element)
    }

    /// Concatenation of all descendant text, in document order.
    pub fn text_value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(e) => e.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    /// Returns true if the element's text value holds anything besides XML
    /// whitespace.
    pub fn has_text(&self) -> bool {
        !trim_xml_whitespace(&self.text_value()).is_empty()
    }
}
