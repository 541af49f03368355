//! Node structures for the element tree.
//!
//! This module provides the read-only tree the formatter walks: a
//! [`Document`] owning one root [`Element`], whose children are elements,
//! text and comments.

pub mod namespace;
mod xml_content;

pub use namespace::{NamespaceContext, QName};
pub use xml_content::{Attribute, Element, Node};

/// A parsed document with exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The document element.
    pub root: Element,
}

impl Document {
    /// Wraps a root element.
    pub fn new(root: Element) -> Self {
        Document { root }
    }
}
