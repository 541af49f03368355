//! Tree serializer that renders an element tree as canonical text.
//!
//! One depth-first pass writes every element, delegating attribute text to
//! the rewriter, attribute order to the ordering, and whitespace decisions to
//! the formatting rules. Identifiers seen along the way are collected into a
//! [`UsageRegistry`] owned by the pass.

use crate::error::Result;
use crate::format::options::FormatOptions;
use crate::format::ordering::{sort_attributes, AttributeOrdering};
use crate::format::rewriter::AttributeRewriter;
use crate::format::rules::{is_one_line, is_space_after, is_space_before};
use crate::format::usage::UsageRegistry;
use crate::node::{Document, Element, Node};
use crate::xml::{escape_text, trim_xml_whitespace};

/// Transient counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatState {
    /// Nesting depth of the element being written; the root is 0.
    pub depth: usize,
    /// Elements visited so far, including the current one.
    pub element_count: usize,
}

/// Renders one document. A serializer is used for exactly one pass.
pub struct Serializer<'a, O: AttributeOrdering + ?Sized> {
    options: &'a FormatOptions,
    ordering: &'a O,
    rewriter: AttributeRewriter<'a>,
    state: FormatState,
    registry: UsageRegistry,
    out: String,
}

impl<'a, O: AttributeOrdering + ?Sized> Serializer<'a, O> {
    /// Creates a serializer with fresh state and an empty registry.
    pub fn new(options: &'a FormatOptions, ordering: &'a O) -> Self {
        Serializer {
            options,
            ordering,
            rewriter: AttributeRewriter::new(options),
            state: FormatState::default(),
            registry: UsageRegistry::new(),
            out: String::new(),
        }
    }

    /// Renders the document, returning the text and the identifiers declared in it.
    pub fn render(mut self, document: &Document) -> Result<(String, UsageRegistry)> {
        self.write_element(&document.root)?;
        Ok((self.out, self.registry))
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.options.indent_size)
    }

    fn write_element(&mut self, element: &Element) -> Result<()> {
        self.state.element_count += 1;
        let depth = self.state.depth;
        let this_indent = self.indent(depth);
        let next_indent = self.indent(depth + 1);
        let has_children = element.has_elements() || element.has_text();

        if is_space_before(self.options, element, self.state.element_count) {
            self.out.push('\n');
        }

        // Opening glyph
        self.out.push_str(&this_indent);
        self.out.push('<');
        self.out.push_str(&element.name.to_string());

        self.write_attributes(element, &next_indent)?;

        // Closing glyphs
        if has_children {
            self.write_children(element, &next_indent)?;
            self.out.push_str(&this_indent);
            self.out.push_str("</");
            self.out.push_str(&element.name.to_string());
            self.out.push_str(">\n");
        } else {
            self.out.push_str(" />\n");
        }

        if is_space_after(self.options, element, depth) {
            self.out.push('\n');
        }

        Ok(())
    }

    fn write_attributes(&mut self, element: &Element, next_indent: &str) -> Result<()> {
        if element.attributes.is_empty() {
            return Ok(());
        }

        let mut attributes = Vec::with_capacity(element.attributes.len());
        for attribute in &element.attributes {
            attributes.push(self.rewriter.rewrite(element, attribute, &mut self.registry));
        }
        sort_attributes(self.ordering, &mut attributes)?;

        let one_line = is_one_line(self.options, element, &attributes, next_indent.len());
        for attribute in &attributes {
            if one_line {
                self.out.push(' ');
            } else {
                self.out.push_str(" \n");
                self.out.push_str(next_indent);
            }
            self.out.push_str(attribute);
        }

        Ok(())
    }

    fn write_children(&mut self, element: &Element, next_indent: &str) -> Result<()> {
        self.out.push_str(">\n");

        for child in &element.children {
            match child {
                Node::Element(child) => {
                    self.state.depth += 1;
                    let written = self.write_element(child);
                    self.state.depth -= 1;
                    written?;
                }
                Node::Text(text) => {
                    let text = trim_xml_whitespace(text);
                    if !text.is_empty() {
                        self.out.push_str(next_indent);
                        self.out.push_str(&escape_text(text));
                        self.out.push('\n');
                    }
                }
                Node::Comment(comment) => {
                    self.out.push_str(next_indent);
                    self.out.push_str("<!--");
                    self.out.push_str(comment);
                    self.out.push_str("-->\n");
                }
            }
        }

        Ok(())
    }
}
