//! XML parser that builds element trees.
//!
//! This parser uses quick-xml's streaming API and only adapts its events into
//! the owned [`Document`] model. Insignificant (whitespace-only) text is
//! dropped, which is what makes formatting a fixed point.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::trim_xml_whitespace;
use crate::error::{Error, Result};
use crate::node::namespace::declared_prefix;
use crate::node::{Attribute, Document, Element, NamespaceContext, Node, QName};

/// XML parser that builds element trees.
#[derive(Debug, Default)]
pub struct XmlParser {
    _private: (),
}

impl XmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        XmlParser::default()
    }

    /// Parses XML from a string.
    pub fn parse_str(&self, xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        // Don't trim text - whitespace-only runs are dropped by the builder
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        self.parse_reader(&mut reader)
    }

    /// Parses XML from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let file = File::open(path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        self.parse_reader(&mut reader)
    }

    fn parse_reader<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<Document> {
        let mut builder = TreeBuilder::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    builder.flush_text()?;
                    let element = builder.open_element(e, reader)?;
                    builder.stack.push(element);
                }
                Ok(Event::End(_)) => {
                    builder.flush_text()?;
                    let element = builder
                        .stack
                        .pop()
                        .ok_or_else(|| Error::Parse("unexpected end tag".into()))?;
                    builder.namespaces.pop_scope();
                    builder.attach(element)?;
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing tag - handle like Start + End
                    builder.flush_text()?;
                    let element = builder.open_element(e, reader)?;
                    builder.namespaces.pop_scope();
                    builder.attach(element)?;
                }
                Ok(Event::Text(e)) => {
                    let raw = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    // Literal line breaks are normalized before references
                    // are expanded, so `&#13;` still yields a carriage return
                    let raw = normalize_line_endings(&raw);
                    let text = unescape(&raw).map_err(|e| Error::Parse(e.to_string()))?;
                    builder.pending_text.push_str(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    builder.pending_text.push_str(&normalize_line_endings(&text));
                }
                Ok(Event::Comment(e)) => {
                    builder.flush_text()?;
                    let comment = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|e| Error::Parse(e.to_string()))?
                        .into_owned();
                    // Comments outside the root element are not part of the tree
                    if let Some(parent) = builder.stack.last_mut() {
                        parent.children.push(Node::Comment(comment));
                    }
                }
                Ok(Event::Decl(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Parse(e.to_string())),
            }
            buf.clear();
        }

        builder.finish()
    }
}

/// Accumulates the tree while events stream in.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
    pending_text: String,
    namespaces: NamespaceContext,
}

impl TreeBuilder {
    /// Builds an element from a start tag and enters its namespace scope.
    fn open_element<R>(&mut self, e: &BytesStart, reader: &Reader<R>) -> Result<Element> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::Parse("multiple root elements".into()));
        }

        let raw_name = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .into_owned();

        let mut raw_attributes = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .into_owned();
            raw_attributes.push((key, value));
        }

        // Declarations on this element are in scope for its own name
        self.namespaces.push_scope();
        for (key, value) in &raw_attributes {
            if let Some(prefix) = declared_prefix(key) {
                if !prefix.is_empty() && value.is_empty() {
                    return Err(Error::Parse(format!(
                        "namespace prefix '{}' cannot be bound to an empty URI",
                        prefix
                    )));
                }
                self.namespaces.bind(prefix, value);
            }
        }

        let name = QName::parse(&raw_name);
        if let Some(prefix) = &name.prefix {
            self.check_prefix(prefix, &raw_name)?;
        }

        let mut attributes = Vec::with_capacity(raw_attributes.len());
        for (key, value) in raw_attributes {
            let attr_name = QName::parse(&key);
            if let Some(prefix) = &attr_name.prefix {
                if declared_prefix(&key).is_none() {
                    self.check_prefix(prefix, &key)?;
                }
            }
            attributes.push(Attribute {
                name: attr_name,
                value,
            });
        }

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Fails unless `prefix` is bound in the current scope.
    fn check_prefix(&self, prefix: &str, qname: &str) -> Result<()> {
        match self.namespaces.resolve(prefix) {
            Some(_) => Ok(()),
            None => Err(Error::Parse(format!(
                "undeclared namespace prefix in '{}'",
                qname
            ))),
        }
    }

    /// Adds a finished element to its parent, or makes it the root.
    fn attach(&mut self, element: Element) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None if self.root.is_none() => self.root = Some(element),
            None => return Err(Error::Parse("multiple root elements".into())),
        }
        Ok(())
    }

    /// Turns accumulated character data into a text node.
    fn flush_text(&mut self) -> Result<()> {
        let text = std::mem::take(&mut self.pending_text);
        if trim_xml_whitespace(&text).is_empty() {
            return Ok(());
        }
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(Node::Text(text));
                Ok(())
            }
            None => Err(Error::Parse(
                "text content is not allowed outside the root element".into(),
            )),
        }
    }

    fn finish(mut self) -> Result<Document> {
        self.flush_text()?;
        if let Some(open) = self.stack.last() {
            return Err(Error::Parse(format!("unclosed element '{}'", open.name)));
        }
        self.root
            .map(Document::new)
            .ok_or_else(|| Error::Parse("no root element".into()))
    }
}

/// Converts `\r\n` and lone `\r` to `\n`.
fn normalize_line_endings(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Parses XML from a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    XmlParser::new().parse_file(path)
}

/// Parses XML from a string.
pub fn parse_str(xml: &str) -> Result<Document> {
    XmlParser::new().parse_str(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XAML_NS: &str = r#"xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml""#;

    #[test]
    fn test_parse_simple_xml() {
        let doc = parse_str(r#"<root><child>text</child></root>"#).unwrap();

        assert_eq!(doc.root.name.to_string(), "root");
        assert_eq!(doc.root.children.len(), 1);
        match &doc.root.children[0] {
            Node::Element(child) => assert_eq!(child.children, vec![Node::Text("text".into())]),
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_with_attributes_in_document_order() {
        let xml = format!(r#"<Grid {} x:Name="root" Width="10" />"#, XAML_NS);
        let doc = parse_str(&xml).unwrap();

        let names: Vec<String> = doc
            .root
            .attributes
            .iter()
            .map(|a| a.name.to_string())
            .collect();
        assert_eq!(names, ["xmlns", "xmlns:x", "x:Name", "Width"]);
        assert_eq!(doc.root.attributes[2].value, "root");
    }

    #[test]
    fn test_non_breaking_space_is_content() {
        let doc = parse_str("<TextBlock>&#160;</TextBlock>").unwrap();
        assert_eq!(doc.root.children, vec![Node::Text("\u{a0}".into())]);
    }

    #[test]
    fn test_line_endings_are_normalized_but_references_kept() {
        let doc = parse_str("<a>one\r\ntwo\rthree&#13;four</a>").unwrap();
        assert_eq!(
            doc.root.children,
            vec![Node::Text("one\ntwo\nthree\rfour".into())]
        );
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let doc = parse_str("<a>\n    <b />\n    </a>").unwrap();
        assert_eq!(doc.root.children.len(), 1);
        assert!(doc.root.children[0].is_element());
    }

    #[test]
    fn test_text_is_kept_raw_and_unescaped() {
        let doc = parse_str("<a>  1 &lt; 2 &amp;&amp; <![CDATA[x]]>  </a>").unwrap();
        assert_eq!(doc.root.children, vec![Node::Text("  1 < 2 && x  ".into())]);
    }

    #[test]
    fn test_comments_are_kept() {
        let doc = parse_str("<!-- outside --><a><!-- inside --></a>").unwrap();
        assert_eq!(doc.root.children, vec![Node::Comment(" inside ".into())]);
    }

    #[test]
    fn test_declaration_and_processing_instructions_ignored() {
        let doc = parse_str(r#"<?xml version="1.0" encoding="utf-8"?><?pi data?><a/>"#).unwrap();
        assert_eq!(doc.root.name.local, "a");
    }

    #[test]
    fn test_undeclared_prefix_is_rejected() {
        let err = parse_str(r#"<Grid x:Name="a" />"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = parse_str(r#"<local:Control />"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_element_prefix_resolves_against_own_declarations() {
        let doc = parse_str(r#"<local:Control xmlns:local="clr-namespace:App" />"#).unwrap();
        assert_eq!(doc.root.name.prefix.as_deref(), Some("local"));

        let err = parse_str(r#"<Grid><local:Control xmlns:local="urn:a" /><local:Control /></Grid>"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        for xml in [
            "",
            "<a>",
            "<a></b>",
            "<a/><b/>",
            "text<a/>",
            r#"<a x="1" x="2"/>"#,
            "<a>&unknown;</a>",
        ] {
            assert!(
                matches!(parse_str(xml), Err(Error::Parse(_))),
                "expected parse error for {:?}",
                xml
            );
        }
    }
}
