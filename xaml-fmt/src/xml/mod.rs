//! XML input.
//!
//! Parsing is delegated to quick-xml; this module adapts its event stream into
//! the owned element tree the formatter walks, and escapes text for output.

mod parser;

pub use parser::{parse_file, parse_str, XmlParser};

/// Returns true for the four characters XML treats as whitespace.
///
/// Other Unicode spaces (e.g. U+00A0) are content.
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Trims XML whitespace from both ends.
pub fn trim_xml_whitespace(s: &str) -> &str {
    s.trim_matches(is_xml_whitespace)
}

/// Escapes character data for element content.
///
/// A carriage return becomes a character reference, since a literal one is
/// normalized to a line feed on re-parse.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\r' => result.push_str("&#xD;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes an attribute value for a double-quoted attribute.
///
/// Tabs and line breaks become character references so that the value
/// survives attribute-value normalization on re-parse.
pub fn escape_attribute(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\t' => result.push_str("&#x9;"),
            '\n' => result.push_str("&#xA;"),
            '\r' => result.push_str("&#xD;"),
            _ => result.push(c),
        }
    }
    result
}
