//! xaml-fmt - canonical XAML/XML formatting
//!
//! This library rewrites markup documents into one canonical layout and points
//! out element names, resource keys and namespace prefixes that look unused.
//!
//! # Overview
//!
//! A document is parsed into a read-only element tree, then rendered in a
//! single depth-first pass:
//!
//! - attributes are rewritten (`Name` becomes `x:Name`, `Key` becomes `x:Key`,
//!   known colour literals become colour names) and sorted so that identity
//!   attributes come first, then namespace declarations, then the rest;
//! - short attribute lists stay on the tag line, longer ones get a line each;
//! - blank lines separate top-level children and block elements such as
//!   `Style` and `DataTemplate`.
//!
//! The rendered text is then scanned for references to every declared name,
//! key and namespace prefix. The scan is lexical, so its findings are hints.
//!
//! # Example
//!
//! ```
//! use xaml_fmt::Formatter;
//!
//! let xaml = r#"<Grid xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation"
//!     xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" Name="root" />"#;
//!
//! let formatted = Formatter::new().format_str(xaml).unwrap();
//! assert!(formatted.text.contains(r#"x:Name="root""#));
//! assert_eq!(formatted.usage.unused_names, ["root"]);
//! ```

pub mod constants;
pub mod error;
pub mod format;
pub mod node;
pub mod xml;

// Re-export commonly used types
pub use constants::*;
pub use error::{Error, Result};
pub use format::{
    verify_output, AttributeOrdering, FormatOptions, FormatState, Formatted, Formatter,
    ReplacementRule, UsageRegistry, UsageReport, XamlAttributeOrder,
};
pub use node::{Attribute, Document, Element, NamespaceContext, Node, QName};
pub use xml::{parse_file, parse_str, XmlParser};
