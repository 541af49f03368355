//! Constants used throughout xaml-fmt.
//!
//! These are the built-in defaults; most of them can be overridden through
//! [`FormatOptions`](crate::FormatOptions).

/// Number of spaces added per nesting level.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Largest accepted indentation step.
pub const MAX_INDENT_SIZE: usize = 32;

/// A single attribute stays on the tag line while attribute length plus
/// child indentation does not exceed this width.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 200;

/// Prefix reserved for markup identity attributes (`x:Name`, `x:Key`, `x:Class`).
pub const IDENTITY_PREFIX: &str = "x";

/// Prefix of namespace declaration attributes.
pub const XMLNS: &str = "xmlns";

/// Namespace URI bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Local attribute name registered as an element identifier.
pub const NAME_ATTRIBUTE: &str = "Name";

/// Local attribute name registered as a resource key.
pub const KEY_ATTRIBUTE: &str = "Key";

/// Default colour literals and their named equivalents.
pub const DEFAULT_REPLACEMENTS: [(&str, &str); 3] = [
    ("#00FFFFFF", "Transparent"),
    ("#FF000000", "Black"),
    ("#FFFFFFFF", "White"),
];

/// Elements that always get a blank line before them.
pub const DEFAULT_BLOCK_ELEMENTS: [&str; 3] = ["Style", "DataTemplate", "ControlTemplate"];

/// Elements whose attributes always stay on the tag line.
pub const DEFAULT_ONE_LINE_ELEMENTS: [&str; 4] = ["Setter", "Trigger", "DataTrigger", "Condition"];

/// Element name suffixes that get a blank line after the element.
pub const DEFAULT_SPACE_AFTER_SUFFIXES: [&str; 1] = [".MergedDictionaries"];
