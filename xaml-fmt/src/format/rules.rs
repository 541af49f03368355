//! Whitespace and layout predicates.

use crate::format::options::FormatOptions;
use crate::node::Element;

/// Returns true if a blank line goes before the element: it is the second
/// element visited in the document, or its name is a block element.
pub fn is_space_before(options: &FormatOptions, element: &Element, element_count: usize) -> bool {
    element_count == 2 || contains(&options.block_elements, element.local_name())
}

/// Returns true if a blank line goes after the element: its name ends with a
/// configured suffix (`.MergedDictionaries`), or it is a direct child of the
/// root element.
pub fn is_space_after(options: &FormatOptions, element: &Element, depth: usize) -> bool {
    let name = element.local_name();
    depth == 1
        || options
            .space_after_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
}

/// Returns true if the rendered attributes stay on the tag line.
///
/// A single attribute stays when its length plus the child indentation fits
/// `max_line_width`; one-line elements always stay.
pub fn is_one_line(
    options: &FormatOptions,
    element: &Element,
    attributes: &[String],
    child_indent: usize,
) -> bool {
    let single_fits = match attributes {
        [only] => only.chars().count() + child_indent <= options.max_line_width,
        _ => false,
    };
    single_fits || contains(&options.one_line_elements, element.local_name())
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}
