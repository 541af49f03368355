//! Per-attribute rewriting.

use crate::constants::{IDENTITY_PREFIX, KEY_ATTRIBUTE, NAME_ATTRIBUTE};
use crate::format::options::FormatOptions;
use crate::format::usage::UsageRegistry;
use crate::node::namespace::declared_prefix;
use crate::node::{Attribute, Element};
use crate::xml::escape_attribute;

/// Renders attributes to `name="value"` text, applying identity
/// qualification and value replacement, and records declared identifiers.
#[derive(Debug, Clone, Copy)]
pub struct AttributeRewriter<'a> {
    options: &'a FormatOptions,
}

impl<'a> AttributeRewriter<'a> {
    /// Creates a rewriter over the given options.
    pub fn new(options: &'a FormatOptions) -> Self {
        AttributeRewriter { options }
    }

    /// Rewrites one attribute of `element`.
    ///
    /// - `Name` registers its value as a name and becomes `x:Name` when unprefixed.
    /// - `Key` registers its value as a key and becomes `x:Key` when unprefixed,
    ///   unless the element is listed in `key_rewrite_exclusions`.
    /// - `xmlns:p` registers `p` as a namespace.
    /// - Any other value matching a replacement rule is substituted.
    pub fn rewrite(
        &self,
        element: &Element,
        attribute: &Attribute,
        registry: &mut UsageRegistry,
    ) -> String {
        match attribute.local_name() {
            NAME_ATTRIBUTE => {
                registry.add_name(&attribute.value);
                qualify(attribute)
            }
            KEY_ATTRIBUTE if !self.options.is_key_excluded(element.local_name()) => {
                registry.add_key(&attribute.value);
                qualify(attribute)
            }
            KEY_ATTRIBUTE => render(&attribute.name.to_string(), &attribute.value),
            _ => {
                let name = attribute.name.to_string();
                if let Some(prefix) = declared_prefix(&name).filter(|p| !p.is_empty()) {
                    registry.add_namespace(prefix);
                }
                let value = self
                    .options
                    .replacement_for(&attribute.value)
                    .unwrap_or(attribute.value.as_str());
                render(&name, value)
            }
        }
    }
}

/// Renders an identity attribute under the `x` prefix when it has none.
fn qualify(attribute: &Attribute) -> String {
    if attribute.is_qualified() {
        render(&attribute.name.to_string(), &attribute.value)
    } else {
        let name = format!("{}:{}", IDENTITY_PREFIX, attribute.local_name());
        render(&name, &attribute.value)
    }
}

fn render(name: &str, value: &str) -> String {
    format!("{}=\"{}\"", name, escape_attribute(value))
}
