//! Formatter configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_BLOCK_ELEMENTS, DEFAULT_INDENT_SIZE, DEFAULT_MAX_LINE_WIDTH,
    DEFAULT_ONE_LINE_ELEMENTS, DEFAULT_REPLACEMENTS, DEFAULT_SPACE_AFTER_SUFFIXES,
    MAX_INDENT_SIZE,
};
use crate::error::{Error, Result};

/// Maps an exact attribute value to a canonical substitute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementRule {
    /// Literal value to match, compared exactly.
    pub value: String,
    /// Value emitted instead.
    pub replacement: String,
}

impl ReplacementRule {
    /// Creates a rule.
    pub fn new(value: impl Into<String>, replacement: impl Into<String>) -> Self {
        ReplacementRule {
            value: value.into(),
            replacement: replacement.into(),
        }
    }
}

/// Options for formatting.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// indent_size = 2
/// key_rewrite_exclusions = ["KeyBinding"]
///
/// [[replacements]]
/// value = "#FFFF0000"
/// replacement = "Red"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent_size: usize,
    /// Width limit for keeping a single attribute on the tag line.
    pub max_line_width: usize,
    /// Attribute value substitutions.
    pub replacements: Vec<ReplacementRule>,
    /// Element names preceded by a blank line.
    pub block_elements: Vec<String>,
    /// Element names whose attributes always stay on one line.
    pub one_line_elements: Vec<String>,
    /// Element name suffixes followed by a blank line.
    pub space_after_suffixes: Vec<String>,
    /// Elements whose `Key` attribute is not a resource key (e.g. `KeyBinding`).
    /// Their `Key` is neither rewritten to `x:Key` nor registered.
    pub key_rewrite_exclusions: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent_size: DEFAULT_INDENT_SIZE,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            replacements: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(value, replacement)| ReplacementRule::new(*value, *replacement))
                .collect(),
            block_elements: to_strings(&DEFAULT_BLOCK_ELEMENTS),
            one_line_elements: to_strings(&DEFAULT_ONE_LINE_ELEMENTS),
            space_after_suffixes: to_strings(&DEFAULT_SPACE_AFTER_SUFFIXES),
            key_rewrite_exclusions: Vec::new(),
        }
    }
}

impl FormatOptions {
    /// Parses options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that values are in range.
    pub fn validate(&self) -> Result<()> {
        if self.indent_size > MAX_INDENT_SIZE {
            return Err(Error::Config(format!(
                "indent_size must be at most {}, got {}",
                MAX_INDENT_SIZE, self.indent_size
            )));
        }
        Ok(())
    }

    /// Loads options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Looks up the substitute for an attribute value.
    pub fn replacement_for(&self, value: &str) -> Option<&str> {
        self.replacements
            .iter()
            .find(|rule| rule.value == value)
            .map(|rule| rule.replacement.as_str())
    }

    /// Returns true if `Key` on this element must be left untouched.
    pub fn is_key_excluded(&self, element_name: &str) -> bool {
        self.key_rewrite_exclusions.iter().any(|n| n == element_name)
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
