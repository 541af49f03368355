//! Usage detection for declared names, keys and namespace prefixes.
//!
//! The scan is lexical and runs over the rendered text, not the tree. It
//! cannot tell a coincidental match from a real reference, so it may over- or
//! under-report. Results are hints, not a reference analysis.

use regex::Regex;

/// Identifiers collected during one formatting pass.
///
/// Each list keeps first-declaration order and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageRegistry {
    names: Vec<String>,
    keys: Vec<String>,
    namespaces: Vec<String>,
}

impl UsageRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value declared through a `Name` attribute.
    pub fn add_name(&mut self, name: &str) {
        push_unique(&mut self.names, name);
    }

    /// Records a value declared through a `Key` attribute.
    pub fn add_key(&mut self, key: &str) {
        push_unique(&mut self.keys, key);
    }

    /// Records a prefix declared through an `xmlns:` attribute.
    pub fn add_namespace(&mut self, prefix: &str) {
        push_unique(&mut self.namespaces, prefix);
    }

    /// Declared element names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Declared resource keys.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Declared namespace prefixes.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Identifiers that look unused in the rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageReport {
    /// Names that occur only at their declaration.
    pub unused_names: Vec<String>,
    /// Keys that occur only at their declaration.
    pub unused_keys: Vec<String>,
    /// Prefixes never used as `prefix:`.
    pub unused_namespaces: Vec<String>,
}

impl UsageReport {
    /// Returns true when nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.unused_names.is_empty()
            && self.unused_keys.is_empty()
            && self.unused_namespaces.is_empty()
    }
}

/// Scans rendered text for references to every registered identifier.
///
/// A name or key counts once per occurrence delimited on the left by a
/// quote, whitespace or `=` and on the right by a quote, `}`, whitespace or
/// `,`. Fewer than two occurrences (the declaration plus one reference) marks
/// it as possibly unused. A namespace prefix is unused when `prefix:` never
/// follows `<`, whitespace or a quote.
pub fn scan(text: &str, registry: &UsageRegistry) -> UsageReport {
    UsageReport {
        unused_names: unreferenced(text, registry.names()),
        unused_keys: unreferenced(text, registry.keys()),
        unused_namespaces: registry
            .namespaces()
            .iter()
            .filter(|prefix| !namespace_used(text, prefix))
            .cloned()
            .collect(),
    }
}

fn unreferenced(text: &str, identifiers: &[String]) -> Vec<String> {
    identifiers
        .iter()
        .filter(|identifier| occurrences(text, identifier) < 2)
        .cloned()
        .collect()
}

/// Counts delimited, non-overlapping occurrences of an identifier.
pub fn occurrences(text: &str, identifier: &str) -> usize {
    let pattern = format!(r#"("|\s|=){}("|\}}|\s|,)"#, regex::escape(identifier));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(text).count(),
        // An escaped literal always compiles unless it exceeds the size limit
        Err(_) => text.matches(identifier).count(),
    }
}

/// Returns true if `prefix:` appears after `<`, whitespace or a quote.
pub fn namespace_used(text: &str, prefix: &str) -> bool {
    let pattern = format!(r#"(<|\s|"){}:"#, regex::escape(prefix));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => text.contains(&format!("{}:", prefix)),
    }
}
