//! Qualified names and namespace scope tracking.

use std::collections::HashMap;
use std::fmt;

use crate::constants::{XMLNS, XML_NAMESPACE};

/// A name as written in the document, split at its prefix separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// The namespace prefix, if any.
    pub prefix: Option<String>,
    /// The local part of the name.
    pub local: String,
}

impl QName {
    /// Creates an unprefixed name.
    pub fn local(local: impl Into<String>) -> Self {
        QName {
            prefix: None,
            local: local.into(),
        }
    }

    /// Creates a prefixed name.
    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        QName {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Splits `prefix:local` at the first separator.
    pub fn parse(qname: &str) -> Self {
        match split_qname(qname) {
            (Some(prefix), local) => QName::prefixed(prefix, local),
            (None, local) => QName::local(local),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Tracks namespace bindings while walking a document.
#[derive(Debug)]
pub struct NamespaceContext {
    /// Stack of scopes, each containing prefix -> URI bindings.
    scopes: Vec<HashMap<String, String>>,
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceContext {
    /// Creates a new namespace context with the `xml` prefix pre-bound.
    pub fn new() -> Self {
        let mut ctx = NamespaceContext {
            scopes: vec![HashMap::new()],
        };
        ctx.bind("xml", XML_NAMESPACE);
        ctx
    }

    /// Pushes a new scope for entering an element.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the current scope when leaving an element.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Binds a prefix to a URI in the current scope. The empty prefix is the
    /// default namespace.
    pub fn bind(&mut self, prefix: &str, uri: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(prefix.to_string(), uri.to_string());
        }
    }

    /// Resolves a prefix to its URI, searching from innermost scope.
    ///
    /// An empty binding (`xmlns=""`) resolves to `None`.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(prefix))
            .map(String::as_str)
            .filter(|uri| !uri.is_empty())
    }
}

/// Splits a qualified name into prefix and local name.
///
/// Returns (Some(prefix), local) for "prefix:local"
/// Returns (None, name) for "name" without prefix
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some(pos) = qname.find(':') {
        (Some(&qname[..pos]), &qname[pos + 1..])
    } else {
        (None, qname)
    }
}

/// Returns the prefix declared by a namespace declaration attribute: `""`
/// for `xmlns`, `p` for `xmlns:p`, `None` for anything else.
pub fn declared_prefix(name: &str) -> Option<&str> {
    if name == XMLNS {
        Some("")
    } else {
        name.strip_prefix("xmlns:")
    }
}
