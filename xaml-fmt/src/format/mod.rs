//! The formatting engine.
//!
//! [`Formatter`] renders an element tree to canonical text and scans that text
//! for names, keys and namespace prefixes that look unused.
//!
//! A formatter holds only configuration. Every call builds its own
//! [`UsageRegistry`] and [`FormatState`], so the same formatter can be reused
//! and results never leak between documents.

pub mod options;
pub mod ordering;
pub mod rewriter;
pub mod rules;
pub mod serializer;
pub mod usage;

use std::fs;
use std::path::Path;

pub use options::{FormatOptions, ReplacementRule};
pub use ordering::{sort_attributes, AttributeOrdering, XamlAttributeOrder};
pub use rewriter::AttributeRewriter;
pub use serializer::{FormatState, Serializer};
pub use usage::{UsageRegistry, UsageReport};

use crate::error::{Error, Result};
use crate::node::Document;
use crate::xml::{parse_file, parse_str};

/// The result of formatting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// The formatted document.
    pub text: String,
    /// Every name, key and namespace prefix declared in the document.
    pub registry: UsageRegistry,
    /// Declarations that look unused.
    pub usage: UsageReport,
}

/// Formats documents.
#[derive(Debug, Clone, Default)]
pub struct Formatter<O = XamlAttributeOrder> {
    options: FormatOptions,
    ordering: O,
}

impl Formatter {
    /// Creates a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Formatter {
            options,
            ordering: XamlAttributeOrder,
        }
    }
}

impl<O: AttributeOrdering> Formatter<O> {
    /// Creates a formatter with a custom attribute ordering.
    pub fn with_ordering(options: FormatOptions, ordering: O) -> Self {
        Formatter { options, ordering }
    }

    /// The options in use.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Renders a parsed document and scans the result for unused declarations.
    pub fn format_document(&self, document: &Document) -> Result<Formatted> {
        self.options.validate()?;
        let (text, registry) = Serializer::new(&self.options, &self.ordering).render(document)?;
        let usage = usage::scan(&text, &registry);
        Ok(Formatted {
            text,
            registry,
            usage,
        })
    }

    /// Parses, formats and verifies a document held in memory.
    pub fn format_str(&self, xml: &str) -> Result<Formatted> {
        let document = parse_str(xml)?;
        let formatted = self.format_document(&document)?;
        verify_output(&formatted.text)?;
        Ok(formatted)
    }

    /// Formats `source` into `destination`, then re-reads the destination to
    /// make sure the written output is well-formed.
    ///
    /// Output that fails to re-parse is never written, so `destination` is
    /// left untouched on error. `source` and `destination` may be the same
    /// file.
    pub fn format_file<P, Q>(&self, source: P, destination: Q) -> Result<Formatted>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let document = parse_file(source)?;
        let formatted = self.format_document(&document)?;
        verify_output(&formatted.text)?;
        fs::write(destination.as_ref(), &formatted.text)?;
        parse_file(destination.as_ref()).map_err(defect)?;
        Ok(formatted)
    }
}

/// Re-parses formatted output.
///
/// Input that reached the formatter already parsed once, so a failure here is
/// reported as [`Error::InternalDefect`], never as a parse error.
pub fn verify_output(text: &str) -> Result<()> {
    parse_str(text).map(|_| ()).map_err(defect)
}

fn defect(error: Error) -> Error {
    match error {
        Error::InternalDefect(_) => error,
        other => Error::InternalDefect(Box::new(other)),
    }
}
