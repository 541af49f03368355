//! Error types for xaml-fmt.

use thiserror::Error;

/// Result type alias for formatter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, formatting or verifying a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document is not well-formed.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The formatter produced output that does not parse again.
    ///
    /// This is never caused by user input: the input already parsed once.
    #[error("a bug has been detected in the formatter - the transformed output is not well-formed XML: {0}")]
    InternalDefect(#[source] Box<Error>),

    /// The attribute ordering failed while sorting one element's attributes.
    #[error("failed while sorting attributes [{attributes}]: {reason}")]
    AttributeSort {
        /// The rendered attributes being sorted, comma separated.
        attributes: String,
        /// What went wrong.
        reason: String,
    },

    /// Invalid formatter configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true when this error signals a formatter bug rather than bad input.
    pub fn is_internal_defect(&self) -> bool {
        matches!(self, Error::InternalDefect(_))
    }
}
