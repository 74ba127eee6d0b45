//! Feed mapping error types.

use thiserror::Error;

/// Error returned when a feed document cannot be mapped.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The body is not well-formed XML.
    #[error("malformed feed document: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The document parsed but its root element is not an Atom `feed`.
    #[error("expected a <feed> root element, found <{0}>")]
    UnexpectedRoot(String),
}
