//! Error types for action execution

use std::fmt;

use crate::action::OperationKind;

/// Result type for action execution
pub type Result<T> = std::result::Result<T, Error>;

/// Why a read produced nothing worth publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    /// The query matched no node and there was no callback
    NoMatch,
    /// The callback returned nothing
    Rejected,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailure::NoMatch => write!(f, "Failed to extract node value"),
            ReadFailure::Rejected => write!(f, "Node value rejected by callback"),
        }
    }
}

/// Everything that can stop an action
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A name or query used a prefix missing from the namespace map
    #[error("No URI given for namespace {0} in options.namespaces")]
    UnboundNamespacePrefix(String),

    /// An insertion without a node name
    #[error("No node<string> given for insertion (Query: {query})")]
    MissingNodeName { query: String },

    /// A read without a place to publish its value
    #[error("No saveAs<string> given for read (Query: {query})")]
    MissingSaveSlot { query: String },

    /// A read produced no value
    #[error("{cause} (Query: {query}, Option: {save_as})")]
    ReadExtractionFailed {
        query: String,
        save_as: String,
        cause: ReadFailure,
    },

    /// A file group that does not map exactly one source to its destination
    #[error("Only a single src file per dest is supported. {0} given.")]
    InvalidFileGroup(usize),

    /// The underlying XML engine failed
    #[error(transparent)]
    Engine(xmlstoke_traits::Error),
}

impl From<xmlstoke_traits::Error> for Error {
    fn from(error: xmlstoke_traits::Error) -> Self {
        match error {
            xmlstoke_traits::Error::UnboundPrefix(prefix) => Error::UnboundNamespacePrefix(prefix),
            other => Error::Engine(other),
        }
    }
}

/// An error tied to the action that raised it.
///
/// `index` is the position of the action in the normalized list.
#[derive(Debug, thiserror::Error)]
#[error("{operation} action #{index} failed: {error}")]
pub struct ActionError {
    pub index: usize,
    pub operation: OperationKind,
    pub error: Error,
}
