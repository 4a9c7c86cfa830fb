//! Canonical actions, the output of normalization

use std::fmt;

use crate::value::{ReadCallback, ValueSource};

/// The four things an action can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Update,
    Delete,
    Insert,
}

impl OperationKind {
    /// Pick an operation from a free-form `type` field.
    ///
    /// Only the first letter counts: `R`ead, `D`elete, `I`nsert or
    /// `C`reate. Anything else, including no type at all, is an update.
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name.and_then(|n| n.chars().next()).map(|c| c.to_ascii_lowercase()) {
            Some('r') => OperationKind::Read,
            Some('d') => OperationKind::Delete,
            Some('i') | Some('c') => OperationKind::Insert,
            _ => OperationKind::Update,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Read => "Read",
            OperationKind::Update => "Update",
            OperationKind::Delete => "Delete",
            OperationKind::Insert => "Insert",
        };
        f.write_str(name)
    }
}

/// An operation with the fields it needs
#[derive(Debug, Clone)]
pub enum Operation {
    Read {
        save_as: Option<String>,
        callback: Option<ReadCallback>,
        return_array: bool,
    },
    Update {
        value: ValueSource,
    },
    Delete,
    Insert {
        node: Option<String>,
        value: ValueSource,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Read { .. } => OperationKind::Read,
            Operation::Update { .. } => OperationKind::Update,
            Operation::Delete => OperationKind::Delete,
            Operation::Insert { .. } => OperationKind::Insert,
        }
    }
}

/// One unit of work: an operation over the nodes its queries select.
///
/// Normalization never builds an action without queries.
#[derive(Debug, Clone)]
pub struct Action {
    pub operation: Operation,
    pub queries: Vec<String>,
}

impl Action {
    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    /// The query reported in errors
    pub fn first_query(&self) -> &str {
        self.queries.first().map(String::as_str).unwrap_or_default()
    }
}
