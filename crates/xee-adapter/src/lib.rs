//! xee engine adapter for the xmlstoke engine abstraction
//!
//! This adapter wraps a single xot document, queried through the xee
//! XPath 3.1 engine, to implement the xmlstoke-traits interfaces.

pub mod tree;
pub mod xpath;

use xmlstoke_traits::{NamespaceMap, XmlEngine};
use xot::{Node, Xot};

// Re-export key types for convenience
pub use xot::Node as XotNode;

/// One parsed document together with its xee document store.
///
/// The xot arena lives inside the xee [`xee_xpath::Documents`] so that
/// queries and mutations work on the very same nodes.
#[derive(Debug)]
pub struct XeeDocument {
    pub(crate) documents: xee_xpath::Documents,
    pub(crate) root: Node,
    pub(crate) namespaces: NamespaceMap,
}

impl XeeDocument {
    /// Get a reference to the underlying Xot
    pub fn xot(&self) -> &Xot {
        self.documents.xot()
    }

    /// Get a mutable reference to the underlying Xot
    pub fn xot_mut(&mut self) -> &mut Xot {
        self.documents.xot_mut()
    }

    /// The namespace bindings queries currently run with
    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }
}

impl XmlEngine for XeeDocument {
    fn engine_name(&self) -> &'static str {
        "xee"
    }

    fn engine_version(&self) -> &'static str {
        "0.1.5"
    }
}
