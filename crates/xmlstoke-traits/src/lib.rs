//! Core trait abstractions for XML engines driven by xmlstoke.
//!
//! This crate defines the document model and XPath capabilities an
//! engine must provide so the action engine can select and mutate
//! nodes without knowing which XML library sits underneath.

pub mod error;
pub mod tree;
pub mod xpath;

pub use error::{Error, Result};
pub use tree::{MutableXmlTree, NodeType, QualifiedNamespace, XmlTree};
pub use xpath::{NamespaceMap, XPathEngine};

/// Trait for engines that can both query and mutate a single document
pub trait XmlEngine: MutableXmlTree + XPathEngine {
    fn engine_name(&self) -> &'static str;
    fn engine_version(&self) -> &'static str;
}
