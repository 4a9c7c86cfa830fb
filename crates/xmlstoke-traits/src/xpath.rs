//! XPath engine abstraction trait

use std::collections::BTreeMap;

use crate::error::Result;
use crate::tree::XmlTree;

/// Namespace bindings (prefix -> uri)
pub type NamespaceMap = BTreeMap<String, String>;

/// Trait for XPath query engines.
///
/// Note: This trait does not require Send + Sync as most XML
/// libraries use Rc<T> for internal references.
pub trait XPathEngine: XmlTree {
    /// Bind namespace prefixes for all following queries.
    ///
    /// Bindings replace any earlier ones; they are meant to be set once
    /// before a batch of queries runs.
    fn bind_namespaces(&mut self, namespaces: &NamespaceMap);

    /// Evaluate an XPath expression against a context node.
    ///
    /// The result is fully materialized in document order, so the
    /// caller may mutate the tree while walking it. Selecting anything
    /// but nodes is an error.
    fn select(&mut self, xpath: &str, context: &Self::Node) -> Result<Vec<Self::Node>>;

    /// Evaluate an XPath expression with the document node as context
    fn select_from_root(&mut self, xpath: &str) -> Result<Vec<Self::Node>> {
        let root = self.root();
        self.select(xpath, &root)
    }

    /// Get the XPath version supported by this engine
    fn xpath_version(&self) -> &'static str;
}
