//! XML tree abstraction trait

use crate::error::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node
    Element,
    /// Attribute node
    Attribute,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Processing instruction node
    ProcessingInstruction,
    /// Namespace node
    Namespace,
}

/// A namespace a created element or attribute is qualified with.
///
/// The prefix is the one the name is written with on output; trees
/// declare it on the nearest sensible element when it is not already
/// in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedNamespace<'a> {
    pub prefix: &'a str,
    pub uri: &'a str,
}

/// Trait for XML tree implementations.
///
/// An implementation holds exactly one parsed document. Node handles
/// are cheap copies that stay valid until the node is removed; use
/// [`XmlTree::contains`] before touching a node that an earlier
/// mutation may have taken out of the tree.
pub trait XmlTree {
    /// Type representing a node handle in this tree
    type Node: Copy + Eq + Hash + Debug;

    /// Parse XML from a string into a new tree
    fn parse_xml(xml: &str) -> Result<Self>
    where
        Self: Sized;

    /// Get the document node
    fn root(&self) -> Self::Node;

    /// Get the document element (root element)
    fn document_element(&self) -> Result<Self::Node>;

    /// Whether the node is still part of this tree
    fn contains(&self, node: &Self::Node) -> bool;

    /// Get the parent of a node, if it has one.
    ///
    /// The parent of an attribute is its owning element.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Get all children of a node
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Get all attributes of an element node as (name, value) pairs
    fn attributes(&self, node: &Self::Node) -> Vec<(String, String)>;

    /// Get the qualified name of a node (if applicable)
    fn node_name(&self, node: &Self::Node) -> Option<String>;

    /// Get the local name of a node (without namespace prefix)
    fn node_local_name(&self, node: &Self::Node) -> Option<String>;

    /// Get the namespace URI of a node
    fn node_namespace_uri(&self, node: &Self::Node) -> Option<String>;

    /// Get the value of a node.
    ///
    /// Attributes give their value, elements and documents the
    /// concatenated text of all their descendants.
    fn node_value(&self, node: &Self::Node) -> Option<String>;

    /// Get the type of a node
    fn node_type(&self, node: &Self::Node) -> NodeType;

    /// Serialize a node to an XML string
    fn serialize(&self, node: &Self::Node) -> Result<String>;

    /// Serialize the whole document to an XML string
    fn serialize_document(&self) -> Result<String> {
        self.serialize(&self.root())
    }

    /// Serialize the whole document, preceded by an XML declaration
    fn serialize_document_with_declaration(&self) -> Result<String>;
}

/// Mutation primitives on top of [`XmlTree`]
pub trait MutableXmlTree: XmlTree {
    /// Replace all children of a node with a single text node.
    ///
    /// An empty text leaves the node without children. On a text node
    /// this sets its text.
    fn set_text_content(&mut self, node: &Self::Node, text: &str) -> Result<()>;

    /// Set the value of an attribute node
    fn set_attribute_value(&mut self, attribute: &Self::Node, value: &str) -> Result<()>;

    /// Remove an attribute node from its owning element
    fn remove_attribute_node(&mut self, attribute: &Self::Node) -> Result<()>;

    /// Remove a node (and its descendants) from its parent
    fn remove_node(&mut self, node: &Self::Node) -> Result<()>;

    /// Create a new, unattached element node
    fn create_element(
        &mut self,
        local_name: &str,
        namespace: Option<QualifiedNamespace<'_>>,
    ) -> Result<Self::Node>;

    /// Append a child to a node
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Set an attribute on an element, creating it if needed
    fn set_attribute(
        &mut self,
        element: &Self::Node,
        local_name: &str,
        value: &str,
        namespace: Option<QualifiedNamespace<'_>>,
    ) -> Result<()>;
}
