//! Tree edits the operations are made of

use xmlstoke_traits::{NodeType, XmlEngine};

use crate::error::Result;
use crate::namespace::ResolvedName;
use crate::selector::select_within;

/// Higher-level edits on top of the raw tree primitives.
///
/// Every method ignores nodes an earlier edit already took out of the
/// tree.
pub trait DocumentMutator: XmlEngine {
    /// Set an attribute's value, or replace an element's content with text
    fn write_value(&mut self, node: &Self::Node, value: &str) -> Result<()> {
        if !self.contains(node) {
            return Ok(());
        }
        match self.node_type(node) {
            NodeType::Attribute => self.set_attribute_value(node, value)?,
            _ => self.set_text_content(node, value)?,
        }
        Ok(())
    }

    /// Remove a node from its parent, or an attribute from its element.
    ///
    /// Returns whether anything was removed.
    fn detach(&mut self, node: &Self::Node) -> Result<bool> {
        if !self.contains(node) {
            return Ok(false);
        }
        self.remove_node(node)?;
        Ok(true)
    }

    /// Create or overwrite an attribute of `element`
    fn upsert_attribute(&mut self, element: &Self::Node, name: &ResolvedName, value: &str) -> Result<()> {
        if !self.contains(element) {
            return Ok(());
        }
        self.set_attribute(element, &name.local_name, value, name.namespace())?;
        Ok(())
    }

    /// Find the child element `name` of `context`, creating it when missing.
    ///
    /// A non-empty `value` replaces the element's content; an empty one
    /// leaves an existing element as it was.
    fn upsert_element(
        &mut self,
        context: &Self::Node,
        name: &ResolvedName,
        value: &str,
    ) -> Result<Option<Self::Node>> {
        if !self.contains(context) {
            return Ok(None);
        }
        if self.node_type(context) != NodeType::Element {
            return Err(xmlstoke_traits::Error::node_access(format!(
                "Cannot insert element {} below a {:?} node",
                name.qualified(),
                self.node_type(context)
            ))
            .into());
        }
        let existing = select_within(self, &name.qualified(), context)?
            .iter()
            .find(|node| self.node_type(node) == NodeType::Element);
        let element = match existing {
            Some(element) => element,
            None => {
                let element = self.create_element(name.creation_local_name(), name.namespace())?;
                self.append_child(context, &element)?;
                element
            }
        };
        if !value.is_empty() {
            self.set_text_content(&element, value)?;
        }
        Ok(Some(element))
    }

    /// Attribute value or text content of a node
    fn extract_value(&self, node: &Self::Node) -> String {
        self.node_value(node).unwrap_or_default()
    }
}

impl<E: XmlEngine + ?Sized> DocumentMutator for E {}
