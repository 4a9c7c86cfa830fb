//! XmlTree and MutableXmlTree implementations for xot

use xmlstoke_traits::{
    error::{Error, Result},
    tree::{MutableXmlTree, NodeType, QualifiedNamespace, XmlTree},
    NamespaceMap,
};
use xot::{output, NamespaceId, Node, PrefixId, ValueType, Xot};

use crate::XeeDocument;

fn xot_error(e: xot::Error) -> Error {
    Error::NodeAccess(e.to_string())
}

fn ensure_element(xot: &Xot, node: Node) -> Result<()> {
    match xot.value_type(node) {
        ValueType::Element => Ok(()),
        other => Err(Error::node_access(format!(
            "Expected an element node, got {:?}",
            other
        ))),
    }
}

/// `preferred`, or the first of `preferred1`, `preferred2`, ... that is
/// unbound at `element` or already bound to `namespace`. Rebinding a
/// prefix in use would shadow the names below it.
fn free_prefix(xot: &mut Xot, element: Node, preferred: &str, namespace: NamespaceId) -> PrefixId {
    let mut candidate = xot.add_prefix(preferred);
    let mut n = 1;
    while matches!(xot.namespace_for_prefix(element, candidate), Some(bound) if bound != namespace) {
        candidate = xot.add_prefix(&format!("{}{}", preferred, n));
        n += 1;
    }
    candidate
}

impl XmlTree for XeeDocument {
    type Node = Node;

    fn parse_xml(xml: &str) -> Result<Self> {
        let mut documents = xee_xpath::Documents::new();
        let handle = documents
            .add_string_without_uri(xml)
            .map_err(|e| Error::XmlParse(e.to_string()))?;
        let root = documents
            .document_node(handle)
            .ok_or_else(|| Error::node_access("Parsed document has no document node"))?;
        Ok(Self {
            documents,
            root,
            namespaces: NamespaceMap::new(),
        })
    }

    fn root(&self) -> Self::Node {
        self.root
    }

    fn document_element(&self) -> Result<Self::Node> {
        self.xot().document_element(self.root).map_err(xot_error)
    }

    fn contains(&self, node: &Self::Node) -> bool {
        !self.xot().is_removed(*node)
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        self.xot().parent(*node)
    }

    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        self.xot().children(*node).collect()
    }

    fn attributes(&self, node: &Self::Node) -> Vec<(String, String)> {
        let xot = self.xot();
        xot.attributes(*node)
            .iter()
            .map(|(name, value)| {
                let name_str = xot
                    .full_name(*node, name)
                    .unwrap_or_else(|_| xot.local_name_str(name).to_string());
                (name_str, value.clone())
            })
            .collect()
    }

    fn node_name(&self, node: &Self::Node) -> Option<String> {
        let xot = self.xot();
        match xot.value_type(*node) {
            ValueType::Element | ValueType::Attribute => {
                let name = xot.node_name(*node)?;
                xot.full_name(*node, name).ok()
            }
            _ => None,
        }
    }

    fn node_local_name(&self, node: &Self::Node) -> Option<String> {
        let xot = self.xot();
        match xot.value_type(*node) {
            ValueType::Element | ValueType::Attribute => {
                let name = xot.node_name(*node)?;
                Some(xot.local_name_str(name).to_string())
            }
            _ => None,
        }
    }

    fn node_namespace_uri(&self, node: &Self::Node) -> Option<String> {
        let xot = self.xot();
        match xot.value_type(*node) {
            ValueType::Element | ValueType::Attribute => {
                let name = xot.node_name(*node)?;
                let uri = xot.uri_str(name);
                (!uri.is_empty()).then(|| uri.to_string())
            }
            _ => None,
        }
    }

    fn node_value(&self, node: &Self::Node) -> Option<String> {
        Some(self.xot().string_value(*node))
    }

    fn node_type(&self, node: &Self::Node) -> NodeType {
        match self.xot().value_type(*node) {
            ValueType::Document => NodeType::Document,
            ValueType::Element => NodeType::Element,
            ValueType::Text => NodeType::Text,
            ValueType::Comment => NodeType::Comment,
            ValueType::ProcessingInstruction => NodeType::ProcessingInstruction,
            ValueType::Attribute => NodeType::Attribute,
            ValueType::Namespace => NodeType::Namespace,
        }
    }

    fn serialize(&self, node: &Self::Node) -> Result<String> {
        self.xot()
            .to_string(*node)
            .map_err(|e| Error::Serialize(e.to_string()))
    }

    fn serialize_document_with_declaration(&self) -> Result<String> {
        let parameters = output::xml::Parameters {
            declaration: Some(output::xml::Declaration::default()),
            ..Default::default()
        };
        self.xot()
            .serialize_xml_string(parameters, self.root)
            .map_err(|e| Error::Serialize(e.to_string()))
    }
}

impl MutableXmlTree for XeeDocument {
    fn set_text_content(&mut self, node: &Self::Node, text: &str) -> Result<()> {
        let xot = self.xot_mut();
        match xot.value_type(*node) {
            ValueType::Text => {
                if let Some(existing) = xot.text_mut(*node) {
                    existing.set(text);
                }
                Ok(())
            }
            ValueType::Element => {
                let children: Vec<Node> = xot.children(*node).collect();
                for child in children {
                    xot.remove(child).map_err(xot_error)?;
                }
                if !text.is_empty() {
                    xot.append_text(*node, text).map_err(xot_error)?;
                }
                Ok(())
            }
            ValueType::Attribute => self.set_attribute_value(node, text),
            other => Err(Error::node_access(format!(
                "Cannot set text content of a {:?} node",
                other
            ))),
        }
    }

    fn set_attribute_value(&mut self, attribute: &Self::Node, value: &str) -> Result<()> {
        self.xot_mut()
            .attribute_node_mut(*attribute)
            .ok_or_else(|| Error::node_access("Not an attribute node"))?
            .set_value(value);
        Ok(())
    }

    fn remove_attribute_node(&mut self, attribute: &Self::Node) -> Result<()> {
        let xot = self.xot_mut();
        let name = xot
            .attribute_node(*attribute)
            .ok_or_else(|| Error::node_access("Not an attribute node"))?
            .name();
        let owner = xot
            .parent(*attribute)
            .ok_or_else(|| Error::node_access("Attribute has no owning element"))?;
        xot.remove_attribute(owner, name);
        Ok(())
    }

    fn remove_node(&mut self, node: &Self::Node) -> Result<()> {
        match self.xot().value_type(*node) {
            ValueType::Attribute => self.remove_attribute_node(node),
            ValueType::Document => Err(Error::node_access("Cannot remove the document node")),
            _ => self.xot_mut().remove(*node).map_err(xot_error),
        }
    }

    fn create_element(
        &mut self,
        local_name: &str,
        namespace: Option<QualifiedNamespace<'_>>,
    ) -> Result<Self::Node> {
        let xot = self.xot_mut();
        let element = match namespace {
            Some(ns) => {
                let namespace_id = xot.add_namespace(ns.uri);
                let prefix_id = xot.add_prefix(ns.prefix);
                let name = xot.add_name_ns(local_name, namespace_id);
                let element = xot.new_element(name);
                // Dropped again on append when the parent already has it in scope
                xot.set_namespace(element, prefix_id, namespace_id);
                element
            }
            None => {
                let name = xot.add_name(local_name);
                xot.new_element(name)
            }
        };
        Ok(element)
    }

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()> {
        let xot = self.xot_mut();
        xot.append(*parent, *child).map_err(xot_error)?;
        if xot.value_type(*child) != ValueType::Element {
            return Ok(());
        }
        let declared: Vec<_> = xot
            .namespaces(*child)
            .iter()
            .map(|(prefix, namespace)| (prefix, *namespace))
            .collect();
        for (prefix, namespace) in declared {
            if xot.namespace_for_prefix(*parent, prefix) == Some(namespace) {
                xot.remove_namespace(*child, prefix);
            }
        }
        // A name in no namespace must undeclare an inherited default namespace
        let empty = xot.empty_prefix();
        let no_namespace = xot.no_namespace();
        let unqualified = xot
            .node_name(*child)
            .is_some_and(|name| xot.namespace_for_name(name) == no_namespace);
        if unqualified && xot.namespace_for_prefix(*parent, empty).is_some() {
            xot.set_namespace(*child, empty, no_namespace);
        }
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: &Self::Node,
        local_name: &str,
        value: &str,
        namespace: Option<QualifiedNamespace<'_>>,
    ) -> Result<()> {
        let xot = self.xot_mut();
        ensure_element(xot, *element)?;
        let name = match namespace {
            Some(ns) => {
                let namespace_id = xot.add_namespace(ns.uri);
                let empty = xot.empty_prefix();
                let in_scope = xot
                    .prefix_for_namespace(*element, namespace_id)
                    .is_some_and(|prefix| prefix != empty);
                if !in_scope {
                    let prefix_id = free_prefix(xot, *element, ns.prefix, namespace_id);
                    xot.set_namespace(*element, prefix_id, namespace_id);
                }
                xot.add_name_ns(local_name, namespace_id)
            }
            None => xot.add_name(local_name),
        };
        xot.set_attribute(*element, name, value);
        Ok(())
    }
}
