//! Basic tests for xee-adapter

use xee_adapter::XeeDocument;
use xmlstoke_traits::{
    MutableXmlTree, NamespaceMap, NodeType, QualifiedNamespace, XPathEngine, XmlEngine, XmlTree,
    Error,
};

fn parse(xml: &str) -> XeeDocument {
    XeeDocument::parse_xml(xml).unwrap()
}

fn namespaces(pairs: &[(&str, &str)]) -> NamespaceMap {
    pairs
        .iter()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect()
}

#[test]
fn test_parse_xml() {
    let doc = parse("<root><item>test</item></root>");

    // Get document element
    let root = doc.document_element().unwrap();

    // Check node name
    assert_eq!(doc.node_name(&root), Some("root".to_string()));
    assert_eq!(doc.node_type(&root), NodeType::Element);

    // Get children
    let children = doc.children(&root);
    assert_eq!(children.len(), 1);

    // Check child name
    assert_eq!(doc.node_name(&children[0]), Some("item".to_string()));
    assert_eq!(doc.node_value(&children[0]), Some("test".to_string()));
}

#[test]
fn test_parse_error() {
    let result = XeeDocument::parse_xml("<root><unclosed></root>");
    assert!(matches!(result, Err(Error::XmlParse(_))));
}

#[test]
fn test_serialize() {
    let doc = parse("<root><item>test</item></root>");

    let serialized = doc.serialize_document().unwrap();
    assert_eq!(serialized, "<root><item>test</item></root>");
}

#[test]
fn test_serialize_with_declaration() {
    let doc = parse("<root/>");

    let serialized = doc.serialize_document_with_declaration().unwrap();
    assert!(serialized.starts_with("<?xml version=\"1.0\""));
    assert!(serialized.contains("<root/>"));
}

#[test]
fn test_select_elements_in_document_order() {
    let mut doc = parse("<Numbers><Number>1</Number><Number>2</Number></Numbers>");

    let nodes = doc.select_from_root("/Numbers/Number").unwrap();
    let values: Vec<_> = nodes.iter().filter_map(|n| doc.node_value(n)).collect();
    assert_eq!(values, vec!["1", "2"]);
}

#[test]
fn test_select_attribute() {
    let mut doc = parse(r#"<x y="a"/>"#);

    let nodes = doc.select_from_root("/x/@y").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(doc.node_type(&nodes[0]), NodeType::Attribute);
    assert_eq!(doc.node_local_name(&nodes[0]), Some("y".to_string()));
    assert_eq!(doc.node_value(&nodes[0]), Some("a".to_string()));

    let owner = doc.parent(&nodes[0]).unwrap();
    assert_eq!(doc.node_name(&owner), Some("x".to_string()));
}

#[test]
fn test_select_relative_to_context() {
    let mut doc = parse("<a><b><c/></b><c/></a>");

    let b = doc.select_from_root("/a/b").unwrap()[0];
    assert_eq!(doc.select("c", &b).unwrap().len(), 1);
    assert_eq!(doc.select_from_root("//c").unwrap().len(), 2);
}

#[test]
fn test_select_no_match_is_empty() {
    let mut doc = parse("<a/>");
    assert!(doc.select_from_root("/a/missing").unwrap().is_empty());
}

#[test]
fn test_select_non_nodes_fails() {
    let mut doc = parse("<a/>");
    let result = doc.select_from_root("count(/a)");
    assert!(matches!(result, Err(Error::XPathEval(_))));
}

#[test]
fn test_select_with_bound_namespace() {
    let mut doc = parse(r#"<root xmlns:dc="urn:dc"><dc:title>T</dc:title></root>"#);
    doc.bind_namespaces(&namespaces(&[("d", "urn:dc")]));

    let nodes = doc.select_from_root("/root/d:title").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(doc.node_namespace_uri(&nodes[0]), Some("urn:dc".to_string()));
}

#[test]
fn test_select_with_unbound_prefix() {
    let mut doc = parse("<root/>");
    let result = doc.select_from_root("/root/nope:title");
    match result {
        Err(Error::UnboundPrefix(prefix)) => assert_eq!(prefix, "nope"),
        other => panic!("expected UnboundPrefix, got {:?}", other),
    }
}

#[test]
fn test_set_text_content_keeps_attributes() {
    let mut doc = parse(r#"<a k="v">old<b/>tail</a>"#);
    let a = doc.document_element().unwrap();

    doc.set_text_content(&a, "new").unwrap();
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @r#"<a k="v">new</a>"#);

    doc.set_text_content(&a, "").unwrap();
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @r#"<a k="v"/>"#);
}

#[test]
fn test_remove_nodes() {
    let mut doc = parse(r#"<a k="v"><b/><c/></a>"#);

    let b = doc.select_from_root("/a/b").unwrap()[0];
    let k = doc.select_from_root("/a/@k").unwrap()[0];
    doc.remove_node(&b).unwrap();
    doc.remove_node(&k).unwrap();

    assert!(!doc.contains(&b));
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @"<a><c/></a>");
}

#[test]
fn test_create_and_append_element() {
    let mut doc = parse("<a/>");
    let a = doc.document_element().unwrap();

    let b = doc.create_element("b", None).unwrap();
    doc.append_child(&a, &b).unwrap();
    doc.set_text_content(&b, "text").unwrap();

    // New nodes are visible to later queries
    assert_eq!(doc.select_from_root("/a/b").unwrap(), vec![b]);
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @"<a><b>text</b></a>");
}

#[test]
fn test_create_namespaced_element() {
    let mut doc = parse("<a/>");
    let a = doc.document_element().unwrap();
    let ns = QualifiedNamespace {
        prefix: "em",
        uri: "urn:em",
    };

    let b = doc.create_element("b", Some(ns)).unwrap();
    doc.append_child(&a, &b).unwrap();
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @r#"<a><em:b xmlns:em="urn:em"/></a>"#);
}

#[test]
fn test_create_namespaced_element_in_scope() {
    let mut doc = parse(r#"<a xmlns:em="urn:em"/>"#);
    let a = doc.document_element().unwrap();
    let ns = QualifiedNamespace {
        prefix: "em",
        uri: "urn:em",
    };

    let b = doc.create_element("b", Some(ns)).unwrap();
    doc.append_child(&a, &b).unwrap();
    insta::assert_snapshot!(doc.serialize_document().unwrap(), @r#"<a xmlns:em="urn:em"><em:b/></a>"#);
}

#[test]
fn test_append_unqualified_element_under_default_namespace() {
    let mut doc = parse(r#"<a xmlns="urn:x"/>"#);
    let a = doc.document_element().unwrap();

    let b = doc.create_element("b", None).unwrap();
    doc.append_child(&a, &b).unwrap();
    let xml = doc.serialize_document().unwrap();
    insta::assert_snapshot!(xml, @r#"<a xmlns="urn:x"><b xmlns=""/></a>"#);

    // Still in no namespace once parsed back
    let mut reparsed = parse(&xml);
    assert_eq!(reparsed.select_from_root("/*/b").unwrap().len(), 1);
}

#[test]
fn test_set_attribute_with_prefix_bound_elsewhere() {
    let mut doc = parse(r#"<r xmlns:em="urn:other"><a><em:c/></a></r>"#);
    let a = doc.select_from_root("/r/a").unwrap()[0];
    let ns = QualifiedNamespace {
        prefix: "em",
        uri: "urn:em",
    };

    doc.set_attribute(&a, "x", "v", Some(ns)).unwrap();
    // The document's own em binding is left alone
    insta::assert_snapshot!(
        doc.serialize_document().unwrap(),
        @r#"<r xmlns:em="urn:other"><a xmlns:em1="urn:em" em1:x="v"><em:c/></a></r>"#
    );

    doc.set_attribute(&a, "x", "w", Some(ns)).unwrap();
    insta::assert_snapshot!(
        doc.serialize_document().unwrap(),
        @r#"<r xmlns:em="urn:other"><a xmlns:em1="urn:em" em1:x="w"><em:c/></a></r>"#
    );
}

#[test]
fn test_set_attribute() {
    let mut doc = parse(r#"<Description/>"#);
    let description = doc.document_element().unwrap();
    let ns = QualifiedNamespace {
        prefix: "em",
        uri: "urn:em",
    };

    doc.set_attribute(&description, "hello", "world", Some(ns))
        .unwrap();
    doc.set_attribute(&description, "plain", "1", None).unwrap();
    doc.set_attribute(&description, "plain", "2", None).unwrap();

    assert_eq!(
        doc.attributes(&description),
        vec![
            ("em:hello".to_string(), "world".to_string()),
            ("plain".to_string(), "2".to_string()),
        ]
    );
    insta::assert_snapshot!(
        doc.serialize_document().unwrap(),
        @r#"<Description xmlns:em="urn:em" em:hello="world" plain="2"/>"#
    );
}

#[test]
fn test_set_attribute_on_text_fails() {
    let mut doc = parse("<a>text</a>");
    let a = doc.document_element().unwrap();
    let text = doc.children(&a)[0];

    let result = doc.set_attribute(&text, "k", "v", None);
    assert!(matches!(result, Err(Error::NodeAccess(_))));
}

#[test]
fn test_engine_identity() {
    let doc = parse("<a/>");
    assert_eq!(doc.engine_name(), "xee");
    assert_eq!(doc.xpath_version(), "3.1");
}
