//! Failing actions and what they leave behind

mod common;

use common::{run, EM, NAMESPACES_XML};
use xmlstoke::{ActionSpec, Error, OperationKind, StokeOptions};

#[test]
fn test_unbound_insert_prefix_fails_only_its_action() {
    let options = StokeOptions::new()
        .with_deletions(ActionSpec::delete("/a/old"))
        .with_insertions(vec![
            ActionSpec::insert("/a", "kept", "yes"),
            ActionSpec::insert("/a", "@foo:bar", "x"),
        ])
        .with_update("/a/kept", "never");
    let stoked = run("<a><old/></a>", &options);

    let error = stoked.result.unwrap_err();
    assert_eq!(error.index, 2);
    assert_eq!(error.operation, OperationKind::Insert);
    assert!(matches!(error.error, Error::UnboundNamespacePrefix(ref p) if p == "foo"));
    // Earlier actions stay applied, later ones never run
    insta::assert_snapshot!(stoked.xml, @"<a><kept>yes</kept></a>");
}

#[test]
fn test_unbound_insert_prefix_fails_before_any_edit() {
    let options = StokeOptions::new().with_insertions(ActionSpec::insert(
        vec!["/a", "/a/b"],
        "foo:c",
        "x",
    ));
    let stoked = run("<a><b/></a>", &options);

    assert!(matches!(
        stoked.result.unwrap_err().error,
        Error::UnboundNamespacePrefix(_)
    ));
    insta::assert_snapshot!(stoked.xml, @"<a><b/></a>");
}

#[test]
fn test_unbound_query_prefix() {
    let options = StokeOptions::new()
        .with_namespace("em", EM)
        .with_update("//nope:version", "1");
    let stoked = run(NAMESPACES_XML, &options);

    let error = stoked.result.unwrap_err();
    assert_eq!(error.operation, OperationKind::Update);
    assert!(matches!(error.error, Error::UnboundNamespacePrefix(ref p) if p == "nope"));
    assert_eq!(stoked.xml, NAMESPACES_XML);
}

#[test]
fn test_missing_node_name() {
    let options = StokeOptions::new().with_insertions(ActionSpec {
        xpath: Some("/a".into()),
        ..Default::default()
    });
    let stoked = run("<a/>", &options);

    let error = stoked.result.unwrap_err();
    assert!(matches!(error.error, Error::MissingNodeName { ref query } if query == "/a"));
}

#[test]
fn test_missing_save_slot_fails_before_selection() {
    // The query would not even compile
    let options = StokeOptions::new().with_reads(vec![
        ActionSpec {
            xpath: Some("/a[".into()),
            ..Default::default()
        },
    ]);
    let stoked = run("<a/>", &options);

    let error = stoked.result.unwrap_err();
    assert_eq!(error.operation, OperationKind::Read);
    assert!(matches!(error.error, Error::MissingSaveSlot { .. }));
}

#[test]
fn test_empty_save_slot() {
    let options = StokeOptions::new().with_reads(ActionSpec::read("/a", ""));
    let stoked = run("<a/>", &options);
    assert!(matches!(
        stoked.result.unwrap_err().error,
        Error::MissingSaveSlot { .. }
    ));
}

#[test]
fn test_invalid_query_is_engine_error() {
    let options = StokeOptions::new().with_deletions(ActionSpec::delete("/a["));
    let stoked = run("<a/>", &options);
    assert!(matches!(stoked.result.unwrap_err().error, Error::Engine(_)));
}

#[test]
fn test_non_node_query_is_engine_error() {
    let options = StokeOptions::new().with_update("count(/a)", "1");
    let stoked = run("<a/>", &options);
    assert!(matches!(stoked.result.unwrap_err().error, Error::Engine(_)));
}
