//! Shared helpers for the action tests

#![allow(dead_code)]

use std::collections::BTreeMap;

use xee_adapter::XeeDocument;
use xmlstoke::{process, ActionError, ReadValue, StokeOptions};
use xmlstoke_traits::XmlTree;

pub const NAMESPACES_XML: &str = concat!(
    r#"<RDF xmlns:em="http://www.mozilla.org/2004/em-rdf#">"#,
    r#"<Description><em:id>addon@example.org</em:id><em:version>1.0.0</em:version></Description>"#,
    r#"</RDF>"#
);

pub const EM: &str = "http://www.mozilla.org/2004/em-rdf#";

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Outcome of running options against a document
pub struct Stoked {
    pub xml: String,
    pub reads: BTreeMap<String, ReadValue>,
    pub result: Result<(), ActionError>,
}

pub fn run(xml: &str, options: &StokeOptions) -> Stoked {
    init();
    let mut doc = XeeDocument::parse_xml(xml).unwrap();
    let mut reads: BTreeMap<String, ReadValue> = BTreeMap::new();
    let result = process(&mut doc, options, &mut reads);
    Stoked {
        xml: doc.serialize_document().unwrap(),
        reads,
        result,
    }
}

/// Run options that must succeed and return the resulting document
pub fn stoke(xml: &str, options: &StokeOptions) -> String {
    let stoked = run(xml, options);
    if let Err(error) = stoked.result {
        panic!("options failed: {}", error);
    }
    stoked.xml
}
