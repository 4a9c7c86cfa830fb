//! Declarative edits of XML documents.
//!
//! Callers describe what to do as [`StokeOptions`]: reads, updates,
//! deletions and insertions, each driven by XPath queries. The options
//! are normalized into an ordered list of [`Action`]s that an
//! [`ActionExecutor`] applies to one document held by any
//! [`XmlEngine`](xmlstoke_traits::XmlEngine).
//!
//! ```ignore
//! use xee_adapter::XeeDocument;
//! use xmlstoke::{process, StokeOptions};
//! use xmlstoke_traits::XmlTree;
//!
//! let mut doc = XeeDocument::parse_xml(r#"<x y="a"/>"#)?;
//! let options = StokeOptions::new().with_update("/x/@y", "111");
//! let mut reads = std::collections::BTreeMap::new();
//! process(&mut doc, &options, &mut reads)?;
//! assert_eq!(doc.serialize_document()?, r#"<x y="111"/>"#);
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod executor;
pub mod group;
pub mod mutator;
pub mod namespace;
pub mod selector;
pub mod sink;
pub mod value;

pub use action::{Action, Operation, OperationKind};
pub use config::{ActionSpec, OneOrMany, StokeOptions};
pub use error::{ActionError, Error, ReadFailure, Result};
pub use executor::ActionExecutor;
pub use group::FileGroup;
pub use mutator::DocumentMutator;
pub use namespace::{resolve, ResolvedName};
pub use selector::{select, select_within, Selection};
pub use sink::ReadSink;
pub use value::{Literal, MatchedNode, ReadCallback, ReadValue, ValueFn, ValueSource};

use log::debug;
use xmlstoke_traits::XmlEngine;

/// Normalize `options` and run the resulting actions against `engine`.
///
/// Read results go to `sink`. Stops at the first failing action.
pub fn process<E, S>(
    engine: &mut E,
    options: &StokeOptions,
    sink: &mut S,
) -> std::result::Result<(), ActionError>
where
    E: XmlEngine + ?Sized,
    S: ReadSink + ?Sized,
{
    let actions = options.normalize();
    debug!(
        "Running {} action(s) with the {} engine",
        actions.len(),
        engine.engine_name()
    );
    ActionExecutor::new(engine, &options.namespaces, sink).execute(&actions)
}
