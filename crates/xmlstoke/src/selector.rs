//! XPath selection into materialized snapshots

use log::trace;
use xmlstoke_traits::XPathEngine;

use crate::error::Result;

/// The nodes one query matched, fixed at selection time.
///
/// Later mutations never change the snapshot; nodes removed in the
/// meantime are still listed and must be checked with
/// [`XmlTree::contains`](xmlstoke_traits::XmlTree::contains) before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<N> {
    query: String,
    nodes: Vec<N>,
}

impl<N: Copy> Selection<N> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.iter().copied()
    }
}

impl<N> IntoIterator for Selection<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Select with the document node as context
pub fn select<E: XPathEngine + ?Sized>(engine: &mut E, query: &str) -> Result<Selection<E::Node>> {
    let root = engine.root();
    select_within(engine, query, &root)
}

/// Select relative to `context`
pub fn select_within<E: XPathEngine + ?Sized>(
    engine: &mut E,
    query: &str,
    context: &E::Node,
) -> Result<Selection<E::Node>> {
    let nodes = engine.select(query, context)?;
    trace!("Selected {} node(s) for query: {}", nodes.len(), query);
    Ok(Selection {
        query: query.to_string(),
        nodes,
    })
}
