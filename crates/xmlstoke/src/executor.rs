//! Runs normalized actions against one document

use log::{debug, info};
use xmlstoke_traits::{NamespaceMap, XmlEngine};

use crate::action::{Action, Operation};
use crate::error::{ActionError, Error, ReadFailure, Result};
use crate::mutator::DocumentMutator;
use crate::namespace;
use crate::selector::select;
use crate::sink::ReadSink;
use crate::value::{MatchedNode, ReadCallback, ReadValue, ValueSource};

/// Applies actions, in order, to a single document.
///
/// The first failing action stops the run; edits made by the actions
/// before it stay in place.
pub struct ActionExecutor<'a, E: XmlEngine + ?Sized, S: ReadSink + ?Sized> {
    engine: &'a mut E,
    namespaces: &'a NamespaceMap,
    sink: &'a mut S,
}

impl<'a, E: XmlEngine + ?Sized, S: ReadSink + ?Sized> ActionExecutor<'a, E, S> {
    /// Bind `namespaces` for every query this executor runs
    pub fn new(engine: &'a mut E, namespaces: &'a NamespaceMap, sink: &'a mut S) -> Self {
        engine.bind_namespaces(namespaces);
        Self {
            engine,
            namespaces,
            sink,
        }
    }

    pub fn execute(&mut self, actions: &[Action]) -> std::result::Result<(), ActionError> {
        for (index, action) in actions.iter().enumerate() {
            self.apply(action).map_err(|error| ActionError {
                index,
                operation: action.kind(),
                error,
            })?;
        }
        Ok(())
    }

    pub fn apply(&mut self, action: &Action) -> Result<()> {
        match &action.operation {
            Operation::Read {
                save_as,
                callback,
                return_array,
            } => self.read(action, save_as.as_deref(), callback.as_ref(), *return_array),
            Operation::Update { value } => self.update(action, value),
            Operation::Delete => self.delete(action),
            Operation::Insert { node, value } => self.insert(action, node.as_deref(), value),
        }
    }

    fn update(&mut self, action: &Action, value: &ValueSource) -> Result<()> {
        for query in &action.queries {
            let selection = select(&mut *self.engine, query)?;
            debug!("Updating {} node(s) for query: {}", selection.len(), selection.query());
            for node in selection {
                if !self.engine.contains(&node) {
                    continue;
                }
                let text = value.evaluate(&MatchedNode::capture(&*self.engine, &node));
                self.engine.write_value(&node, &text)?;
            }
        }
        Ok(())
    }

    fn delete(&mut self, action: &Action) -> Result<()> {
        for query in &action.queries {
            let selection = select(&mut *self.engine, query)?;
            debug!("Deleting {} node(s) for query: {}", selection.len(), selection.query());
            for node in selection {
                self.engine.detach(&node)?;
            }
        }
        Ok(())
    }

    fn insert(&mut self, action: &Action, node_name: Option<&str>, value: &ValueSource) -> Result<()> {
        let node_name = node_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::MissingNodeName {
                query: action.first_query().to_string(),
            })?;
        let name = namespace::resolve(node_name, self.namespaces)?;

        for query in &action.queries {
            let selection = select(&mut *self.engine, query)?;
            debug!(
                "Inserting {} into {} node(s) for query: {}",
                node_name,
                selection.len(),
                query
            );
            for context in selection {
                if !self.engine.contains(&context) {
                    continue;
                }
                let text = value.evaluate(&MatchedNode::capture(&*self.engine, &context));
                if name.is_attribute {
                    self.engine.upsert_attribute(&context, &name, &text)?;
                } else {
                    self.engine.upsert_element(&context, &name, &text)?;
                }
            }
        }
        Ok(())
    }

    fn read(
        &mut self,
        action: &Action,
        save_as: Option<&str>,
        callback: Option<&ReadCallback>,
        return_array: bool,
    ) -> Result<()> {
        let query = action.first_query();
        let save_as = save_as
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::MissingSaveSlot {
                query: query.to_string(),
            })?;

        let selection = select(&mut *self.engine, query)?;
        debug!("Reading {} node(s) for query: {}", selection.len(), selection.query());
        let mut values: Vec<String> = selection
            .iter()
            .map(|node| self.engine.extract_value(&node))
            .collect();

        let extracted = match values.len() {
            0 => None,
            1 if !return_array => values.pop().map(ReadValue::Scalar),
            _ => Some(ReadValue::List(values)),
        };

        let failure = |cause| Error::ReadExtractionFailed {
            query: query.to_string(),
            save_as: save_as.to_string(),
            cause,
        };
        let result = match callback {
            Some(callback) => callback.call(extracted).ok_or_else(|| failure(ReadFailure::Rejected))?,
            None => extracted.ok_or_else(|| failure(ReadFailure::NoMatch))?,
        };

        info!("Saving {} from query: {}", save_as, query);
        self.sink.publish(save_as, result);
        Ok(())
    }
}
