//! Option shapes accepted from callers and their normalization

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use xmlstoke_traits::NamespaceMap;

use crate::action::{Action, Operation, OperationKind};
use crate::value::{Literal, MatchedNode, ReadCallback, ReadValue, ValueFn, ValueSource};

/// A single item or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(query: &str) -> Self {
        OneOrMany::One(query.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(query: String) -> Self {
        OneOrMany::One(query)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(queries: Vec<&str>) -> Self {
        OneOrMany::Many(queries.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(queries: Vec<String>) -> Self {
        OneOrMany::Many(queries)
    }
}

impl From<ActionSpec> for OneOrMany<ActionSpec> {
    fn from(spec: ActionSpec) -> Self {
        OneOrMany::One(spec)
    }
}

impl<T> From<Vec<T>> for OneOrMany<ActionSpec>
where
    T: Into<ActionSpec>,
{
    fn from(specs: Vec<T>) -> Self {
        OneOrMany::Many(specs.into_iter().map(Into::into).collect())
    }
}

/// One action as configured, before its operation is settled.
///
/// Computed values and read callbacks cannot come from JSON; attach
/// them with [`ActionSpec::with_value_fn`] and
/// [`ActionSpec::with_callback`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub value: Literal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_as: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub return_array: bool,
    #[serde(skip)]
    pub value_fn: Option<ValueFn>,
    #[serde(skip)]
    pub callback: Option<ReadCallback>,
}

fn is_absent(value: &Literal) -> bool {
    *value == Literal::Absent
}

impl ActionSpec {
    fn with_kind(kind: &str, xpath: impl Into<OneOrMany<String>>) -> Self {
        Self {
            kind: Some(kind.to_string()),
            xpath: Some(xpath.into()),
            ..Default::default()
        }
    }

    pub fn update(xpath: impl Into<OneOrMany<String>>, value: impl Into<Literal>) -> Self {
        Self {
            value: value.into(),
            ..Self::with_kind("update", xpath)
        }
    }

    pub fn delete(xpath: impl Into<OneOrMany<String>>) -> Self {
        Self::with_kind("delete", xpath)
    }

    pub fn insert(
        xpath: impl Into<OneOrMany<String>>,
        node: &str,
        value: impl Into<Literal>,
    ) -> Self {
        Self {
            node: Some(node.to_string()),
            value: value.into(),
            ..Self::with_kind("insert", xpath)
        }
    }

    pub fn read(xpath: impl Into<OneOrMany<String>>, save_as: &str) -> Self {
        Self {
            save_as: Some(save_as.to_string()),
            ..Self::with_kind("read", xpath)
        }
    }

    /// Compute the value per matched node instead of using `value`
    pub fn with_value_fn(mut self, f: impl Fn(&MatchedNode) -> Literal + 'static) -> Self {
        self.value_fn = Some(ValueFn::new(f));
        self
    }

    pub fn with_callback(
        mut self,
        f: impl Fn(Option<ReadValue>) -> Option<ReadValue> + 'static,
    ) -> Self {
        self.callback = Some(ReadCallback::new(f));
        self
    }

    pub fn with_return_array(mut self, return_array: bool) -> Self {
        self.return_array = return_array;
        self
    }

    fn queries(&self) -> &[String] {
        self.xpath.as_ref().map(OneOrMany::as_slice).unwrap_or_default()
    }

    fn value_source(&self) -> ValueSource {
        match &self.value_fn {
            Some(f) => ValueSource::Computed(f.clone()),
            None => ValueSource::Literal(self.value.clone()),
        }
    }

    /// Build the canonical action, or `None` when there is nothing to query
    fn to_action(&self, kind: OperationKind) -> Option<Action> {
        let queries = self.queries();
        if queries.is_empty() {
            debug!("Dropping {} action without xpath", kind);
            return None;
        }

        let (operation, queries) = match kind {
            OperationKind::Read => {
                for discarded in &queries[1..] {
                    warn!(
                        "Discarding secondary xpath \"{}\" in read action {}",
                        discarded,
                        self.save_as.as_deref().unwrap_or_default()
                    );
                }
                let operation = Operation::Read {
                    save_as: self.save_as.clone(),
                    callback: self.callback.clone(),
                    return_array: self.return_array,
                };
                (operation, queries[..1].to_vec())
            }
            OperationKind::Update => (
                Operation::Update {
                    value: self.value_source(),
                },
                queries.to_vec(),
            ),
            OperationKind::Delete => (Operation::Delete, queries.to_vec()),
            OperationKind::Insert => (
                Operation::Insert {
                    node: self.node.clone(),
                    value: self.value_source(),
                },
                queries.to_vec(),
            ),
        };
        Some(Action { operation, queries })
    }
}

/// Options for one transformation run.
///
/// Mirrors the JSON option object: any mix of the action buckets may be
/// present. [`StokeOptions::normalize`] turns them into one ordered list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StokeOptions {
    #[serde(default)]
    pub namespaces: NamespaceMap,
    /// Bare update query, used when neither `replacements` nor `updates` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub value: Literal,
    #[serde(skip)]
    pub value_fn: Option<ValueFn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacements: Option<OneOrMany<ActionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<OneOrMany<ActionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertions: Option<OneOrMany<ActionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<OneOrMany<ActionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reads: Option<OneOrMany<ActionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<OneOrMany<ActionSpec>>,
}

impl StokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, prefix: &str, uri: &str) -> Self {
        self.namespaces.insert(prefix.to_string(), uri.to_string());
        self
    }

    /// Bare `{xpath, value}` update
    pub fn with_update(mut self, xpath: impl Into<OneOrMany<String>>, value: impl Into<Literal>) -> Self {
        self.xpath = Some(xpath.into());
        self.value = value.into();
        self
    }

    pub fn with_value_fn(mut self, f: impl Fn(&MatchedNode) -> Literal + 'static) -> Self {
        self.value_fn = Some(ValueFn::new(f));
        self
    }

    pub fn with_replacements(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.replacements = Some(specs.into());
        self
    }

    pub fn with_updates(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.updates = Some(specs.into());
        self
    }

    pub fn with_insertions(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.insertions = Some(specs.into());
        self
    }

    pub fn with_deletions(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.deletions = Some(specs.into());
        self
    }

    pub fn with_reads(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.reads = Some(specs.into());
        self
    }

    pub fn with_actions(mut self, specs: impl Into<OneOrMany<ActionSpec>>) -> Self {
        self.actions = Some(specs.into());
        self
    }

    /// Entries of the update bucket.
    ///
    /// `replacements` wins over `updates`, which wins over the bare
    /// top-level `xpath`.
    fn update_bucket(&self) -> Vec<ActionSpec> {
        if let Some(specs) = self.replacements.as_ref().or(self.updates.as_ref()) {
            return specs.as_slice().to_vec();
        }
        match &self.xpath {
            Some(xpath) => vec![ActionSpec {
                xpath: Some(xpath.clone()),
                value: self.value.clone(),
                value_fn: self.value_fn.clone(),
                ..Default::default()
            }],
            None => Vec::new(),
        }
    }

    /// The canonical action list, in execution order.
    ///
    /// Reads come first, then deletions, insertions, updates and finally
    /// the explicitly typed `actions`, each bucket in its own order.
    pub fn normalize(&self) -> Vec<Action> {
        fn bucket(specs: &Option<OneOrMany<ActionSpec>>) -> &[ActionSpec] {
            specs.as_ref().map(OneOrMany::as_slice).unwrap_or_default()
        }

        let typed = bucket(&self.actions)
            .iter()
            .map(|spec| (spec, OperationKind::from_type_name(spec.kind.as_deref())));
        let updates = self.update_bucket();

        bucket(&self.reads)
            .iter()
            .map(|spec| (spec, OperationKind::Read))
            .chain(bucket(&self.deletions).iter().map(|spec| (spec, OperationKind::Delete)))
            .chain(bucket(&self.insertions).iter().map(|spec| (spec, OperationKind::Insert)))
            .chain(updates.iter().map(|spec| (spec, OperationKind::Update)))
            .chain(typed)
            .filter_map(|(spec, kind)| spec.to_action(kind))
            .collect()
    }
}
