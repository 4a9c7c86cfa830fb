//! Values written by updates and insertions, and values produced by reads

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use xmlstoke_traits::{NodeType, XmlTree};

/// A configured value, as it appears in JSON options.
///
/// Absent, `false` and empty text all write nothing; a numeric zero is
/// still written as `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    #[default]
    Absent,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Literal {
    /// The text this value writes into a node
    pub fn to_text(&self) -> String {
        match self {
            Literal::Absent | Literal::Bool(false) => String::new(),
            Literal::Bool(true) => "true".to_string(),
            Literal::Number(number) => format_number(number),
            Literal::Text(text) => text.clone(),
        }
    }
}

fn format_number(number: &serde_json::Number) -> String {
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }
    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Literal::Text(text.to_string())
    }
}

impl From<String> for Literal {
    fn from(text: String) -> Self {
        Literal::Text(text)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Literal::Number)
            .unwrap_or(Literal::Absent)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Read-only snapshot of a matched node, handed to computed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedNode {
    pub node_type: NodeType,
    pub name: Option<String>,
    pub local_name: Option<String>,
    pub namespace_uri: Option<String>,
    pub value: String,
}

impl MatchedNode {
    /// Take a snapshot of `node`
    pub fn capture<T: XmlTree + ?Sized>(tree: &T, node: &T::Node) -> Self {
        Self {
            node_type: tree.node_type(node),
            name: tree.node_name(node),
            local_name: tree.node_local_name(node),
            namespace_uri: tree.node_namespace_uri(node),
            value: tree.node_value(node).unwrap_or_default(),
        }
    }

    /// Attribute value or text content
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_attribute(&self) -> bool {
        self.node_type == NodeType::Attribute
    }
}

/// A user function computing the value for each matched node
#[derive(Clone)]
pub struct ValueFn(Rc<dyn Fn(&MatchedNode) -> Literal>);

impl ValueFn {
    pub fn new(f: impl Fn(&MatchedNode) -> Literal + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, node: &MatchedNode) -> Literal {
        (self.0)(node)
    }
}

impl fmt::Debug for ValueFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFn(..)")
    }
}

/// Where the value written into a node comes from
#[derive(Debug, Clone)]
pub enum ValueSource {
    Literal(Literal),
    Computed(ValueFn),
}

impl ValueSource {
    /// Effective text for `node`
    pub fn evaluate(&self, node: &MatchedNode) -> String {
        match self {
            ValueSource::Literal(literal) => literal.to_text(),
            ValueSource::Computed(f) => f.call(node).to_text(),
        }
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        ValueSource::Literal(Literal::Absent)
    }
}

impl From<Literal> for ValueSource {
    fn from(literal: Literal) -> Self {
        ValueSource::Literal(literal)
    }
}

impl From<&str> for ValueSource {
    fn from(text: &str) -> Self {
        ValueSource::Literal(text.into())
    }
}

impl From<ValueFn> for ValueSource {
    fn from(f: ValueFn) -> Self {
        ValueSource::Computed(f)
    }
}

/// The value a read publishes: one string, or one per matched node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadValue {
    Scalar(String),
    List(Vec<String>),
}

impl ReadValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ReadValue::Scalar(value) => Some(value),
            ReadValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ReadValue::Scalar(_) => None,
            ReadValue::List(values) => Some(values),
        }
    }
}

impl From<&str> for ReadValue {
    fn from(value: &str) -> Self {
        ReadValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for ReadValue {
    fn from(values: Vec<String>) -> Self {
        ReadValue::List(values)
    }
}

/// Post-processing for read values; returning `None` rejects the read
#[derive(Clone)]
pub struct ReadCallback(Rc<dyn Fn(Option<ReadValue>) -> Option<ReadValue>>);

impl ReadCallback {
    pub fn new(f: impl Fn(Option<ReadValue>) -> Option<ReadValue> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, value: Option<ReadValue>) -> Option<ReadValue> {
        (self.0)(value)
    }
}

impl fmt::Debug for ReadCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReadCallback(..)")
    }
}
