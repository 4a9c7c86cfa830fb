//! Destinations for read results

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::value::ReadValue;

/// Receives every value a read action publishes, keyed by its `saveAs`.
///
/// Publishing an existing key replaces the earlier value.
pub trait ReadSink {
    fn publish(&mut self, key: &str, value: ReadValue);
}

impl<S: BuildHasher> ReadSink for HashMap<String, ReadValue, S> {
    fn publish(&mut self, key: &str, value: ReadValue) {
        self.insert(key.to_string(), value);
    }
}

impl ReadSink for BTreeMap<String, ReadValue> {
    fn publish(&mut self, key: &str, value: ReadValue) {
        self.insert(key.to_string(), value);
    }
}

/// Keeps every publication in order, duplicates included
impl ReadSink for Vec<(String, ReadValue)> {
    fn publish(&mut self, key: &str, value: ReadValue) {
        self.push((key.to_string(), value));
    }
}

impl<T: ReadSink + ?Sized> ReadSink for &mut T {
    fn publish(&mut self, key: &str, value: ReadValue) {
        (**self).publish(key, value);
    }
}
