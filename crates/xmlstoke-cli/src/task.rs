//! Task configuration file: shared options plus named targets

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use xmlstoke::{FileGroup, OneOrMany, StokeOptions};

/// The whole configuration file
#[derive(Debug, Default, Deserialize)]
pub struct TaskConfig {
    /// Options shared by every target
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// One named target with its own files and option overrides
#[derive(Debug, Default, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub files: Option<FilesSpec>,
    #[serde(default)]
    pub src: Option<OneOrMany<String>>,
    #[serde(default)]
    pub dest: Option<String>,
}

/// The two accepted shapes of a `files` entry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FilesSpec {
    List(Vec<FileEntry>),
    /// Destination to source(s)
    Map(BTreeMap<String, OneOrMany<String>>),
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub src: OneOrMany<String>,
    pub dest: String,
}

impl TaskConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid task configuration")
    }

    /// The targets to run, in name order.
    ///
    /// An empty `names` list selects every target.
    pub fn select<'a>(&'a self, names: &[String]) -> Result<Vec<(&'a str, &'a TargetConfig)>> {
        if names.is_empty() {
            return Ok(self
                .targets
                .iter()
                .map(|(name, target)| (name.as_str(), target))
                .collect());
        }
        names
            .iter()
            .map(|name| match self.targets.get_key_value(name) {
                Some((name, target)) => Ok((name.as_str(), target)),
                None => bail!("Unknown target \"{}\"", name),
            })
            .collect()
    }
}

impl TargetConfig {
    /// Target options merged over the shared ones, key by key
    pub fn options(&self, shared: &Map<String, Value>) -> Result<StokeOptions> {
        let merged = merge_options(shared, &self.options);
        serde_json::from_value(Value::Object(merged)).context("invalid options")
    }

    /// File groups with paths resolved against `base`
    pub fn file_groups(&self, base: &Path) -> Result<Vec<FileGroup>> {
        let group = |sources: &OneOrMany<String>, dest: &str| {
            FileGroup::new(
                sources.as_slice().iter().map(|src| base.join(src)).collect(),
                base.join(dest),
            )
        };

        let mut groups = Vec::new();
        match &self.files {
            Some(FilesSpec::List(entries)) => {
                groups.extend(entries.iter().map(|entry| group(&entry.src, &entry.dest)));
            }
            Some(FilesSpec::Map(map)) => {
                groups.extend(map.iter().map(|(dest, src)| group(src, dest)));
            }
            None => {}
        }
        match (&self.src, &self.dest) {
            (Some(src), Some(dest)) => groups.push(group(src, dest)),
            (None, None) => {}
            _ => bail!("Both src and dest are required outside of files"),
        }
        Ok(groups)
    }
}

/// Shallow merge: keys of `overrides` replace those of `base`
pub fn merge_options(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
