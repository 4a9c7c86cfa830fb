//! Resolution of `[@][prefix:]name` node name specifiers

use xmlstoke_traits::{NamespaceMap, QualifiedNamespace};

use crate::error::{Error, Result};

/// A node name specifier split into its parts.
///
/// The prefix, when present, is known to be bound: its URI is kept
/// alongside so later mutations need no second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub is_attribute: bool,
    pub prefix: Option<String>,
    pub uri: Option<String>,
    pub local_name: String,
}

impl ResolvedName {
    /// The name as written in a query, `prefix:local` or just `local`
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// The local name to create a node with.
    ///
    /// A trailing predicate such as the `[2]` of `item[2]` only matters
    /// for finding an existing node and is stripped here.
    pub fn creation_local_name(&self) -> &str {
        let name = self.local_name.as_str();
        if name.ends_with(']') {
            if let Some(open) = name.find('[') {
                return &name[..open];
            }
        }
        name
    }

    /// The namespace the created node is qualified with
    pub fn namespace(&self) -> Option<QualifiedNamespace<'_>> {
        match (&self.prefix, &self.uri) {
            (Some(prefix), Some(uri)) => Some(QualifiedNamespace { prefix, uri }),
            _ => None,
        }
    }
}

/// Split a name specifier and check its prefix against `namespaces`.
///
/// A leading `@` marks an attribute. The prefix is everything before the
/// last `:`. A prefix bound to an empty URI counts as unbound.
pub fn resolve(spec: &str, namespaces: &NamespaceMap) -> Result<ResolvedName> {
    let (is_attribute, name) = match spec.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };

    let (prefix, local_name) = match name.rsplit_once(':') {
        Some((prefix, local_name)) => (Some(prefix), local_name),
        None => (None, name),
    };

    let uri = match prefix {
        Some(prefix) => match namespaces.get(prefix) {
            Some(uri) if !uri.is_empty() => Some(uri.clone()),
            _ => return Err(Error::UnboundNamespacePrefix(prefix.to_string())),
        },
        None => None,
    };

    Ok(ResolvedName {
        is_attribute,
        prefix: prefix.map(str::to_string),
        uri,
        local_name: local_name.to_string(),
    })
}
