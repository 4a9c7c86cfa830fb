//! XPathEngine implementation for xee

use log::trace;
use xee_xpath::{
    context::StaticContextBuilder,
    error::{Error as XeeError, ErrorValue},
    Queries, Query,
};
use xmlstoke_traits::{
    error::{Error, Result},
    xpath::{NamespaceMap, XPathEngine},
};
use xot::Node;

use crate::XeeDocument;

impl XPathEngine for XeeDocument {
    fn bind_namespaces(&mut self, namespaces: &NamespaceMap) {
        self.namespaces = namespaces.clone();
    }

    fn select(&mut self, xpath: &str, context: &Node) -> Result<Vec<Node>> {
        let mut static_context = StaticContextBuilder::default();
        static_context.namespaces(
            self.namespaces
                .iter()
                .map(|(prefix, uri)| (prefix.as_str(), uri.as_str())),
        );
        let queries = Queries::new(static_context);
        let query = queries
            .sequence(xpath)
            .map_err(|e| compile_error(xpath, &self.namespaces, e))?;

        let context = *context;
        let sequence = query
            .execute_build_context(&mut self.documents, |builder| {
                builder.context_node(context);
                // Document order is annotated lazily per store; a fresh one
                // keeps nodes created by earlier mutations orderable.
                builder.documents(xee_interpreter::xml::Documents::new());
            })
            .map_err(|e| Error::xpath_eval(e.to_string()))?;

        let nodes = sequence
            .nodes()
            .collect::<std::result::Result<Vec<Node>, _>>()
            .map_err(|e| {
                Error::xpath_eval(format!("{} selects non-node items ({})", xpath, e))
            })?;
        trace!("{} matched {} node(s)", xpath, nodes.len());
        Ok(nodes)
    }

    fn xpath_version(&self) -> &'static str {
        "3.1"
    }
}

fn compile_error(xpath: &str, namespaces: &NamespaceMap, error: XeeError) -> Error {
    if error.error == ErrorValue::XPST0081 {
        let from_span = error
            .span
            .and_then(|span| xpath.get(span.range()))
            .and_then(prefix_of);
        if let Some(prefix) = from_span.or_else(|| unbound_prefix(xpath, namespaces)) {
            return Error::UnboundPrefix(prefix);
        }
    }
    Error::xpath_compile(format!("{}: {}", xpath, error))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Prefix part of a lexical QName such as `@em:hello`
fn prefix_of(qname: &str) -> Option<String> {
    let (prefix, _) = qname.trim().trim_start_matches('@').split_once(':')?;
    (!prefix.is_empty() && prefix.chars().all(is_name_char)).then(|| prefix.to_string())
}

/// First prefix written in `xpath` that has no binding.
///
/// Axis separators (`::`) and string literals are skipped.
fn unbound_prefix(xpath: &str, namespaces: &NamespaceMap) -> Option<String> {
    let chars: Vec<(usize, char)> = xpath.char_indices().collect();
    let mut quote = None;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ':' => {
                let before = i.checked_sub(1).map(|j| chars[j].1);
                let after = chars.get(i + 1).map(|&(_, c)| c);
                if before == Some(':') || after == Some(':') {
                    continue;
                }
                let start = xpath[..offset]
                    .char_indices()
                    .rev()
                    .take_while(|&(_, c)| is_name_char(c))
                    .last()
                    .map(|(start, _)| start)
                    .unwrap_or(offset);
                let prefix = &xpath[start..offset];
                if !prefix.is_empty() && !namespaces.contains_key(prefix) {
                    return Some(prefix.to_string());
                }
            }
            None => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_of() {
        assert_eq!(prefix_of("em:hello"), Some("em".to_string()));
        assert_eq!(prefix_of("@em:hello"), Some("em".to_string()));
        assert_eq!(prefix_of("hello"), None);
        assert_eq!(prefix_of("a/b:c"), None);
    }

    #[test]
    fn test_unbound_prefix_skips_axes_and_literals() {
        let mut namespaces = NamespaceMap::new();
        namespaces.insert("em".to_string(), "urn:em".to_string());

        assert_eq!(unbound_prefix("//em:Description", &namespaces), None);
        assert_eq!(unbound_prefix("child::em:a[@x='y:z']", &namespaces), None);
        assert_eq!(
            unbound_prefix("//em:a/foo:b", &namespaces),
            Some("foo".to_string())
        );
    }
}
