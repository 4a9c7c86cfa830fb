//! Errors raised by engine implementations

pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong inside an engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("XPath compilation error: {0}")]
    XPathCompile(String),

    #[error("XPath evaluation error: {0}")]
    XPathEval(String),

    /// A query used a namespace prefix that has no binding
    #[error("No URI bound for namespace prefix \"{0}\"")]
    UnboundPrefix(String),

    /// A node was missing or of the wrong kind for the operation
    #[error("Node access error: {0}")]
    NodeAccess(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl Error {
    pub fn xpath_compile<S: Into<String>>(msg: S) -> Self {
        Error::XPathCompile(msg.into())
    }

    pub fn xpath_eval<S: Into<String>>(msg: S) -> Self {
        Error::XPathEval(msg.into())
    }

    pub fn node_access<S: Into<String>>(msg: S) -> Self {
        Error::NodeAccess(msg.into())
    }
}
