//! Source/destination pairing for file based runs

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The sources configured for one destination file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub sources: Vec<PathBuf>,
    pub dest: PathBuf,
}

impl FileGroup {
    pub fn new(sources: Vec<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            dest: dest.into(),
        }
    }

    /// The one source transformed into `dest`.
    ///
    /// Fails unless exactly one source is given.
    pub fn single_source(&self) -> Result<&Path> {
        match self.sources.as_slice() {
            [source] => Ok(source.as_path()),
            sources => Err(Error::InvalidFileGroup(sources.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_source() {
        let group = FileGroup::new(vec!["in.xml".into()], "out.xml");
        assert_eq!(group.single_source().unwrap(), Path::new("in.xml"));
    }

    #[test]
    fn test_source_count_must_be_one() {
        let many = FileGroup::new(vec!["a.xml".into(), "b.xml".into()], "out.xml");
        let error = many.single_source().unwrap_err();
        assert!(matches!(error, Error::InvalidFileGroup(2)));
        assert_eq!(
            error.to_string(),
            "Only a single src file per dest is supported. 2 given."
        );

        let none = FileGroup::new(Vec::new(), "out.xml");
        assert!(matches!(none.single_source(), Err(Error::InvalidFileGroup(0))));
    }
}
