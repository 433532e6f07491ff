use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointOfInterest {
    Directory(PathBuf),
    File { path: PathBuf, offset: usize },
}

impl PointOfInterest {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        PointOfInterest::Directory(path.into())
    }

    pub fn file(path: impl Into<PathBuf>, offset: usize) -> Self {
        PointOfInterest::File {
            path: path.into(),
            offset,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PointOfInterest::Directory(path) => path,
            PointOfInterest::File { path, .. } => path,
        }
    }
}

/// A 1-based line. An unknown line is `Option::<LineNumber>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineNumber(NonZeroUsize);

impl LineNumber {
    pub fn new(line: usize) -> Option<Self> {
        NonZeroUsize::new(line).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Display for LineNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
