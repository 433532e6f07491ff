use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::project::{FileKind, Module, ProjectContext, SdkKind};

/// In-memory `ProjectContext` for exercising the producer without a filesystem.
#[derive(Debug, Default)]
pub(crate) struct FakeProject {
    base_path: Option<PathBuf>,
    manifest_dirs: HashSet<PathBuf>,
    directories: HashSet<PathBuf>,
    test_roots: Vec<PathBuf>,
    modules: Vec<(PathBuf, Module)>,
    project_sdk: Option<SdkKind>,
    line_indexes: HashMap<(PathBuf, usize), usize>,
    missing: HashSet<PathBuf>,
}

impl FakeProject {
    pub(crate) fn new(base_path: Option<&str>) -> Self {
        Self {
            base_path: base_path.map(PathBuf::from),
            ..Self::default()
        }
    }

    pub(crate) fn with_manifest(mut self, dir: &str) -> Self {
        self.manifest_dirs.insert(PathBuf::from(dir));
        self.with_directory(dir)
    }

    pub(crate) fn with_directory(mut self, dir: &str) -> Self {
        self.directories.insert(PathBuf::from(dir));
        self
    }

    pub(crate) fn with_test_root(mut self, dir: &str) -> Self {
        self.test_roots.push(PathBuf::from(dir));
        self.with_directory(dir)
    }

    pub(crate) fn with_module(mut self, root: &str, name: &str, sdk: Option<SdkKind>) -> Self {
        self.modules.push((
            PathBuf::from(root),
            Module {
                name: name.to_owned(),
                sdk,
            },
        ));
        self
    }

    pub(crate) fn with_project_sdk(mut self, sdk: SdkKind) -> Self {
        self.project_sdk = Some(sdk);
        self
    }

    pub(crate) fn with_line_index(mut self, file: &str, offset: usize, index: usize) -> Self {
        self.line_indexes
            .insert((PathBuf::from(file), offset), index);
        self
    }

    pub(crate) fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(PathBuf::from(path));
        self
    }
}

impl ProjectContext for FakeProject {
    fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    fn contains_file(&self, dir: &Path, name: &str) -> bool {
        name == self.manifest_file_name() && self.manifest_dirs.contains(dir)
    }

    fn owning_module(&self, path: &Path) -> Option<Module> {
        self.modules
            .iter()
            .filter(|(root, _)| path.starts_with(root))
            .max_by_key(|(root, _)| root.components().count())
            .map(|(_, module)| module.clone())
    }

    fn project_sdk(&self) -> Option<SdkKind> {
        self.project_sdk
    }

    fn is_test_source(&self, path: &Path) -> bool {
        self.test_roots.iter().any(|root| path.starts_with(root))
    }

    fn file_kind(&self, path: &Path) -> FileKind {
        if self.directories.contains(path) {
            return FileKind::Directory;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ex" | "exs") => FileKind::LanguageSource,
            _ => FileKind::Other,
        }
    }

    fn line_index(&self, file: &Path, offset: usize) -> Option<usize> {
        self.line_indexes
            .get(&(file.to_path_buf(), offset))
            .copied()
    }

    fn exists(&self, path: &Path) -> bool {
        !self.missing.contains(path)
    }
}

/// Umbrella layout: `/proj` with a nested Mix project at `/proj/apps/foo`.
pub(crate) fn umbrella() -> FakeProject {
    FakeProject::new(Some("/proj"))
        .with_manifest("/proj")
        .with_manifest("/proj/apps/foo")
        .with_directory("/proj/apps")
        .with_test_root("/proj/test")
        .with_test_root("/proj/apps/foo/test")
        .with_directory("/proj/apps/foo/lib")
}
