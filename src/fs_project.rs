use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::{ConfigError, ModuleConfig, ProjectConfig};
use crate::line::line_index_in;
use crate::project::{FileKind, Module, ProjectContext, SdkKind};

/// `ProjectContext` answered from the filesystem and a `ProjectConfig`.
#[derive(Debug, Clone)]
pub struct FsProject {
    base_path: Option<PathBuf>,
    manifest: String,
    sdk: Option<SdkKind>,
    test_sources: GlobSet,
    source_extensions: Vec<String>,
    modules: Vec<ModuleConfig>,
}

impl FsProject {
    pub fn new(base_path: Option<PathBuf>, config: ProjectConfig) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.test_sources {
            // `*` stays inside one path component; only `**` crosses separators.
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|error| ConfigError::InvalidGlob {
                    pattern: pattern.clone(),
                    error,
                })?;
            builder.add(glob);
        }
        let test_sources = builder
            .build()
            .map_err(|error| ConfigError::InvalidGlob {
                pattern: config.test_sources.join(", "),
                error,
            })?;
        Ok(Self {
            base_path,
            manifest: config.manifest,
            sdk: config.sdk,
            test_sources,
            source_extensions: config.source_extensions,
            modules: config.modules,
        })
    }

    fn project_relative<'a>(&self, path: &'a Path) -> &'a Path {
        self.base_path
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path)
    }

    fn module_root(&self, module: &ModuleConfig) -> PathBuf {
        match &self.base_path {
            Some(base) if module.root.is_relative() => base.join(&module.root),
            _ => module.root.clone(),
        }
    }
}

impl ProjectContext for FsProject {
    fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    fn manifest_file_name(&self) -> &str {
        &self.manifest
    }

    fn contains_file(&self, dir: &Path, name: &str) -> bool {
        dir.join(name).is_file()
    }

    fn owning_module(&self, path: &Path) -> Option<Module> {
        self.modules
            .iter()
            .map(|module| (module, self.module_root(module)))
            .filter(|(_, root)| path.starts_with(root))
            .max_by_key(|(_, root)| root.components().count())
            .map(|(module, _)| Module {
                name: module.name.clone(),
                sdk: module.sdk,
            })
    }

    fn project_sdk(&self) -> Option<SdkKind> {
        self.sdk
    }

    fn is_test_source(&self, path: &Path) -> bool {
        self.test_sources.is_match(self.project_relative(path))
    }

    fn file_kind(&self, path: &Path) -> FileKind {
        if path.is_dir() {
            return FileKind::Directory;
        }
        let is_source = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|known| known == ext));
        if is_source {
            FileKind::LanguageSource
        } else {
            FileKind::Other
        }
    }

    fn line_index(&self, file: &Path, offset: usize) -> Option<usize> {
        let text = fs::read(file).ok()?;
        line_index_in(&text, offset)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
#[path = "tests/fs_project_tests.rs"]
mod tests;
