use std::path::Path;

use serde::Deserialize;

pub const MIX_MANIFEST_FILE: &str = "mix.exs";
pub const ELIXIR_SOURCE_EXTENSIONS: [&str; 2] = ["ex", "exs"];

/// Toolchain tag attached to a module or to the whole project. Unrecognised
/// names read as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SdkKind {
    Elixir,
    Erlang,
    Other,
}

impl From<String> for SdkKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "elixir" => SdkKind::Elixir,
            "erlang" => SdkKind::Erlang,
            _ => SdkKind::Other,
        }
    }
}

impl SdkKind {
    pub fn label(self) -> &'static str {
        match self {
            SdkKind::Elixir => "elixir",
            SdkKind::Erlang => "erlang",
            SdkKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub sdk: Option<SdkKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    LanguageSource,
    Directory,
    Other,
}

/// Read-only facts about a project, supplied by whatever hosts the producer.
///
/// Every query is answered against the current state of the project; nothing
/// here is cached by the callers.
pub trait ProjectContext {
    fn base_path(&self) -> Option<&Path>;

    fn manifest_file_name(&self) -> &str {
        MIX_MANIFEST_FILE
    }

    /// Whether `dir` directly contains a file called `name`.
    fn contains_file(&self, dir: &Path, name: &str) -> bool;

    /// Module whose content root holds `path`, if any.
    fn owning_module(&self, path: &Path) -> Option<Module>;

    fn project_sdk(&self) -> Option<SdkKind>;

    fn is_test_source(&self, path: &Path) -> bool;

    fn file_kind(&self, path: &Path) -> FileKind;

    /// Zero-based index of the line holding `offset` in `file`.
    fn line_index(&self, file: &Path, offset: usize) -> Option<usize>;

    fn exists(&self, path: &Path) -> bool;
}
