use std::path::Path;

use crate::producer::RunConfiguration;
use crate::resolver::path_string;
use crate::scan::ScannedTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    pub title: String,
    pub body: String,
    pub hint: Option<String>,
}

impl MessageBlock {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Which part of a run configuration a field shows. Picks the value style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Name,
    WorkingDirectory,
    Parameters,
    Command,
}

/// One labelled line of a rendered run configuration. `value` is `None` for an
/// unset working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub label: &'static str,
    pub value: Option<String>,
    pub role: FieldRole,
}

impl DraftField {
    pub fn new(label: &'static str, value: Option<String>, role: FieldRole) -> Self {
        Self { label, value, role }
    }
}

/// The lines `resolve` and `matches` print for a configuration, in display order.
pub fn configuration_fields(configuration: &RunConfiguration) -> Vec<DraftField> {
    vec![
        DraftField::new("name", Some(configuration.name.clone()), FieldRole::Name),
        DraftField::new(
            "working directory",
            configuration.working_directory.clone(),
            FieldRole::WorkingDirectory,
        ),
        DraftField::new(
            "parameters",
            Some(configuration.program_parameters.clone()),
            FieldRole::Parameters,
        ),
        DraftField::new(
            "command",
            Some(format!("mix test {}", configuration.program_parameters)),
            FieldRole::Command,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub configuration: String,
    /// Working directory relative to the scanned root; `.` for the root itself.
    pub mix_project: Option<String>,
    pub mix_test_args: String,
}

/// Rows of the `targets` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    pub rows: Vec<TargetRow>,
}

impl TargetTable {
    pub fn from_scan(root: &Path, targets: &[ScannedTarget]) -> Self {
        let rows = targets
            .iter()
            .map(|target| TargetRow {
                configuration: target.draft.name.clone(),
                mix_project: target
                    .draft
                    .working_directory
                    .as_deref()
                    .map(|dir| mix_project_label(root, dir)),
                mix_test_args: target.draft.program_parameters.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn mix_project_label(root: &Path, working_directory: &str) -> String {
    match Path::new(working_directory).strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_owned(),
        Ok(relative) => path_string(relative),
        Err(_) => working_directory.to_owned(),
    }
}
