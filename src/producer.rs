use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compose::{configuration_name, program_parameters};
use crate::line::line_number;
use crate::point::{LineNumber, PointOfInterest};
use crate::project::{FileKind, ProjectContext, SdkKind};
use crate::resolver::{path_string, working_directory_for};

pub const EXPECTED_SDK: SdkKind = SdkKind::Elixir;

/// Everything needed to launch one `mix test` target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfigurationDraft {
    pub name: String,
    pub working_directory: Option<String>,
    pub program_parameters: String,
}

/// A stored configuration slot that a draft can be applied onto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub name: String,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub program_parameters: String,
}

impl RunConfiguration {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, draft: RunConfigurationDraft) {
        self.name = draft.name;
        self.working_directory = draft.working_directory;
        self.program_parameters = draft.program_parameters;
    }
}

/// Draft for `point`, or `None` when the point does not denote a runnable test
/// target.
pub fn classify<C: ProjectContext + ?Sized>(
    ctx: &C,
    point: &PointOfInterest,
) -> Option<RunConfigurationDraft> {
    match point {
        PointOfInterest::Directory(path) => {
            let sdk = match ctx.owning_module(path) {
                Some(module) => module.sdk,
                None => ctx.project_sdk(),
            };
            if sdk.is_some_and(|kind| kind != EXPECTED_SDK) {
                debug!(
                    path = %path.display(),
                    sdk = sdk.map(SdkKind::label),
                    "declined: directory sdk is not elixir"
                );
                return None;
            }
            if !ctx.is_test_source(path) {
                debug!(path = %path.display(), "declined: directory is not a test source");
                return None;
            }
            Some(draft_for(ctx, point, path, None))
        }
        PointOfInterest::File { path, offset } => {
            if !matches!(
                ctx.file_kind(path),
                FileKind::LanguageSource | FileKind::Directory
            ) {
                debug!(path = %path.display(), "declined: not an elixir source file");
                return None;
            }
            if !ctx.is_test_source(path) {
                debug!(path = %path.display(), "declined: file is not a test source");
                return None;
            }
            let line = line_number(ctx, path, *offset);
            Some(draft_for(ctx, point, path, line))
        }
    }
}

fn draft_for<C: ProjectContext + ?Sized>(
    ctx: &C,
    point: &PointOfInterest,
    item: &Path,
    line: Option<LineNumber>,
) -> RunConfigurationDraft {
    let base_path = ctx.base_path().map(path_string);
    let working_directory = working_directory_for(ctx, point, ctx.base_path());
    RunConfigurationDraft {
        name: configuration_name(
            item,
            line,
            working_directory.as_deref(),
            base_path.as_deref(),
        ),
        program_parameters: program_parameters(item, line, working_directory.as_deref()),
        working_directory,
    }
}

/// Fills `configuration` from `point`. Returns `false`, leaving the configuration
/// untouched, when the point is not runnable.
pub fn setup_configuration_from_context<C: ProjectContext + ?Sized>(
    ctx: &C,
    configuration: &mut RunConfiguration,
    point: &PointOfInterest,
) -> bool {
    match classify(ctx, point) {
        Some(draft) => {
            configuration.apply(draft);
            true
        }
        None => false,
    }
}

/// Whether `existing` is the configuration `point` would produce. Names are not
/// compared.
pub fn is_configuration_from_context<C: ProjectContext + ?Sized>(
    ctx: &C,
    existing: &RunConfiguration,
    point: &PointOfInterest,
) -> bool {
    let mut candidate = RunConfiguration::named(existing.name.clone());
    setup_configuration_from_context(ctx, &mut candidate, point)
        && launches_same_target(&candidate, existing)
}

/// Whether two configurations run the same `mix test` invocation. Names are not
/// compared.
pub fn launches_same_target(candidate: &RunConfiguration, existing: &RunConfiguration) -> bool {
    candidate.program_parameters == existing.program_parameters
        && candidate.working_directory == existing.working_directory
}

/// Result of checking an existing configuration against a point, built from a
/// single classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub equivalent: bool,
    /// What the point produces, or `None` when it is not runnable.
    pub expected: Option<RunConfiguration>,
}

/// Front-end entry points. Both reject points whose path no longer exists before
/// running the classifier.
pub struct RunConfigurationProducer<'a, C: ProjectContext + ?Sized> {
    ctx: &'a C,
}

impl<'a, C: ProjectContext + ?Sized> RunConfigurationProducer<'a, C> {
    pub fn new(ctx: &'a C) -> Self {
        Self { ctx }
    }

    pub fn setup_configuration_from_context(
        &self,
        configuration: &mut RunConfiguration,
        point: &PointOfInterest,
    ) -> bool {
        self.is_valid(point) && setup_configuration_from_context(self.ctx, configuration, point)
    }

    pub fn is_configuration_from_context(
        &self,
        configuration: &RunConfiguration,
        point: &PointOfInterest,
    ) -> bool {
        self.is_valid(point) && is_configuration_from_context(self.ctx, configuration, point)
    }

    /// Classifies `point` once and reports both the verdict and the configuration
    /// it was judged against.
    pub fn compare(&self, existing: &RunConfiguration, point: &PointOfInterest) -> Comparison {
        let mut expected = RunConfiguration::named(existing.name.clone());
        if !self.setup_configuration_from_context(&mut expected, point) {
            return Comparison {
                equivalent: false,
                expected: None,
            };
        }
        Comparison {
            equivalent: launches_same_target(&expected, existing),
            expected: Some(expected),
        }
    }

    fn is_valid(&self, point: &PointOfInterest) -> bool {
        self.ctx.exists(point.path())
    }
}

#[cfg(test)]
#[path = "tests/producer_tests.rs"]
mod tests;
