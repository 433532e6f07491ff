use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, ProjectConfig};
use crate::fs_project::FsProject;
use crate::point::PointOfInterest;
use crate::producer::{RunConfiguration, RunConfigurationProducer};
use crate::resolver::canonicalize_best_effort;
use crate::scan::scan_targets;
use crate::ui::theme::resolve_color_enabled;
use crate::ui::{
    configuration_fields, NoticeLevel, OutputMode, PlainRenderer, Renderer, TargetTable, UiError,
};
use crate::{Command, MatchesArgs, ProjectArgs, ResolveArgs, TargetsArgs};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to resolve current directory: {0}")]
    Cwd(#[source] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("path does not exist: {}", .path.display())]
    MissingPath { path: PathBuf },
    #[error("failed to scan {}: {error}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        error: walkdir::Error,
    },
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Ui(#[from] UiError),
}

pub fn run_command(cmd: Command) -> Result<String, RunnerError> {
    match cmd {
        Command::Resolve(args) => run_resolve(args),
        Command::Matches(args) => run_matches(args),
        Command::Targets(args) => run_targets(args),
        Command::Help => Ok(String::new()),
    }
}

fn run_resolve(args: ResolveArgs) -> Result<String, RunnerError> {
    let project = load_project(&args.project)?;
    let point = point_of_interest(&args.path, args.offset)?;
    let producer = RunConfigurationProducer::new(&project);
    let mut configuration = RunConfiguration::default();
    let produced = producer.setup_configuration_from_context(&mut configuration, &point);

    if args.project.output_json {
        let payload = produced.then_some(&configuration);
        return Ok(serde_json::to_string_pretty(&payload)?);
    }

    let mut renderer = text_renderer();
    if produced {
        render_configuration(&mut renderer, &configuration)?;
    } else {
        renderer.notice(
            NoticeLevel::Warning,
            &format!(
                "{} is not a runnable ExUnit target",
                point.path().display()
            ),
        )?;
    }
    finish(renderer)
}

fn run_matches(args: MatchesArgs) -> Result<String, RunnerError> {
    let project = load_project(&args.project)?;
    let point = point_of_interest(&args.path, args.offset)?;
    let comparison = RunConfigurationProducer::new(&project).compare(&args.existing, &point);
    debug!(
        equivalent = comparison.equivalent,
        runnable = comparison.expected.is_some(),
        "compared configuration with point of interest"
    );

    if args.project.output_json {
        let payload = json!({
            "equivalent": comparison.equivalent,
            "path": point.path().display().to_string(),
            "expected": comparison.expected,
        });
        return Ok(serde_json::to_string_pretty(&payload)?);
    }

    let mut renderer = text_renderer();
    if comparison.equivalent {
        renderer.notice(
            NoticeLevel::Success,
            &format!("configuration matches {}", point.path().display()),
        )?;
    } else {
        renderer.notice(
            NoticeLevel::Warning,
            &format!("configuration does not match {}", point.path().display()),
        )?;
        if let Some(expected) = &comparison.expected {
            renderer.text("")?;
            render_configuration(&mut renderer, expected)?;
        }
    }
    finish(renderer)
}

fn run_targets(args: TargetsArgs) -> Result<String, RunnerError> {
    let root = project_root(&args.project)?;
    let project = project_at(&root, &args.project)?;
    let targets = scan_targets(&project, &root).map_err(|error| RunnerError::Scan {
        path: root.clone(),
        error,
    })?;

    if args.project.output_json {
        let payload = targets
            .iter()
            .map(|target| {
                json!({
                    "path": target.path.display().to_string(),
                    "name": target.draft.name,
                    "working_directory": target.draft.working_directory,
                    "program_parameters": target.draft.program_parameters,
                })
            })
            .collect::<Vec<_>>();
        return Ok(serde_json::to_string_pretty(&payload)?);
    }

    let table = TargetTable::from_scan(&root, &targets);
    let mut renderer = text_renderer();
    renderer.section("Test Targets")?;
    if table.is_empty() {
        renderer.notice(
            NoticeLevel::Info,
            &format!("no runnable test targets under {}", root.display()),
        )?;
        return finish(renderer);
    }
    renderer.targets(&table)?;
    renderer.notice(NoticeLevel::Info, &format!("{} targets", table.rows.len()))?;
    finish(renderer)
}

fn project_root(args: &ProjectArgs) -> Result<PathBuf, RunnerError> {
    let root = match &args.project {
        Some(path) => path.clone(),
        None => std::env::current_dir().map_err(RunnerError::Cwd)?,
    };
    Ok(canonicalize_best_effort(root))
}

fn project_at(root: &Path, args: &ProjectArgs) -> Result<FsProject, RunnerError> {
    let config = ProjectConfig::discover(root, args.config.as_deref())?;
    Ok(FsProject::new(Some(root.to_path_buf()), config)?)
}

fn load_project(args: &ProjectArgs) -> Result<FsProject, RunnerError> {
    let root = project_root(args)?;
    project_at(&root, args)
}

/// Directories become directory targets unless an offset is given; everything
/// else is a file target at `offset` (default 0).
fn point_of_interest(path: &Path, offset: Option<usize>) -> Result<PointOfInterest, RunnerError> {
    let path = canonicalize_best_effort(path.to_path_buf());
    if !path.exists() {
        return Err(RunnerError::MissingPath { path });
    }
    Ok(match offset {
        None if path.is_dir() => PointOfInterest::Directory(path),
        offset => PointOfInterest::file(path, offset.unwrap_or(0)),
    })
}

fn render_configuration<R: Renderer>(
    renderer: &mut R,
    configuration: &RunConfiguration,
) -> Result<(), RunnerError> {
    renderer.section("Run Configuration")?;
    renderer.configuration(&configuration_fields(configuration))?;
    Ok(())
}

fn text_renderer() -> PlainRenderer<Vec<u8>> {
    let color_enabled =
        resolve_color_enabled(OutputMode::from_env(), std::io::stdout().is_terminal());
    PlainRenderer::new(Vec::<u8>::new(), color_enabled)
}

fn finish(renderer: PlainRenderer<Vec<u8>>) -> Result<String, RunnerError> {
    let rendered = String::from_utf8_lossy(&renderer.into_inner()).into_owned();
    Ok(rendered.trim_end().to_owned())
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
