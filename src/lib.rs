pub mod compose;
pub mod config;
pub mod fs_project;
pub mod line;
pub mod point;
pub mod producer;
pub mod project;
pub mod resolver;
pub mod runner;
pub mod scan;
pub mod ui;

#[cfg(test)]
#[path = "tests/test_support.rs"]
pub(crate) mod test_support;

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub use point::{LineNumber, PointOfInterest};
pub use producer::{
    classify, is_configuration_from_context, launches_same_target,
    setup_configuration_from_context, Comparison, RunConfiguration, RunConfigurationDraft,
    RunConfigurationProducer,
};
pub use project::{FileKind, Module, ProjectContext, SdkKind};

pub const LOG_ENV: &str = "MIXRUN_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resolve(ResolveArgs),
    Matches(MatchesArgs),
    Targets(TargetsArgs),
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectArgs {
    pub project: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    pub path: PathBuf,
    pub offset: Option<usize>,
    pub project: ProjectArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchesArgs {
    pub path: PathBuf,
    pub offset: Option<usize>,
    pub existing: RunConfiguration,
    pub project: ProjectArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetsArgs {
    pub project: ProjectArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliParseError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("--offset expects a non-negative integer, got `{0}`")]
    InvalidOffset(String),
    #[error("`{0}` requires a <PATH> argument")]
    MissingPath(&'static str),
    #[error("`matches` requires --params <PARAMS>")]
    MissingParams,
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

pub fn parse_command<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(cmd) = args.next() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "--help" | "-h" | "help" => Ok(Command::Help),
        "resolve" => parse_resolve(args),
        "matches" => parse_matches(args),
        "targets" => parse_targets(args),
        other => Err(CliParseError::UnknownArgument(other.to_owned())),
    }
}

/// Shared flags. Returns `Ok(false)` when `arg` is not one of them.
fn parse_project_flag<I>(
    arg: &str,
    args: &mut I,
    project: &mut ProjectArgs,
) -> Result<bool, CliParseError>
where
    I: Iterator<Item = String>,
{
    match arg {
        "--project" => {
            let Some(path) = args.next() else {
                return Err(CliParseError::MissingValue("--project"));
            };
            project.project = Some(PathBuf::from(path));
        }
        "--config" => {
            let Some(path) = args.next() else {
                return Err(CliParseError::MissingValue("--config"));
            };
            project.config = Some(PathBuf::from(path));
        }
        "--json" => project.output_json = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_offset<I>(args: &mut I) -> Result<usize, CliParseError>
where
    I: Iterator<Item = String>,
{
    let Some(raw) = args.next() else {
        return Err(CliParseError::MissingValue("--offset"));
    };
    raw.parse::<usize>()
        .map_err(|_| CliParseError::InvalidOffset(raw))
}

fn parse_resolve<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut project = ProjectArgs::default();
    let mut path: Option<PathBuf> = None;
    let mut offset: Option<usize> = None;

    while let Some(arg) = args.next() {
        if parse_project_flag(&arg, &mut args, &mut project)? {
            continue;
        }
        match arg.as_str() {
            "--offset" => offset = Some(parse_offset(&mut args)?),
            "--help" | "-h" => return Ok(Command::Help),
            other if other.starts_with('-') || path.is_some() => {
                return Err(CliParseError::UnknownArgument(other.to_owned()))
            }
            other => path = Some(PathBuf::from(other)),
        }
    }

    let Some(path) = path else {
        return Err(CliParseError::MissingPath("resolve"));
    };
    Ok(Command::Resolve(ResolveArgs {
        path,
        offset,
        project,
    }))
}

fn parse_matches<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut project = ProjectArgs::default();
    let mut path: Option<PathBuf> = None;
    let mut offset: Option<usize> = None;
    let mut name: Option<String> = None;
    let mut working_directory: Option<String> = None;
    let mut params: Option<String> = None;

    while let Some(arg) = args.next() {
        if parse_project_flag(&arg, &mut args, &mut project)? {
            continue;
        }
        match arg.as_str() {
            "--offset" => offset = Some(parse_offset(&mut args)?),
            "--name" => {
                let Some(value) = args.next() else {
                    return Err(CliParseError::MissingValue("--name"));
                };
                name = Some(value);
            }
            "--working-dir" => {
                let Some(value) = args.next() else {
                    return Err(CliParseError::MissingValue("--working-dir"));
                };
                working_directory = Some(value);
            }
            "--params" => {
                let Some(value) = args.next() else {
                    return Err(CliParseError::MissingValue("--params"));
                };
                params = Some(value);
            }
            "--help" | "-h" => return Ok(Command::Help),
            other if other.starts_with('-') || path.is_some() => {
                return Err(CliParseError::UnknownArgument(other.to_owned()))
            }
            other => path = Some(PathBuf::from(other)),
        }
    }

    let Some(path) = path else {
        return Err(CliParseError::MissingPath("matches"));
    };
    let Some(program_parameters) = params else {
        return Err(CliParseError::MissingParams);
    };
    Ok(Command::Matches(MatchesArgs {
        path,
        offset,
        existing: RunConfiguration {
            name: name.unwrap_or_default(),
            working_directory,
            program_parameters,
        },
        project,
    }))
}

fn parse_targets<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut project = ProjectArgs::default();

    while let Some(arg) = args.next() {
        if parse_project_flag(&arg, &mut args, &mut project)? {
            continue;
        }
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliParseError::UnknownArgument(other.to_owned())),
        }
    }

    Ok(Command::Targets(TargetsArgs { project }))
}

/// Installs the stderr `tracing` subscriber, filtered by `MIXRUN_LOG`
/// (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_usage() {
    eprintln!(
        "mixrun\n\nUSAGE:\n  mixrun resolve <PATH> [--offset <N>] [--project <DIR>] [--config <FILE>] [--json]\n  mixrun matches <PATH> --params <PARAMS> [--working-dir <DIR>] [--name <NAME>] [--offset <N>] [--project <DIR>] [--config <FILE>] [--json]\n  mixrun targets [--project <DIR>] [--config <FILE>] [--json]\n\nCOMMANDS:\n  resolve           Derive the Mix ExUnit run configuration for a directory, file or file offset\n  matches           Check whether an existing configuration is the one <PATH> would produce\n  targets           List every runnable test directory and file in the project\n\nOPTIONS:\n  --offset <N>      Byte offset inside the file, used to pick the test line\n  --project <DIR>   Project base path (defaults to the current directory)\n  --config <FILE>   Project config file (defaults to <project>/mixrun.toml when present)\n  --json            Emit JSON instead of text\n\nGENERAL:\n  -h, --help        Print help\n\nENVIRONMENT:\n  MIXRUN_LOG        tracing filter, e.g. `debug`\n  MIXRUN_COLOR      `always` or `never`\n"
    );
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
