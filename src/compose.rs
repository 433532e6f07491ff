use std::path::{Path, MAIN_SEPARATOR};

use crate::point::LineNumber;

pub const CONFIGURATION_NAME_PREFIX: &str = "Mix ExUnit";

/// `path` relative to `working_directory`, labelled with the sub-project name when
/// the working directory is a nested project below `base_path`.
pub fn relativize(path: &str, working_directory: &str, base_path: Option<&str>) -> String {
    let relative = strip_working_directory(path, working_directory);
    match base_path {
        Some(base)
            if working_directory != base && working_directory.starts_with(base) =>
        {
            let subproject = display_name(working_directory);
            format!("{subproject} {relative}")
        }
        _ => relative.to_owned(),
    }
}

pub fn configuration_name(
    item: &Path,
    line: Option<LineNumber>,
    working_directory: Option<&str>,
    base_path: Option<&str>,
) -> String {
    let path = item.to_string_lossy();
    let path: &str = &path;
    let suffix = match working_directory {
        Some(working_directory) => relativize(path, working_directory, base_path),
        None => display_name(path).to_owned(),
    };
    with_line(format!("{CONFIGURATION_NAME_PREFIX} {suffix}"), line)
}

/// The `path[:line]` selector handed to `mix test`.
pub fn program_parameters(
    item: &Path,
    line: Option<LineNumber>,
    working_directory: Option<&str>,
) -> String {
    let path = item.to_string_lossy();
    let path: &str = &path;
    let relative = match working_directory {
        Some(working_directory) => strip_working_directory(path, working_directory),
        None => path,
    };
    with_line(relative.to_owned(), line)
}

fn strip_working_directory<'a>(path: &'a str, working_directory: &str) -> &'a str {
    let prefix = format!("{working_directory}{MAIN_SEPARATOR}");
    path.strip_prefix(prefix.as_str()).unwrap_or(path)
}

fn display_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

fn with_line(base: String, line: Option<LineNumber>) -> String {
    match line {
        Some(line) => format!("{base}:{line}"),
        None => base,
    }
}

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod tests;
