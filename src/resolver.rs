use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::point::PointOfInterest;
use crate::project::{FileKind, ProjectContext};

/// Nearest directory at or above `start` holding the project manifest.
///
/// Falls back to `base_path` once the parent chain is exhausted, so the result is
/// absent only when no manifest exists and the project has no base path.
pub fn resolve_working_directory<C: ProjectContext + ?Sized>(
    ctx: &C,
    start: &Path,
    base_path: Option<&Path>,
) -> Option<String> {
    let manifest = ctx.manifest_file_name();
    let mut current = Some(start);
    while let Some(dir) = current {
        if ctx.contains_file(dir, manifest) {
            debug!(dir = %dir.display(), manifest, "found manifest");
            return Some(path_string(dir));
        }
        current = dir.parent();
    }
    debug!(start = %start.display(), "no manifest above start; using base path");
    base_path.map(path_string)
}

/// Working directory for a point of interest. Files climb from their containing
/// directory; directories, including a directory named by a file point, climb
/// from themselves.
pub fn working_directory_for<C: ProjectContext + ?Sized>(
    ctx: &C,
    point: &PointOfInterest,
    base_path: Option<&Path>,
) -> Option<String> {
    let start = match point {
        PointOfInterest::Directory(path) => path.as_path(),
        PointOfInterest::File { path, .. } => {
            if ctx.file_kind(path) == FileKind::Directory {
                path.as_path()
            } else {
                match path.parent() {
                    Some(parent) => parent,
                    None => return base_path.map(path_string),
                }
            }
        }
    };
    resolve_working_directory(ctx, start, base_path)
}

pub fn canonicalize_best_effort(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
