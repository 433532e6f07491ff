use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::point::PointOfInterest;
use crate::producer::{classify, RunConfigurationDraft};
use crate::project::{FileKind, ProjectContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTarget {
    pub path: PathBuf,
    pub draft: RunConfigurationDraft,
}

/// Every runnable directory and source file under `root`, in walk order.
pub fn scan_targets<C: ProjectContext + ?Sized>(
    ctx: &C,
    root: &Path,
) -> Result<Vec<ScannedTarget>, walkdir::Error> {
    let mut targets = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !should_skip_dir(entry.path()));
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let point = if entry.file_type().is_dir() {
            PointOfInterest::directory(path)
        } else if ctx.file_kind(path) == FileKind::LanguageSource {
            PointOfInterest::file(path, 0)
        } else {
            continue;
        };
        if let Some(draft) = classify(ctx, &point) {
            targets.push(ScannedTarget {
                path: path.to_path_buf(),
                draft,
            });
        }
    }
    info!(root = %root.display(), count = targets.len(), "scanned runnable targets");
    Ok(targets)
}

fn should_skip_dir(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("_build" | "deps" | ".git" | "node_modules" | ".elixir_ls")
    )
}

#[cfg(test)]
#[path = "tests/scan_tests.rs"]
mod tests;
