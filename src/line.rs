use std::path::Path;

use crate::point::LineNumber;
use crate::project::ProjectContext;

/// 1-based line holding `offset` in `file`, or `None` when it is unknown.
///
/// A lookup landing on the first line (index 0) is reported as unknown too, so a
/// target at the top of a file runs the whole file.
pub fn line_number<C: ProjectContext + ?Sized>(
    ctx: &C,
    file: &Path,
    offset: usize,
) -> Option<LineNumber> {
    match ctx.line_index(file, offset) {
        None | Some(0) => None,
        Some(index) => LineNumber::new(index + 1),
    }
}

/// Zero-based index of the line containing byte `offset` of `text`.
pub fn line_index_in(text: &[u8], offset: usize) -> Option<usize> {
    let prefix = text.get(..offset)?;
    Some(prefix.iter().filter(|byte| **byte == b'\n').count())
}
