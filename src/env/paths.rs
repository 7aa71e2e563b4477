//! Candidate `.env` locations

use crate::domain::ConfigLocation;
use std::path::Path;

/// Build the ordered list of candidate files for `anchor`.
///
/// The anchor directory comes first, followed by up to `depth - 1` ancestors,
/// each joined with `file_name`. Pure path arithmetic: nothing is read from
/// disk. The list always contains at least the anchor itself.
pub fn candidate_locations(anchor: &Path, file_name: &str, depth: usize) -> Vec<ConfigLocation> {
    anchor
        .ancestors()
        .take(depth.max(1))
        .enumerate()
        .map(|(rank, dir)| ConfigLocation { path: dir.join(file_name), rank })
        .collect()
}
