//! End-to-end run orchestration.
//!
//! One run is a strict left-to-right hand-off: load, the three merge
//! passes, categorization, the policy filter, write. Each stage owns its
//! output list exclusively; nothing is shared and nothing is retried.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::category::bucket;
use crate::error::CruncherResult;
use crate::filter::{filter, DiscardPrompt};
use crate::merge::{merge_all, MergeStats};
use crate::vcf;

/// Counters and output location of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Contacts parsed from the input file.
    pub loaded: usize,
    /// Contacts remaining after the three merge passes.
    pub merged: usize,
    /// Contacts written to the output file.
    pub kept: usize,
    /// Per-pass merge counters, in pass order.
    pub passes: Vec<MergeStats>,
    /// Where the kept contacts were written.
    pub output_path: PathBuf,
}

/// Deduplicates `input` and writes the kept contacts next to it.
///
/// # Errors
///
/// Any stage failure aborts the run: unreadable input, an invalid record
/// block, a failed prompt, or an unwritable output path.
pub fn run(input: &Path, prompt: &mut dyn DiscardPrompt) -> CruncherResult<RunSummary> {
    let contacts = vcf::load(input)?;
    let loaded = contacts.len();

    let (merged, passes) = merge_all(contacts);
    let merged_count = merged.len();

    let kept = filter(bucket(merged), prompt)?;

    let output_path = vcf::output_path(input);
    vcf::write(&output_path, &kept)?;

    let summary = RunSummary {
        loaded,
        merged: merged_count,
        kept: kept.len(),
        passes,
        output_path,
    };
    match serde_json::to_string(&summary) {
        Ok(json) => log::debug!("run summary: {json}"),
        Err(err) => log::debug!("run summary not serializable: {err}"),
    }
    Ok(summary)
}
