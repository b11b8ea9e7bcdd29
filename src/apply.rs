//! Edit application
//!
//! Applies a filtered edit batch to disk. Per-edit failures accumulate and
//! never abort the batch, so one bad edit cannot hide the outcome of the
//! others. Only at the end, if any search/replace edit failed to reconcile
//! (and the run was not a dry run), does the batch raise a single
//! [`ReconcileFailure`] whose rendering is meant to be fed back to the model
//! as corrective context. Edits already written stay on disk.

use crate::blocks::{BlockDecoder, DIVIDER_MARKER, REPLACE_MARKER, SEARCH_MARKER};
use crate::edit::{Edit, ResolvedEdit};
use crate::fence::Fence;
use crate::fsio::FileIo;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One search/replace edit the applicator could not reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEdit {
    pub path: String,
    pub original: String,
    pub updated: String,
}

/// Aggregate failure for a batch containing unreconcilable search/replace
/// edits. `applied` lists the paths that were still written successfully;
/// the caller must nonetheless treat the whole batch as failed.
///
/// The `Display` rendering frames every failed triple in SEARCH/REPLACE
/// marker syntax so it can be handed straight back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_failed_blocks(.failed))]
pub struct ReconcileFailure {
    pub failed: Vec<FailedEdit>,
    pub applied: Vec<String>,
}

fn render_failed_blocks(failed: &[FailedEdit]) -> String {
    let blocks = if failed.len() == 1 { "block" } else { "blocks" };
    let mut res = format!("# {} SEARCH/REPLACE {} failed to match!\n", failed.len(), blocks);
    for edit in failed {
        res.push_str(&format!(
            "\n## SearchReplaceNoExactMatch: This SEARCH block failed to exactly match lines in {}\n{}\n{}{}\n{}{}\n\n",
            edit.path, SEARCH_MARKER, edit.original, DIVIDER_MARKER, edit.updated, REPLACE_MARKER
        ));
    }
    res.push_str(
        "The SEARCH section must exactly match an existing block of lines including all white \
         space, comments, indentation, docstrings, etc\n",
    );
    res
}

/// Apply a filtered edit batch.
///
/// Returns the repo-relative paths touched, in application order. Under
/// `dry_run` nothing is written and the returned list holds the paths that
/// *would* have been touched; reconcile failures are not raised either, so
/// a dry run always returns `Ok`.
pub fn apply_edits(
    edits: &[ResolvedEdit],
    dry_run: bool,
    decoder: &dyn BlockDecoder,
    fence: &Fence,
    io: &dyn FileIo,
    session: &dyn Session,
) -> Result<Vec<String>, ReconcileFailure> {
    let mut applied: Vec<String> = Vec::new();
    let mut failed: Vec<FailedEdit> = Vec::new();

    for resolved in edits {
        match &resolved.edit {
            Edit::SearchReplace {
                path,
                original,
                updated,
            } => {
                let record_failure = |failed: &mut Vec<FailedEdit>| {
                    failed.push(FailedEdit {
                        path: path.clone(),
                        original: original.clone(),
                        updated: updated.clone(),
                    });
                };

                // Search/replace cannot target nonexistent files.
                if !io.exists(&resolved.abs_path) {
                    record_failure(&mut failed);
                    continue;
                }

                let current = match io.read(&resolved.abs_path) {
                    Ok(content) => content,
                    Err(err) => {
                        session.report_error(&format!("Failed to read {}: {}", path, err));
                        record_failure(&mut failed);
                        continue;
                    }
                };

                match decoder.reconcile(path, &current, original, updated, fence) {
                    Some(new_content) if !new_content.is_empty() => {
                        if !dry_run {
                            // A write error after a successful reconcile is a
                            // filesystem problem, not a match failure: sink
                            // only, never the SEARCH/REPLACE aggregate.
                            if let Err(err) = io.write(&resolved.abs_path, &new_content) {
                                session
                                    .report_error(&format!("Failed to write {}: {}", path, err));
                                continue;
                            }
                        }
                        debug!(path = %path, dry_run, "applied search/replace edit");
                        applied.push(path.clone());
                    }
                    _ => record_failure(&mut failed),
                }
            }
            Edit::WholeFile { path, content } => {
                if dry_run {
                    applied.push(path.clone());
                    continue;
                }
                match io.write(&resolved.abs_path, content) {
                    Ok(()) => {
                        debug!(path = %path, "applied whole-file edit");
                        applied.push(path.clone());
                    }
                    Err(err) => {
                        session.report_error(&format!("Failed to write {}: {}", path, err));
                    }
                }
            }
        }
    }

    if !failed.is_empty() && !dry_run {
        return Err(ReconcileFailure { failed, applied });
    }

    Ok(applied)
}
