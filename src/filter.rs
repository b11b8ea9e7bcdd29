//! Edit filtering against the file classification policy
//!
//! Edits targeting context-only files are rejected through the session's
//! diagnostic sink; everything else survives, with new or untracked targets
//! auto-promoted to editable so the model can create files freely.

use crate::edit::{Edit, ResolvedEdit};
use crate::registry::FileRegistry;
use crate::session::Session;
use tracing::debug;

/// Apply the classification policy to an extracted edit list.
///
/// Every surviving edit's target is editable and not context afterwards.
pub fn filter_edits(
    edits: Vec<Edit>,
    registry: &mut FileRegistry,
    session: &dyn Session,
) -> Vec<ResolvedEdit> {
    let mut kept = Vec::with_capacity(edits.len());

    for edit in edits {
        let abs_path = session.resolve_to_absolute(edit.path());

        if registry.is_context(&abs_path) {
            session.report_error(&format!(
                "Cannot edit {}: file is marked as context-only",
                edit.path()
            ));
            debug!(path = edit.path(), "rejected edit targeting context file");
            continue;
        }

        // New and untracked files are always allowed.
        if !registry.is_editable(&abs_path) {
            registry.promote(abs_path.clone());
        }

        kept.push(ResolvedEdit { abs_path, edit });
    }

    kept
}
