//! File classification registry
//!
//! Tracks which files the model may modify (editable) and which were given
//! only as read-only reference (context). The two sets are disjoint by
//! construction: every mutation goes through [`FileRegistry::promote`] or
//! [`FileRegistry::mark_context`], which each remove the path from the
//! opposite set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Tracking mode for a file added to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileMode {
    /// The model is permitted to modify this file.
    Editable,
    /// Read-only reference; edits targeting it are rejected.
    Context,
}

/// The editable/context partition of known files, keyed by canonical
/// absolute path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRegistry {
    editable: BTreeSet<PathBuf>,
    context: BTreeSet<PathBuf>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from the session's initial file lists. Context files are
    /// applied last so they win when a path appears in both lists.
    pub fn seed<E, C>(editable: E, context: C) -> Self
    where
        E: IntoIterator<Item = PathBuf>,
        C: IntoIterator<Item = PathBuf>,
    {
        let mut registry = Self::new();
        for path in editable {
            registry.promote(path);
        }
        for path in context {
            registry.mark_context(path);
        }
        registry
    }

    /// Mark a path as editable, removing any context classification.
    pub fn promote(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.context.remove(&path);
        self.editable.insert(path);
    }

    /// Mark a path as read-only context, removing any editable classification.
    pub fn mark_context(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.editable.remove(&path);
        self.context.insert(path);
    }

    /// Drop a path from tracking entirely.
    pub fn remove(&mut self, path: &Path) {
        self.editable.remove(path);
        self.context.remove(path);
    }

    pub fn is_editable(&self, path: &Path) -> bool {
        self.editable.contains(path)
    }

    pub fn is_context(&self, path: &Path) -> bool {
        self.context.contains(path)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.is_editable(path) || self.is_context(path)
    }

    /// Editable paths in sorted order.
    pub fn editable_files(&self) -> impl Iterator<Item = &Path> {
        self.editable.iter().map(PathBuf::as_path)
    }

    /// Context paths in sorted order.
    pub fn context_files(&self) -> impl Iterator<Item = &Path> {
        self.context.iter().map(PathBuf::as_path)
    }

    /// Render the classification as a markdown section suitable for
    /// inclusion in chat context, with paths shown relative to `root`.
    /// Returns `None` when nothing is tracked.
    pub fn classification_summary(&self, root: &Path) -> Option<String> {
        if self.editable.is_empty() && self.context.is_empty() {
            return None;
        }

        let mut out = String::from("# File Classification:\n");

        if !self.editable.is_empty() {
            out.push_str("\n## Editable Files (can be modified):\n");
            for path in &self.editable {
                out.push_str(&format!("- {}\n", rel_display(path, root)));
            }
        }

        if !self.context.is_empty() {
            out.push_str("\n## Context Files (read-only reference):\n");
            for path in &self.context {
                out.push_str(&format!("- {}\n", rel_display(path, root)));
            }
        }

        Some(out)
    }
}

fn rel_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    fn assert_disjoint(registry: &FileRegistry) {
        let editable: BTreeSet<_> = registry.editable_files().collect();
        let context: BTreeSet<_> = registry.context_files().collect();
        assert!(editable.is_disjoint(&context));
    }

    #[test]
    fn test_promote_and_mark_context_stay_disjoint() {
        let mut registry = FileRegistry::new();
        registry.promote(p("/repo/a.rs"));
        registry.mark_context(p("/repo/a.rs"));
        assert_disjoint(&registry);
        assert!(registry.is_context(&p("/repo/a.rs")));
        assert!(!registry.is_editable(&p("/repo/a.rs")));

        registry.promote(p("/repo/a.rs"));
        assert_disjoint(&registry);
        assert!(registry.is_editable(&p("/repo/a.rs")));
        assert!(!registry.is_context(&p("/repo/a.rs")));
    }

    #[test]
    fn test_seed_context_wins_ties() {
        let registry = FileRegistry::seed(
            vec![p("/repo/a.rs"), p("/repo/b.rs")],
            vec![p("/repo/b.rs")],
        );
        assert!(registry.is_editable(&p("/repo/a.rs")));
        assert!(registry.is_context(&p("/repo/b.rs")));
        assert_disjoint(&registry);
    }

    #[test]
    fn test_remove_drops_from_both() {
        let mut registry = FileRegistry::new();
        registry.promote(p("/repo/a.rs"));
        registry.mark_context(p("/repo/b.rs"));

        registry.remove(&p("/repo/a.rs"));
        registry.remove(&p("/repo/b.rs"));
        assert!(!registry.is_tracked(&p("/repo/a.rs")));
        assert!(!registry.is_tracked(&p("/repo/b.rs")));
    }

    #[test]
    fn test_disjoint_after_arbitrary_sequence() {
        let mut registry = FileRegistry::new();
        let paths = ["/r/a", "/r/b", "/r/c", "/r/a", "/r/b"];
        for (i, path) in paths.iter().enumerate() {
            match i % 3 {
                0 => registry.promote(p(path)),
                1 => registry.mark_context(p(path)),
                _ => registry.remove(&p(path)),
            }
            assert_disjoint(&registry);
        }
    }

    #[test]
    fn test_classification_summary() {
        let mut registry = FileRegistry::new();
        assert!(registry.classification_summary(Path::new("/repo")).is_none());

        registry.promote(p("/repo/src/main.rs"));
        registry.mark_context(p("/repo/docs/overview.md"));

        let summary = registry
            .classification_summary(Path::new("/repo"))
            .unwrap();
        assert!(summary.starts_with("# File Classification:\n"));
        assert!(summary.contains("## Editable Files (can be modified):\n- src/main.rs\n"));
        assert!(summary.contains("## Context Files (read-only reference):\n- docs/overview.md\n"));
    }
}
