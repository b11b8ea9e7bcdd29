//! Edit representation
//!
//! Both encodings normalize into one tagged union so the filter and
//! applicator dispatch exhaustively instead of sniffing tuple shapes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single file edit decoded from a model response.
///
/// `path` is the source path string exactly as the model produced it
/// (repo-relative, pre-normalization). Resolution to an absolute path
/// happens in the filter step and is carried by [`ResolvedEdit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    /// Find `original` verbatim in the current file content and replace it
    /// with `updated`, subject to the block decoder's reconciliation
    /// tolerance.
    SearchReplace {
        path: String,
        original: String,
        updated: String,
    },
    /// Replace the entire file content (creates the file if absent).
    WholeFile { path: String, content: String },
}

impl Edit {
    /// The model-supplied target path, for display and resolution.
    pub fn path(&self) -> &str {
        match self {
            Edit::SearchReplace { path, .. } => path,
            Edit::WholeFile { path, .. } => path,
        }
    }
}

/// An edit that passed the policy filter, paired with its canonical
/// absolute target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEdit {
    pub abs_path: PathBuf,
    pub edit: Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_accessor() {
        let sr = Edit::SearchReplace {
            path: "src/a.rs".to_string(),
            original: "old".to_string(),
            updated: "new".to_string(),
        };
        let wf = Edit::WholeFile {
            path: "src/b.rs".to_string(),
            content: "fn main() {}\n".to_string(),
        };
        assert_eq!(sr.path(), "src/a.rs");
        assert_eq!(wf.path(), "src/b.rs");
    }

    #[test]
    fn test_edit_serializes_with_kind_tag() {
        let edit = Edit::WholeFile {
            path: "notes.md".to_string(),
            content: "# Notes\n".to_string(),
        };
        let json = serde_json::to_string(&edit).unwrap();
        assert!(json.contains("\"kind\":\"whole_file\""));
        let back: Edit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edit);
    }
}
