//! Search/replace block decoder interface
//!
//! The decoder that parses `<<<<<<< SEARCH` / `>>>>>>> REPLACE` marker blocks
//! and reconciles an "original" text span against current file content lives
//! outside this crate. It is consumed here as an opaque service behind
//! [`BlockDecoder`]; only the marker constants and the decoded shapes are
//! owned by patchflow.

use crate::fence::Fence;

/// Marks the start of the search section of an edit block.
pub const SEARCH_MARKER: &str = "<<<<<<< SEARCH";
/// Separates the search section from the replace section.
pub const DIVIDER_MARKER: &str = "=======";
/// Marks the end of the replace section of an edit block.
pub const REPLACE_MARKER: &str = ">>>>>>> REPLACE";

/// One block decoded from a search/replace response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBlock {
    /// An edit targeting a file.
    Edit {
        path: String,
        original: String,
        updated: String,
    },
    /// A fenced block with no associated filename that the decoder judged to
    /// be a shell command rather than a file edit. Diverted aside, never
    /// applied to disk.
    Command(String),
}

/// The external decode-and-reconcile service for search/replace blocks.
pub trait BlockDecoder {
    /// Decode every marker block in `text` into [`DecodedBlock`]s.
    ///
    /// Errors indicate malformed marker structure the decoder could not
    /// recover from; they propagate to the caller unchanged.
    fn decode(
        &self,
        text: &str,
        fence: &Fence,
        chat_files: &[String],
    ) -> anyhow::Result<Vec<DecodedBlock>>;

    /// Locate `original` inside `current` (tolerating minor formatting
    /// drift) and substitute `updated`.
    ///
    /// Returns the full new file content, or `None` when the original text
    /// could not be matched.
    fn reconcile(
        &self,
        path: &str,
        current: &str,
        original: &str,
        updated: &str,
        fence: &Fence,
    ) -> Option<String>;
}
