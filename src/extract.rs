//! Edit extraction
//!
//! Chooses the decoder for a response and normalizes both encodings into one
//! edit list. Dispatch is binary on marker presence, not per-block: a
//! response is either search/replace or whole-file, never both.

use crate::blocks::{BlockDecoder, DecodedBlock, REPLACE_MARKER, SEARCH_MARKER};
use crate::edit::Edit;
use crate::fence::{scan_whole_file_blocks, Fence};
use anyhow::Result;
use tracing::debug;

/// The normalized output of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEdits {
    pub edits: Vec<Edit>,
    /// Shell commands the decoder separated out of pathless blocks. These
    /// never reach the applicator; the session decides what to do with them.
    pub shell_commands: Vec<String>,
}

/// Extract every edit from a response.
///
/// If the text contains both search/replace markers, the block decoder is
/// invoked and pathless blocks are diverted to `shell_commands`; otherwise
/// the fence scanner runs and every pair becomes a whole-file edit.
pub fn extract_edits(
    text: &str,
    fence: &Fence,
    chat_files: &[String],
    decoder: &dyn BlockDecoder,
) -> Result<ExtractedEdits> {
    if text.contains(SEARCH_MARKER) && text.contains(REPLACE_MARKER) {
        let mut extracted = ExtractedEdits::default();
        for block in decoder.decode(text, fence, chat_files)? {
            match block {
                DecodedBlock::Edit {
                    path,
                    original,
                    updated,
                } => extracted.edits.push(Edit::SearchReplace {
                    path,
                    original,
                    updated,
                }),
                DecodedBlock::Command(command) => extracted.shell_commands.push(command),
            }
        }
        debug!(
            edits = extracted.edits.len(),
            commands = extracted.shell_commands.len(),
            "decoded search/replace response"
        );
        Ok(extracted)
    } else {
        let edits: Vec<Edit> = scan_whole_file_blocks(text, fence, chat_files)
            .into_iter()
            .map(|(path, content)| Edit::WholeFile { path, content })
            .collect();
        debug!(edits = edits.len(), "decoded whole-file response");
        Ok(ExtractedEdits {
            edits,
            shell_commands: Vec::new(),
        })
    }
}
