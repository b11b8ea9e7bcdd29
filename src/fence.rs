//! Fence scanning for whole-file edit blocks
//!
//! Extracts `(path, full_content)` pairs from fenced code blocks in a model
//! response. The model frequently puts the filename in a heading, a bold
//! line, or an inline backtick mention instead of inside the fence, so
//! filename inference runs through a fallback chain. Blocks whose filename
//! cannot be resolved are dropped, never errored: the producer is expected
//! to be imperfect.

use std::path::Path;
use tracing::debug;

/// Maximum length for an inferred filename. Longer candidates are almost
/// certainly prose that happened to precede a fence.
const MAX_FILENAME_LEN: usize = 250;

/// The delimiter pair marking code-block boundaries in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    pub open: String,
    pub close: String,
}

impl Fence {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Fence {
    fn default() -> Self {
        Self::new("```", "```")
    }
}

/// Scan a response for whole-file fenced blocks.
///
/// Returns `(filename, content)` pairs in encounter order. Content is
/// accumulated verbatim, line terminators included, so a decoded block
/// round-trips byte-for-byte apart from the fence lines themselves.
///
/// Filename inference for a block, in order:
/// 1. the line immediately before the opening fence, stripped of bold
///    markers, a trailing colon, backticks, a leading `#`, and whitespace;
/// 2. if that name is not an in-chat file but its basename is, the basename
///    (the model likes to prepend a bogus `path/to/` prefix);
/// 3. the most recent in-chat file mentioned inline as `` `name` ``;
/// 4. the sole in-chat file, when exactly one is in chat;
/// 5. otherwise the block is skipped.
pub fn scan_whole_file_blocks(
    text: &str,
    fence: &Fence,
    chat_files: &[String],
) -> Vec<(String, String)> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    let mut saw_fname: Option<&str> = None;
    let mut fname: Option<String> = None;
    let mut block_lines: Vec<&str> = Vec::new();
    let mut edits: Vec<(String, String)> = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        if line.starts_with(fence.open.as_str()) || line.starts_with(fence.close.as_str()) {
            if let Some(name) = fname.take() {
                // Closing the open block: flush it.
                edits.push((name, block_lines.concat()));
                block_lines.clear();
                continue;
            }

            // Opening a new block: infer the filename.
            let mut inferred = if i > 0 {
                strip_heading_decorations(lines[i - 1])
            } else {
                String::new()
            };

            if inferred.chars().count() > MAX_FILENAME_LEN {
                inferred.clear();
            }

            // Collapse a model-invented directory prefix down to the basename
            // when the basename is a known in-chat file.
            if !inferred.is_empty() && !chat_files.iter().any(|f| *f == inferred) {
                if let Some(base) = Path::new(&inferred).file_name().and_then(|b| b.to_str()) {
                    if chat_files.iter().any(|f| f == base) {
                        inferred = base.to_string();
                    }
                }
            }

            if inferred.is_empty() {
                if let Some(seen) = saw_fname {
                    inferred = seen.to_string();
                } else if chat_files.len() == 1 {
                    inferred = chat_files[0].clone();
                } else {
                    debug!(line = i + 1, "dropping fenced block with no resolvable filename");
                    continue;
                }
            }

            fname = Some(inferred);
        } else if fname.is_some() {
            block_lines.push(line);
        } else {
            // Prose between blocks: remember the last backtick-quoted mention
            // of an in-chat file for inference rule 3.
            for word in line.split_whitespace() {
                let word = word.trim_end_matches(['.', ':', ',', ';', '!']);
                for chat_file in chat_files {
                    let quoted = format!("`{}`", chat_file);
                    if word == quoted {
                        saw_fname = Some(chat_file.as_str());
                    }
                }
            }
        }
    }

    // A response that never closes its last fence still counts.
    if let Some(name) = fname {
        if !block_lines.is_empty() {
            edits.push((name, block_lines.concat()));
        }
    }

    edits
}

/// Strip the markdown decorations the model wraps filenames in:
/// `**app.py**`, `# app.py:`, `` `app.py` ``.
fn strip_heading_decorations(line: &str) -> String {
    let name = line.trim();
    let name = name.trim_matches('*');
    let name = name.trim_end_matches(':');
    let name = name.trim_matches('`');
    let name = name.trim_start_matches('#');
    name.trim().to_string()
}
