//! Pipeline coordinator
//!
//! Wires the stages together: raw response text → extractor → filter →
//! applicator. Owns the classification registry and the in-chat file list,
//! which the surrounding session mutates between batches through the add
//! and drop operations here. Single-threaded by design; callers serialize
//! batches against a given working tree.

use crate::apply::apply_edits;
use crate::blocks::BlockDecoder;
use crate::edit::Edit;
use crate::extract::extract_edits;
use crate::fence::Fence;
use crate::filter::filter_edits;
use crate::fsio::FileIo;
use crate::registry::{FileMode, FileRegistry};
use crate::session::Session;
use anyhow::Result;

pub struct EditPipeline<D, S, F>
where
    D: BlockDecoder,
    S: Session,
    F: FileIo,
{
    registry: FileRegistry,
    fence: Fence,
    chat_files: Vec<String>,
    decoder: D,
    session: S,
    io: F,
    shell_commands: Vec<String>,
}

impl<D, S, F> EditPipeline<D, S, F>
where
    D: BlockDecoder,
    S: Session,
    F: FileIo,
{
    pub fn new(decoder: D, session: S, io: F) -> Self {
        Self {
            registry: FileRegistry::new(),
            fence: Fence::default(),
            chat_files: Vec::new(),
            decoder,
            session,
            io,
            shell_commands: Vec::new(),
        }
    }

    pub fn with_fence(mut self, fence: Fence) -> Self {
        self.fence = fence;
        self
    }

    /// Track a file for the session. Context files are shielded from edits;
    /// either mode makes the name visible to filename inference.
    pub fn add_file(&mut self, rel: &str, mode: FileMode) {
        let abs = self.session.resolve_to_absolute(rel);
        match mode {
            FileMode::Editable => self.registry.promote(abs),
            FileMode::Context => self.registry.mark_context(abs),
        }
        if !self.chat_files.iter().any(|f| f == rel) {
            self.chat_files.push(rel.to_string());
        }
    }

    /// Stop tracking a file entirely.
    pub fn drop_file(&mut self, rel: &str) {
        let abs = self.session.resolve_to_absolute(rel);
        self.registry.remove(&abs);
        self.chat_files.retain(|f| f != rel);
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Shell commands diverted from responses so far, in encounter order.
    pub fn shell_commands(&self) -> &[String] {
        &self.shell_commands
    }

    /// Decode a response into policy-checked edits without touching disk.
    /// Diverted shell commands accumulate on the pipeline.
    pub fn extract(&mut self, text: &str) -> Result<Vec<Edit>> {
        let extracted = extract_edits(text, &self.fence, &self.chat_files, &self.decoder)?;
        self.shell_commands.extend(extracted.shell_commands);
        Ok(extracted.edits)
    }

    /// Run the full pipeline over one response: extract, filter, apply.
    ///
    /// Returns the repo-relative paths touched. A batch with unreconcilable
    /// search/replace edits errors with [`crate::apply::ReconcileFailure`]
    /// (downcastable from the returned error) after every edit has been
    /// attempted; under `dry_run` nothing is written and nothing is raised.
    pub fn run(&mut self, text: &str, dry_run: bool) -> Result<Vec<String>> {
        let edits = self.extract(text)?;
        let kept = filter_edits(edits, &mut self.registry, &self.session);
        let applied = apply_edits(
            &kept,
            dry_run,
            &self.decoder,
            &self.fence,
            &self.io,
            &self.session,
        )?;
        Ok(applied)
    }
}
