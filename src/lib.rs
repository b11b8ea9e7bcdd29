//! patchflow — turns free-form LLM responses into validated filesystem edits.
//!
//! A model response is sniffed for one of two edit encodings (search/replace
//! marker blocks or whole-file fenced blocks), decoded into structured edits,
//! filtered against an editable/context file policy, and applied to disk with
//! per-edit failure reporting. The upstream producer is assumed to be
//! unreliable: malformed blocks are dropped, never fatal.

pub mod apply;
pub mod blocks;
pub mod edit;
pub mod extract;
pub mod fence;
pub mod filter;
pub mod fsio;
pub mod pipeline;
pub mod registry;
pub mod session;
