//! Session interface
//!
//! The surrounding session owns path resolution and the diagnostic channel.
//! [`RootSession`] is the reference implementation used by front ends and
//! tests: it resolves model-supplied paths against a repo root and collects
//! diagnostics for later display.

use std::cell::RefCell;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// What the edit pipeline needs from the surrounding session.
pub trait Session {
    /// Resolve a model-supplied (usually repo-relative) path to canonical
    /// absolute form. Must succeed for paths that do not exist yet.
    fn resolve_to_absolute(&self, rel: &str) -> PathBuf;

    /// Report a non-fatal problem (rejected edit, failed write) to the user.
    fn report_error(&self, message: &str);
}

/// Resolves paths against a fixed repo root and buffers diagnostics.
#[derive(Debug, Default)]
pub struct RootSession {
    root: PathBuf,
    errors: RefCell<Vec<String>>,
}

impl RootSession {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            errors: RefCell::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drain buffered diagnostics in report order.
    pub fn take_errors(&self) -> Vec<String> {
        std::mem::take(&mut *self.errors.borrow_mut())
    }
}

impl Session for RootSession {
    fn resolve_to_absolute(&self, rel: &str) -> PathBuf {
        let candidate = Path::new(rel);
        if candidate.is_absolute() {
            normalize_lexically(candidate)
        } else {
            normalize_lexically(&self.root.join(candidate))
        }
    }

    fn report_error(&self, message: &str) {
        warn!("{}", message);
        self.errors.borrow_mut().push(message.to_string());
    }
}

/// Normalize `.` and `..` components without touching the filesystem, so
/// files that do not exist yet still resolve to a stable identity.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
