/// Core domain types for navigation link resolution.
use std::path::{Path, PathBuf};

/// The effective context against which a document's relative references are
/// resolved. Exactly one context is active per document and it applies
/// uniformly to every href resolved within that document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseContext {
    /// Explicit non-remote `<base href>` directive, resolved to a directory.
    Directive(PathBuf),
    /// No usable directive: the document's own containing directory.
    DocumentDir(PathBuf),
    /// Remote origin directive (`http...`). Kept opaque; never resolved
    /// against the filesystem.
    Remote(String),
}

impl BaseContext {
    /// The directory used for existence checks and relative-path
    /// computation. A remote origin cannot be verified on disk, so it falls
    /// back to the document's own directory.
    pub fn effective_dir<'a>(&'a self, document_dir: &'a Path) -> &'a Path {
        match self {
            BaseContext::Directive(dir) | BaseContext::DocumentDir(dir) => dir.as_path(),
            BaseContext::Remote(_) => document_dir,
        }
    }
}

/// The decision made for one navigation href during a dry-run scan.
#[derive(Debug)]
pub struct HrefDecision {
    /// The href attribute value as found in the document.
    pub href: String,
    /// What resolution decided for it.
    pub outcome: Outcome,
}

/// Three-way result of resolving one href inside a navigation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one inventory entry matched the broken reference's filename.
    /// Carries the freshly computed relative path.
    Rewritten(String),
    /// The reference is ignored or already resolves to an existing file.
    Unchanged,
    /// Zero or multiple filename matches. Left as-is, never guessed.
    Unresolved,
}
