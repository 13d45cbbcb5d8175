//! The link-resolution core: decides whether one navigation href is already
//! valid and, if not, whether the inventory holds an unambiguous replacement.

use std::path::{Component, Path, PathBuf};

use crate::inventory::Inventory;
use crate::types::{BaseContext, Outcome};

/// Decide the fate of one navigation href.
///
/// References matching the ignored pattern (`https?:`, `mailto:`, `#`) are
/// never touched, not even validity-checked. A reference that resolves to an
/// existing file against the base context is left alone. Otherwise the
/// inventory is searched by filename: exactly one match produces a rewrite,
/// zero or several leave the href untouched.
pub fn resolve(
    document_path: &Path,
    reference: &str,
    base: &BaseContext,
    inventory: &Inventory,
) -> Outcome {
    let reference = reference.trim();
    if is_ignored(reference) {
        return Outcome::Unchanged;
    }

    let document_dir = document_path.parent().unwrap_or(Path::new(""));
    let effective_dir = base.effective_dir(document_dir);

    let candidate = normalize_path(&effective_dir.join(reference));
    if candidate.exists() {
        return Outcome::Unchanged;
    }

    let Some(name) = Path::new(reference).file_name().and_then(|n| n.to_str()) else {
        return Outcome::Unresolved;
    };
    let matches = inventory.matching_basename(name);
    let [target] = matches.as_slice() else {
        // Zero candidates or an ambiguous filename. Never guess.
        return Outcome::Unresolved;
    };

    let mut rel = relative_path(effective_dir, target);
    let wants_prefix = !matches!(base, BaseContext::Directive(_));
    if wants_prefix && !rel.starts_with('.') && !rel.starts_with('/') {
        rel.insert_str(0, "./");
    }
    Outcome::Rewritten(rel)
}

/// `^(https?:|mailto:|#)` case-insensitively: absolute URLs, mail links, and
/// fragments are never candidates for rewriting.
fn is_ignored(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with('#')
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("mailto:")
}

/// Collapse `.` and `..` components lexically, never touching the
/// filesystem. Leading `..` is preserved when there is nothing left to pop;
/// `..` directly under the root is dropped.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else if parts.last() != Some(&Component::RootDir) {
                    parts.push(component);
                }
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Relative path from directory `from` to file `to`, with forward-slash
/// separators regardless of platform.
pub(crate) fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize_path(from);
    let to = normalize_path(to);
    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_parts.len().saturating_sub(common);
    let mut parts: Vec<String> = Vec::new();
    for _ in 0..ups {
        parts.push("..".to_string());
    }
    for component in to_parts.iter().skip(common) {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }
    parts.join("/")
}
