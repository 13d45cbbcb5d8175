//! Base-path directive detection: a per-document `<base href>` override of
//! the directory against which relative references are interpreted.

use std::path::Path;

use regex::Regex;

use crate::resolver::normalize_path;
use crate::types::BaseContext;

/// Scan document text for a `<base href="...">` declaration and classify
/// it. Only the first occurrence counts; later directives are ignored.
///
/// Classification order: a value starting with `http` is a remote origin;
/// a leading `/` is site-root-relative; anything else is relative to the
/// document's own directory. Without a directive the document directory is
/// the context.
///
/// # Panics
///
/// Panics if the hardcoded directive regex is invalid (compile-time
/// invariant).
pub fn detect(text: &str, document_dir: &Path, root: &Path) -> BaseContext {
    let pattern = Regex::new(r#"(?i)<base\s+href=["']([^"']+)["']"#).expect("valid regex");
    let Some(cap) = pattern.captures(text) else {
        return BaseContext::DocumentDir(document_dir.to_path_buf());
    };
    let value = &cap[1];

    if value.starts_with("http") {
        BaseContext::Remote(value.to_string())
    } else if value.starts_with('/') {
        let stripped = value.trim_start_matches('/');
        BaseContext::Directive(normalize_path(&root.join(stripped)))
    } else {
        BaseContext::Directive(normalize_path(&document_dir.join(value)))
    }
}
