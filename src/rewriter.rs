//! Navigation-block href rewriting. Only anchors inside the designated
//! container element are touched; every byte outside those blocks is
//! preserved verbatim.

use std::path::Path;

use regex::{Captures, Regex};

use crate::inventory::Inventory;
use crate::resolver;
use crate::types::{BaseContext, HrefDecision, Outcome};

/// Compiled patterns for one run. The navigation pattern depends on the
/// configured container class, so the rewriter is built once and reused for
/// every document.
pub struct Rewriter {
    /// Matches one double-quoted href attribute, capturing its value.
    href_pattern: Regex,
    /// Matches a whole navigation container block, non-greedily.
    nav_pattern: Regex,
}

impl Rewriter {
    /// Build the patterns for the given navigation container class.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded patterns are invalid (compile-time
    /// invariant; the class name is escaped).
    pub fn new(nav_class: &str) -> Self {
        let class = regex::escape(nav_class);
        Self {
            href_pattern: Regex::new(r#"href="([^"]+)""#).expect("valid regex"),
            nav_pattern: Regex::new(&format!(r#"(?s)<nav\s+class="{class}">.*?</nav>"#))
                .expect("valid regex"),
        }
    }

    /// Rewrite every resolvable href inside the document's navigation
    /// blocks. Returns the new text and the number of attributes changed;
    /// zero changes means the caller must not write the document back.
    pub fn rewrite(
        &self,
        text: &str,
        document_path: &Path,
        base: &BaseContext,
        inventory: &Inventory,
    ) -> (String, u32) {
        let mut changed = 0_u32;
        let new_text = self
            .nav_pattern
            .replace_all(text, |block: &Captures<'_>| {
                self.href_pattern
                    .replace_all(&block[0], |href: &Captures<'_>| {
                        match resolver::resolve(document_path, &href[1], base, inventory) {
                            Outcome::Rewritten(path) => {
                                changed = changed.saturating_add(1);
                                format!(r#"href="{path}""#)
                            },
                            Outcome::Unchanged | Outcome::Unresolved => href[0].to_string(),
                        }
                    })
                    .into_owned()
            })
            .into_owned();
        (new_text, changed)
    }

    /// Scan without rewriting: the outcome of every navigation href, in
    /// document order.
    pub fn scan(
        &self,
        text: &str,
        document_path: &Path,
        base: &BaseContext,
        inventory: &Inventory,
    ) -> Vec<HrefDecision> {
        let mut decisions = Vec::new();
        for block in self.nav_pattern.find_iter(text) {
            for href in self.href_pattern.captures_iter(block.as_str()) {
                let value = href[1].to_string();
                let outcome = resolver::resolve(document_path, &value, base, inventory);
                decisions.push(HrefDecision { href: value, outcome });
            }
        }
        decisions
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    const NAV_CLASS: &str = "sidebar-nav";

    /// Site tree with a page in `a/` and a unique `target.html` in `b/`.
    fn site() -> (tempfile::TempDir, Inventory) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::write(root.join("a/page.html"), "x").unwrap();
        std::fs::write(root.join("b/target.html"), "x").unwrap();
        let inventory = Inventory::build(root).unwrap();
        (tmp, inventory)
    }

    #[test]
    fn hrefs_outside_nav_blocks_are_untouched() {
        let (tmp, inventory) = site();
        let document = tmp.path().join("a/page.html");
        let base = BaseContext::DocumentDir(tmp.path().join("a"));
        let text = concat!(
            r#"<a href="old/target.html">body link</a>"#,
            r#"<nav class="sidebar-nav"><a href="old/target.html">nav link</a></nav>"#,
        );

        let rewriter = Rewriter::new(NAV_CLASS);
        let (new_text, changed) = rewriter.rewrite(text, &document, &base, &inventory);
        assert_eq!(changed, 1);
        assert!(new_text.starts_with(r#"<a href="old/target.html">body link</a>"#));
        assert!(new_text.contains(r#"<nav class="sidebar-nav"><a href="../b/target.html">"#));
    }

    #[test]
    fn every_nav_block_is_processed() {
        let (tmp, inventory) = site();
        let document = tmp.path().join("a/page.html");
        let base = BaseContext::DocumentDir(tmp.path().join("a"));
        let text = concat!(
            "<nav class=\"sidebar-nav\">\n<a href=\"old/target.html\">one</a>\n</nav>\n",
            "<p>between</p>\n",
            "<nav class=\"sidebar-nav\">\n<a href=\"stale/target.html\">two</a>\n</nav>\n",
        );

        let rewriter = Rewriter::new(NAV_CLASS);
        let (new_text, changed) = rewriter.rewrite(text, &document, &base, &inventory);
        assert_eq!(changed, 2);
        assert_eq!(new_text.matches("../b/target.html").count(), 2);
        assert!(new_text.contains("<p>between</p>"));
    }

    #[test]
    fn clean_document_comes_back_byte_identical() {
        let (tmp, inventory) = site();
        let document = tmp.path().join("a/page.html");
        let base = BaseContext::DocumentDir(tmp.path().join("a"));
        let text = concat!(
            "<nav class=\"sidebar-nav\">",
            r#"<a href="../b/target.html">valid</a>"#,
            r#"<a href="https://example.com/">remote</a>"#,
            r##"<a href="#top">anchor</a>"##,
            "</nav>",
        );

        let rewriter = Rewriter::new(NAV_CLASS);
        let (new_text, changed) = rewriter.rewrite(text, &document, &base, &inventory);
        assert_eq!(changed, 0);
        assert_eq!(new_text, text);
    }

    #[test]
    fn unresolved_hrefs_are_preserved_verbatim() {
        let (tmp, _) = site();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("c")).unwrap();
        std::fs::write(root.join("c/target.html"), "x").unwrap();
        let inventory_with_twin = Inventory::build(root).unwrap();

        let document = root.join("a/page.html");
        let base = BaseContext::DocumentDir(root.join("a"));
        let text = r#"<nav class="sidebar-nav"><a href="old/target.html">dup</a></nav>"#;

        let rewriter = Rewriter::new(NAV_CLASS);
        let (new_text, changed) = rewriter.rewrite(text, &document, &base, &inventory_with_twin);
        assert_eq!(changed, 0);
        assert_eq!(new_text, text);
    }

    #[test]
    fn scan_reports_each_href_outcome() {
        let (tmp, inventory) = site();
        let document = tmp.path().join("a/page.html");
        let base = BaseContext::DocumentDir(tmp.path().join("a"));
        let text = concat!(
            "<nav class=\"sidebar-nav\">",
            r#"<a href="old/target.html">broken</a>"#,
            r#"<a href="gone.html">gone</a>"#,
            r##"<a href="#top">anchor</a>"##,
            "</nav>",
        );

        let rewriter = Rewriter::new(NAV_CLASS);
        let decisions = rewriter.scan(text, &document, &base, &inventory);
        assert_eq!(decisions.len(), 3);
        assert_eq!(
            decisions[0].outcome,
            Outcome::Rewritten("../b/target.html".to_string())
        );
        assert_eq!(decisions[1].outcome, Outcome::Unresolved);
        assert_eq!(decisions[2].outcome, Outcome::Unchanged);
    }

    #[test]
    fn custom_container_class_is_honored() {
        let (tmp, inventory) = site();
        let document = tmp.path().join("a/page.html");
        let base = BaseContext::DocumentDir(tmp.path().join("a"));
        let text = concat!(
            r#"<nav class="sidebar-nav"><a href="old/target.html">skip</a></nav>"#,
            r#"<nav class="site-menu"><a href="old/target.html">hit</a></nav>"#,
        );

        let rewriter = Rewriter::new("site-menu");
        let (new_text, changed) = rewriter.rewrite(text, &document, &base, &inventory);
        assert_eq!(changed, 1);
        assert!(new_text.contains(r#"<nav class="sidebar-nav"><a href="old/target.html">"#));
        assert!(new_text.contains(r#"<nav class="site-menu"><a href="../b/target.html">"#));
    }
}
