use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;

/// The read-only set of all HTML files under the processing root.
/// Built once per run and used to find unique rename targets by filename.
#[derive(Debug)]
pub struct Inventory {
    /// Every discovered `.html` path, sorted for stable diagnostics.
    pub files: Vec<PathBuf>,
}

impl Inventory {
    /// Walk every subdirectory of `root` and collect `.html` files.
    /// Directory symlinks are not followed, so a cyclic link cannot recurse;
    /// a symlink pointing at an HTML file is listed like any other file.
    ///
    /// # Errors
    ///
    /// Returns `Error::RootNotFound` if `root` is not a directory.
    pub fn build(root: &Path) -> Result<Self, Error> {
        if !root.is_dir() {
            return Err(Error::RootNotFound { path: root.to_path_buf() });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();

        return Ok(Self { files });
    }

    /// All entries whose filename equals `name` case-insensitively.
    /// File order is irrelevant to matching; the inventory stays sorted so
    /// any diagnostic listing candidates is reproducible.
    pub fn matching_basename(&self, name: &str) -> Vec<&PathBuf> {
        return self
            .files
            .iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|f| f.eq_ignore_ascii_case(name))
            })
            .collect();
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_html_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("a/deep")).unwrap();
        std::fs::write(root.join("index.html"), "x").unwrap();
        std::fs::write(root.join("a/page.html"), "x").unwrap();
        std::fs::write(root.join("a/deep/other.html"), "x").unwrap();
        std::fs::write(root.join("a/styles.css"), "x").unwrap();
        std::fs::write(root.join("notes.txt"), "x").unwrap();

        let inventory = Inventory::build(root).unwrap();
        let names: Vec<String> = inventory
            .files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a/deep/other.html", "a/page.html", "index.html"]);
    }

    #[test]
    fn basename_lookup_is_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::write(root.join("b/Target.html"), "x").unwrap();

        let inventory = Inventory::build(root).unwrap();
        assert_eq!(inventory.matching_basename("target.html").len(), 1);
        assert_eq!(inventory.matching_basename("TARGET.HTML").len(), 1);
        assert!(inventory.matching_basename("missing.html").is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("nope");
        assert!(matches!(
            Inventory::build(&gone),
            Err(Error::RootNotFound { .. })
        ));
    }
}
