use std::path::Path;

use crate::error::Error;

/// Default navigation container class, matching the sidebar markup this
/// tool exists to repair.
const DEFAULT_NAV_CLASS: &str = "sidebar-nav";

/// Project configuration loaded from `.navfix.toml` in the site root.
/// Include/exclude patterns are path prefixes applied to documents relative
/// to the root; they scope which documents get rewritten, never which
/// targets the inventory can find.
pub struct Config {
    exclude: Vec<String>,
    include: Vec<String>,
    /// Class attribute of the navigation container element.
    pub nav_class: String,
}

/// Raw TOML structure for `.navfix.toml`.
#[derive(serde::Deserialize)]
struct NavfixTomlConfig {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    nav_class: Option<String>,
}

impl Config {
    /// Load config from `.navfix.toml` in the given root directory.
    /// A missing file yields the defaults; a malformed file is an error,
    /// so a config the user actually wrote is never silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".navfix.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::process_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: NavfixTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            nav_class: raw.nav_class.unwrap_or_else(|| DEFAULT_NAV_CLASS.to_string()),
        })
    }

    /// Default config: every document is processed, default container class.
    fn process_everything_by_default() -> Self {
        Self {
            exclude: Vec::new(),
            include: Vec::new(),
            nav_class: DEFAULT_NAV_CLASS.to_string(),
        }
    }

    /// Check whether a document path (relative to the root) should be
    /// processed.
    ///
    /// A path is included if no include patterns are set (process
    /// everything), or if it starts with at least one include pattern. An
    /// included path is then excluded if it starts with any exclude pattern.
    pub fn should_process(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }
}
