/// Crate-level error types for navfix diagnostics.
use std::path::PathBuf;

/// All errors carry enough context to produce a useful diagnostic without a
/// debugger. Resolution never errors: ambiguous or unmatchable references
/// are outcomes, not failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The requested site root does not exist or is not a directory.
    #[error("root not found: {}", path.display())]
    RootNotFound {
        /// Path that was expected to be the site root.
        path: PathBuf,
    },

    /// TOML deserialization failed for `.navfix.toml`.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Filesystem watcher could not be created or started.
    #[error("watch failed: {reason}")]
    WatchFailed {
        /// Description of the watcher failure.
        reason: String,
    },
}
