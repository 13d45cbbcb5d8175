//! File watcher: runs `check` on startup, then re-runs it whenever the
//! site's files change.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::error::Error;
use crate::inventory::Inventory;

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// Collect the parent directory of every inventory entry.
fn collect_watch_dirs(inventory: &Inventory) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    for file in &inventory.files {
        if let Some(parent) = file.parent() {
            dirs.insert(parent.to_path_buf());
        }
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::WatchFailed` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::WatchFailed { reason: e.to_string() };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial check, then watches the site's directories and re-checks
/// on changes. Pages added in brand-new directories are picked up on the
/// next restart, not by the running watcher.
///
/// # Errors
///
/// Returns errors from inventory building or watcher setup.
pub fn run(root: &Path) -> Result<ExitCode, Error> {
    eprintln!("watch: initial check");
    let mut last_code = run_check(root);

    let inventory = Inventory::build(root)?;
    let watch_dirs = collect_watch_dirs(&inventory);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if dir.exists() {
            let _ = watcher.watch(dir, RecursiveMode::NonRecursive);
        }
    }

    let dir_count = watch_dirs.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-checking...");
        last_code = run_check(root);
    }

    return Ok(last_code);
}

/// Run check once and print the result. Returns the exit code from check.
fn run_check(root: &Path) -> ExitCode {
    return match commands::check(root, false) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2_u8)
        },
    };
}
