//! Core CLI commands for navfix: fix, check.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use crate::basepath;
use crate::config::Config;
use crate::error::Error;
use crate::inventory::Inventory;
use crate::rewriter::Rewriter;
use crate::types::Outcome;

/// The machine-readable report emitted by `check --json`.
#[derive(Serialize)]
struct CheckReport<'a> {
    /// Hrefs the resolver would rewrite.
    pending: &'a [PendingRewrite],
    /// Hrefs the resolver refuses to touch.
    unresolved: &'a [UnresolvedRef],
}

/// A pending href rewrite found by the dry-run check.
#[derive(Debug, Serialize)]
pub struct PendingRewrite {
    /// Document containing the href, relative to the root.
    pub file: PathBuf,
    /// Replacement relative path.
    pub new: String,
    /// Current broken href value.
    pub old: String,
}

/// Counters threaded back from a full fix pass. Never global state.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Documents written back with at least one rewritten href.
    pub documents_changed: u32,
    /// Individual href attributes updated across all documents.
    pub hrefs_updated: u32,
}

/// A navigation href the resolver left alone: broken, but with zero or
/// several inventory candidates sharing its filename.
#[derive(Debug, Serialize)]
pub struct UnresolvedRef {
    /// Document containing the href, relative to the root.
    pub file: PathBuf,
    /// The href value as found in the document.
    pub href: String,
    /// Inventory entries sharing the href's filename. Anything other than
    /// exactly one blocks rewriting.
    pub matches: usize,
}

/// Resolve every navigation href under `root` and report what a fix pass
/// would do, without writing anything.
///
/// # Errors
///
/// Returns errors from config loading, inventory building, or file reads.
pub fn check(root: &Path, json: bool) -> Result<ExitCode, Error> {
    let (pending, unresolved) = run_check(root)?;

    if json {
        let report = CheckReport { pending: &pending, unresolved: &unresolved };
        // serde_json::to_string_pretty won't fail on this structure.
        let out = serde_json::to_string_pretty(&report).unwrap_or_default();
        println!("{out}");
    } else {
        print_check_report(&pending, &unresolved);
    }

    // Exit code priority: pending rewrites (1) > clean tree (0).
    if pending.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    Ok(ExitCode::from(1))
}

/// Rewrite broken navigation hrefs in place under `root` and print the two
/// run counters.
///
/// A run that changes nothing exits nonzero: the batch found nothing to
/// fix, which is an anomaly, not a success.
///
/// # Errors
///
/// Returns errors from config loading, inventory building, or file I/O.
pub fn fix(root: &Path) -> Result<ExitCode, Error> {
    let summary = run_fix(root)?;
    println!(
        "Files changed: {}, hrefs updated: {}",
        summary.documents_changed, summary.hrefs_updated
    );

    if summary.documents_changed == 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Number of inventory entries sharing the reference's filename.
fn match_count(inventory: &Inventory, reference: &str) -> usize {
    Path::new(reference.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| inventory.matching_basename(n).len())
        .unwrap_or(0)
}

/// Print the human-readable check report.
fn print_check_report(pending: &[PendingRewrite], unresolved: &[UnresolvedRef]) {
    for p in pending {
        println!("REWRITE  {}: {} -> {}", p.file.display(), p.old, p.new);
    }
    for u in unresolved {
        println!("SKIP     {}: {} ({} matches)", u.file.display(), u.href, u.matches);
    }

    if pending.is_empty() && unresolved.is_empty() {
        println!("All navigation links resolve");
        return;
    }

    println!();
    println!("{} pending, {} skipped", pending.len(), unresolved.len());
}

/// Run the resolution pass without writing and collect per-href records.
///
/// # Errors
///
/// Returns errors from config loading, inventory building, or file reads.
fn run_check(root: &Path) -> Result<(Vec<PendingRewrite>, Vec<UnresolvedRef>), Error> {
    let config = Config::load(root)?;
    let inventory = Inventory::build(root)?;
    let rewriter = Rewriter::new(&config.nav_class);

    let mut pending: Vec<PendingRewrite> = Vec::new();
    let mut unresolved: Vec<UnresolvedRef> = Vec::new();

    for document in &inventory.files {
        if !should_process(&config, root, document) {
            continue;
        }
        let text = std::fs::read_to_string(document)?;
        let document_dir = document.parent().unwrap_or(Path::new(""));
        let base = basepath::detect(&text, document_dir, root);
        let relative = document.strip_prefix(root).unwrap_or(document).to_path_buf();

        for decision in rewriter.scan(&text, document, &base, &inventory) {
            match decision.outcome {
                Outcome::Rewritten(new) => pending.push(PendingRewrite {
                    file: relative.clone(),
                    new,
                    old: decision.href,
                }),
                Outcome::Unchanged => {},
                Outcome::Unresolved => {
                    let matches = match_count(&inventory, &decision.href);
                    unresolved.push(UnresolvedRef {
                        file: relative.clone(),
                        href: decision.href,
                        matches,
                    });
                },
            }
        }
    }

    Ok((pending, unresolved))
}

/// Run the full fix pass and thread the counters back.
///
/// Documents are read once, rewritten in memory, and written back only when
/// at least one href changed, so an untouched file keeps its bytes and its
/// modification time.
///
/// # Errors
///
/// Returns errors from config loading, inventory building, or file I/O.
fn run_fix(root: &Path) -> Result<RunSummary, Error> {
    let config = Config::load(root)?;
    let inventory = Inventory::build(root)?;
    let rewriter = Rewriter::new(&config.nav_class);

    let mut summary = RunSummary::default();
    for document in &inventory.files {
        if !should_process(&config, root, document) {
            continue;
        }
        let text = std::fs::read_to_string(document)?;
        let document_dir = document.parent().unwrap_or(Path::new(""));
        let base = basepath::detect(&text, document_dir, root);

        let (new_text, changed) = rewriter.rewrite(&text, document, &base, &inventory);
        if changed > 0 {
            std::fs::write(document, new_text)?;
            summary.documents_changed = summary.documents_changed.saturating_add(1);
            summary.hrefs_updated = summary.hrefs_updated.saturating_add(changed);
        }
    }

    Ok(summary)
}

/// Apply the config's include/exclude filters to one document path.
fn should_process(config: &Config, root: &Path, document: &Path) -> bool {
    let relative = document.strip_prefix(root).unwrap_or(document);
    config.should_process(&relative.to_string_lossy())
}
