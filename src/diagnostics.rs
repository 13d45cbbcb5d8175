use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::RootNotFound { path } => format!("\
# Error: Root Not Found

`{}` does not exist or is not a directory.

## Fix

Pass the site root explicitly:

    navfix fix path/to/site
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `.navfix.toml` in the site root.
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::WatchFailed { reason } => format!("\
# Error: Watch Failed

{reason}
"),
    }
}
