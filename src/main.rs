mod basepath;
mod commands;
mod config;
mod diagnostics;
mod error;
mod inventory;
mod resolver;
mod rewriter;
mod types;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "navfix", about = "Repair broken navigation links in static HTML sites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report pending rewrites without touching any file
    Check {
        /// Site root containing the HTML files
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite broken navigation hrefs in place
    Fix {
        /// Site root containing the HTML files
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Re-run check whenever site files change
    Watch {
        /// Site root containing the HTML files
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { root, json } => commands::check(&root, json),
        Commands::Fix { root } => commands::fix(&root),
        Commands::Watch { root } => watch::run(&root),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    }
}
