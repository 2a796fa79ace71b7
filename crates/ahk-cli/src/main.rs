// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! AutoHotkey v2 analyzer command-line interface.
//!
//! This is the main entry point for the `ahk` command.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod diagnostic;

use commands::OutputFormat;

/// Static analysis for AutoHotkey v2 scripts
#[derive(Debug, Parser)]
#[command(name = "ahk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tokens of a script
    Tokenize {
        /// Script to read
        file: Utf8PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse a script and print its syntax tree
    Parse {
        /// Script to read
        file: Utf8PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check a script for errors and style issues
    Lint {
        /// Script to read
        file: Utf8PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
        /// Diagnostic code to suppress (repeatable)
        #[arg(long = "disable", value_name = "CODE")]
        disabled: Vec<String>,
    },

    /// Print highlighting categories for each token
    SemanticTokens {
        /// Script to read
        file: Utf8PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run every phase and print the combined result as JSON
    Analyze {
        /// Script to read
        file: Utf8PathBuf,
    },

    /// Print size and complexity figures
    Stats {
        /// Script to read
        file: Utf8PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Tokenize { file, format } => commands::tokenize::run(&file, format),
        Command::Parse { file, format } => commands::parse::run(&file, format),
        Command::Lint {
            file,
            format,
            disabled,
        } => commands::lint::run(&file, format, &disabled),
        Command::SemanticTokens { file, format } => commands::semantic_tokens::run(&file, format),
        Command::Analyze { file } => commands::analyze::run(&file),
        Command::Stats { file, format } => commands::stats::run(&file, format),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "ahk_cli=warn,ahk_core=warn",
        1 => "ahk_cli=debug,ahk_core=debug",
        _ => "ahk_cli=trace,ahk_core=trace",
    }
}
