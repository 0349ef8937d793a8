//! `toggle-file` - switch from a file to its related files.
//!
//! # Usage
//!
//! ```bash
//! # Print the related file of foo.c (prompting if there are several)
//! toggle-file switch src/foo.c
//!
//! # Open it in an editor instead of printing it
//! toggle-file switch src/foo.c --open-with "code -r"
//!
//! # Inspect what the rules produce
//! toggle-file candidates src/foo.c --all
//! toggle-file rules --json
//! ```
//!
//! Rules are read from `--rules <file>`, the `TOGGLE_FILE_RULES` environment variable, or the
//! nearest `.toggle-file.yaml` above the file (or the working directory for `rules`).
//!
//! Set `RUST_LOG=toggle_core=trace` (or pass `-v`) to see how rules were evaluated.

mod commands;
mod error;
mod host;
mod prompt;

use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use toggle_core::{OsFileSystem, Prompt, RelativeLabeler, ToggleOutcome};
use toggle_rules::RuleFile;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::CliError;
use crate::host::{CliEditor, Opener};
use crate::prompt::{LinePrompt, TerminalPicker};

#[derive(Parser, Debug)]
#[command(name = "toggle-file")]
#[command(version, about = "Switch from a file to its related files (header, test, ...)")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rule file (YAML)
    #[arg(long, global = true, env = "TOGGLE_FILE_RULES")]
    rules: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Switch to a related file of FILE; prints the chosen path unless --open-with is given
    Switch {
        /// The current file
        file: PathBuf,

        /// Program to open the chosen file with (the path is appended)
        #[arg(long)]
        open_with: Option<String>,
    },
    /// List the related files of FILE that exist
    Candidates {
        /// The current file
        file: PathBuf,

        /// Also list candidates that do not exist, with the rule that produced them
        #[arg(long)]
        all: bool,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// List the loaded rules in the order they are evaluated
    Rules {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("toggle_core=debug,toggle_rules=debug,toggle_file=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Switch { file, open_with } => {
            let opener = Opener::parse(open_with.as_deref())?;
            let rules = load_rules(cli.rules.as_deref(), &file)?;
            let registry = rules.to_registry()?;
            let labeler = RelativeLabeler::from_current_dir()?;
            let mut editor = CliEditor::new(file, opener, io::stdout());
            let mut prompt = interactive_prompt();

            let outcome = commands::switch(
                &registry,
                OsFileSystem,
                labeler,
                &mut editor,
                prompt.as_mut(),
            )?;
            match outcome {
                ToggleOutcome::Opened(path) => debug!(path = %path.display(), "opened"),
                other => debug!(outcome = ?other, "nothing to open"),
            }
            Ok(())
        }
        Command::Candidates { file, all, json } => {
            let rules = load_rules(cli.rules.as_deref(), &file)?;
            let registry = rules.to_registry()?;
            commands::candidates(&registry, &OsFileSystem, &file, all, json, &mut io::stdout())
        }
        Command::Rules { json } => {
            let cwd = std::env::current_dir()?;
            let rules = load_rules(cli.rules.as_deref(), &cwd)?;
            commands::rules(&rules, json, &mut io::stdout())
        }
    }
}

/// `--rules` / `TOGGLE_FILE_RULES` first, then discovery from `near`.
fn load_rules(explicit: Option<&Path>, near: &Path) -> Result<RuleFile, CliError> {
    if let Some(path) = explicit {
        return Ok(RuleFile::load_from_path(path)?);
    }

    let start = if near.is_absolute() {
        near.to_path_buf()
    } else {
        std::env::current_dir()?.join(near)
    };
    let path = RuleFile::discover(&start).ok_or_else(|| CliError::NoRuleFile {
        path: near.to_path_buf(),
    })?;
    Ok(RuleFile::load_from_path(path)?)
}

fn interactive_prompt() -> Box<dyn Prompt> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Box::new(TerminalPicker)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stderr()))
    }
}
