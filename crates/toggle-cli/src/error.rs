use std::path::PathBuf;
use thiserror::Error;
use toggle_core::ToggleError;
use toggle_rules::RuleFileError;

/// Everything that can make a `toggle-file` invocation fail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no rule file found for '{}' (pass --rules, set TOGGLE_FILE_RULES, or add {})", path.display(), toggle_rules::CONFIG_FILE_NAME)]
    NoRuleFile { path: PathBuf },

    #[error(transparent)]
    Rules(#[from] RuleFileError),

    #[error(transparent)]
    Toggle(#[from] ToggleError),

    #[error("--open-with is empty")]
    EmptyOpenCommand,

    #[error("cannot parse --open-with '{command}': {message}")]
    InvalidOpenCommand { command: String, message: String },

    #[error("'{command}' exited with {status}")]
    OpenCommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
