//! Error types for rule evaluation, registration, and the toggle command.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error produced by host-supplied rule logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
/// A failure raised by a user-supplied matcher or mapper.
pub enum RuleError {
    #[error("{0}")]
    /// A plain message.
    Message(String),

    #[error("path is not valid UTF-8: {}", .0.display())]
    /// The rule needs a UTF-8 path and got something else.
    NonUtf8Path(PathBuf),

    #[error("{0}")]
    /// Any other error raised by host code.
    Other(#[from] BoxError),
}

impl RuleError {
    /// Create a [`RuleError::Message`].
    pub fn message(msg: impl Into<String>) -> Self {
        RuleError::Message(msg.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by [`crate::RuleRegistry`] mutations.
pub enum RegistryError {
    #[error("rule '{0}' has no mappers")]
    /// A rule must carry at least one mapper.
    EmptyMappers(String),
}

#[derive(Debug, Error)]
/// Errors surfaced while resolving, selecting, or opening a candidate.
///
/// None of the "nothing to do" situations (no current file, no candidates, a cancelled prompt)
/// are errors; see [`crate::ToggleOutcome`].
pub enum ToggleError {
    #[error("matcher of rule '{rule}' failed: {source}")]
    /// A rule's matcher failed.
    Matcher {
        /// Rule name.
        rule: String,
        /// Underlying failure.
        #[source]
        source: RuleError,
    },

    #[error("mapper #{index} of rule '{rule}' failed: {source}")]
    /// One of a rule's mappers failed.
    Mapper {
        /// Rule name.
        rule: String,
        /// Position of the mapper within the rule (0-based).
        index: usize,
        /// Underlying failure.
        #[source]
        source: RuleError,
    },

    #[error("cannot check '{}': {source}", path.display())]
    /// The existence check for a candidate failed.
    FileSystem {
        /// Candidate being checked.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    #[error("prompt failed: {0}")]
    /// The interactive choice failed (not a cancellation).
    Prompt(#[source] BoxError),

    #[error("selection '{0}' is not one of the offered choices")]
    /// The prompt returned a label that was never offered.
    UnknownChoice(String),

    #[error("cannot open '{}': {source}", path.display())]
    /// The editor refused to open the chosen path.
    Open {
        /// Chosen path.
        path: PathBuf,
        /// Host failure.
        #[source]
        source: BoxError,
    },
}
