use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or compiling a rule file.
pub enum RuleFileError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot read '{}': {source}", path.display())]
    /// Reading the rule file failed.
    Io {
        /// Rule file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    #[error("unknown variable '{0}'")]
    /// A `{{name}}` reference has no matching entry under `variables`.
    UnknownVariable(String),

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A regex pattern failed to compile.
    RegexCompile {
        /// The regex pattern string (after variable substitution).
        pattern: String,
        /// The compiler error message.
        message: String,
    },

    #[error(transparent)]
    /// A rule could not be registered.
    Registry(#[from] toggle_core::RegistryError),
}
