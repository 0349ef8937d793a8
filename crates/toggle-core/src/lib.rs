#![warn(missing_docs)]
//! Toggle Core - rule-driven alternate-file switching
//!
//! # Overview
//!
//! `toggle-core` relates a file to a set of candidate files (source ↔ header, code ↔ test, ...)
//! and switches to one of the candidates that exists. It is headless: the editor, the prompt UI,
//! and the filesystem are capabilities supplied by the host (see [`host`]).
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────┐
//! │  ToggleCommand           │  current file from the Editor
//! ├──────────────────────────┤
//! │  RuleRegistry            │  rules whose matcher accepts the path
//! ├──────────────────────────┤
//! │  Candidate resolution    │  every mapper of every match, then exists-filter
//! ├──────────────────────────┤
//! │  Selection               │  one → taken, several → Prompt, none → no-op
//! └──────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//! use toggle_core::{
//!     BoxError, Mappers, OsFileSystem, Prompt, RelativeLabeler, RuleRegistry, ToggleCommand,
//!     ToggleOutcome, Workspace, mapper_fn, matcher_fn,
//! };
//!
//! struct NoPrompt;
//! impl Prompt for NoPrompt {
//!     fn choose(&mut self, _: &str, _: &[String]) -> Result<Option<String>, BoxError> {
//!         Ok(None)
//!     }
//! }
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .register(
//!         "c-header",
//!         matcher_fn(|p: &Path| p.extension().is_some_and(|e| e == "c")),
//!         Mappers::one(mapper_fn(|p: &Path| p.with_extension("h"))),
//!     )
//!     .unwrap();
//!
//! let mut workspace = Workspace::new();
//! workspace.open_buffer(Some(PathBuf::from("/nonexistent/foo.c"))).unwrap();
//!
//! let command = ToggleCommand::new(&registry, OsFileSystem, RelativeLabeler::new("/nonexistent"));
//! let outcome = command.run(&mut workspace, &mut NoPrompt).unwrap();
//! assert_eq!(outcome, ToggleOutcome::NoCandidates);
//! ```
//!
//! # Module Description
//!
//! - [`rule`] - matcher/mapper contracts and the [`Rule`] record
//! - [`registry`] - named rule storage
//! - [`resolve`] - candidate expansion and existence filtering
//! - [`select`] - choosing one candidate
//! - [`toggle`] - the toggle command
//! - [`host`] - capabilities supplied by the embedding host
//! - [`workspace`] - an in-memory [`Editor`]

pub mod error;
pub mod host;
pub mod registry;
pub mod resolve;
pub mod rule;
pub mod select;
pub mod toggle;
pub mod workspace;

pub use error::{BoxError, RegistryError, RuleError, ToggleError};
pub use host::{Editor, FileSystem, Labeler, OsFileSystem, Prompt, RelativeLabeler};
pub use registry::RuleRegistry;
pub use resolve::{
    Candidate, CheckedCandidate, check_candidates, expand_candidates, resolve_candidates,
};
pub use rule::{
    FnMapper, FnMatcher, Mapper, Mappers, Matcher, Rule, mapper_fn, matcher_fn, try_mapper_fn,
    try_matcher_fn,
};
pub use select::{Choice, PROMPT_LABEL, build_choices, select_one};
pub use toggle::{ToggleCommand, ToggleOutcome};
pub use workspace::{BufferId, OpenBufferResult, ViewId, Workspace, WorkspaceError};
