//! The toggle command: current file → candidates → choice → open.

use crate::error::ToggleError;
use crate::host::{Editor, FileSystem, Labeler, Prompt};
use crate::registry::RuleRegistry;
use crate::resolve::resolve_candidates;
use crate::select::select_one;
use std::path::PathBuf;
use tracing::debug;

/// What a toggle invocation did.
///
/// Every variant is a successful run; only [`ToggleOutcome::Opened`] has a visible effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The active view has no file behind it.
    NoCurrentFile,
    /// No rule produced an existing candidate.
    NoCandidates,
    /// Several candidates were offered and the user cancelled.
    Cancelled,
    /// The editor was asked to open this path.
    Opened(PathBuf),
}

/// Switches the editor from the current file to one of its related files.
///
/// The command borrows the session's [`RuleRegistry`] and owns the filesystem and labeling
/// capabilities; the editor and prompt are passed per invocation. No state is carried from one
/// run to the next.
#[derive(Debug)]
pub struct ToggleCommand<'a, F, L> {
    registry: &'a RuleRegistry,
    fs: F,
    labeler: L,
}

impl<'a, F, L> ToggleCommand<'a, F, L>
where
    F: FileSystem,
    L: Labeler,
{
    /// Create a command over `registry`.
    pub fn new(registry: &'a RuleRegistry, fs: F, labeler: L) -> Self {
        Self {
            registry,
            fs,
            labeler,
        }
    }

    /// The registry this command resolves against.
    pub fn registry(&self) -> &RuleRegistry {
        self.registry
    }

    /// Run the command once.
    pub fn run<E, P>(&self, editor: &mut E, prompt: &mut P) -> Result<ToggleOutcome, ToggleError>
    where
        E: Editor + ?Sized,
        P: Prompt + ?Sized,
    {
        let Some(current) = editor.current_file_path() else {
            debug!("no file behind the active view");
            return Ok(ToggleOutcome::NoCurrentFile);
        };

        let candidates = resolve_candidates(self.registry, &self.fs, Some(current.as_path()))?;
        if candidates.is_empty() {
            debug!(path = %current.display(), "no existing candidates");
            return Ok(ToggleOutcome::NoCandidates);
        }

        let Some(chosen) = select_one(&candidates, &self.labeler, prompt)? else {
            return Ok(ToggleOutcome::Cancelled);
        };

        editor
            .open_path(&chosen)
            .map_err(|source| ToggleError::Open {
                path: chosen.clone(),
                source,
            })?;
        debug!(from = %current.display(), to = %chosen.display(), "switched file");
        Ok(ToggleOutcome::Opened(chosen))
    }
}
