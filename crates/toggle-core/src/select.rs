//! Picking one path out of the resolved candidates.
//!
//! Zero candidates select nothing, one candidate is taken as-is, and several are offered through
//! the host [`Prompt`]. Labels shown to the user are paired with the full path they came from,
//! so the answer maps back to exactly one candidate.

use crate::error::ToggleError;
use crate::host::{Labeler, Prompt};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::debug;

/// Label passed to [`Prompt::choose`].
pub const PROMPT_LABEL: &str = "Switch to";

/// A prompt entry: what the user sees, and the path behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display label (unique within one prompt).
    pub label: String,
    /// Full candidate path.
    pub path: PathBuf,
}

/// Build unique `(label, path)` pairs for `candidates`.
///
/// Repeated paths are offered once. Distinct paths sharing a label are all shown in full; if
/// full paths still collide (lossy display of non UTF-8 names), a `<n>` suffix is appended,
/// skipping any `n` that would produce a label already in use.
pub fn build_choices<L>(candidates: &[PathBuf], labeler: &L) -> Vec<Choice>
where
    L: Labeler + ?Sized,
{
    let mut choices: Vec<Choice> = Vec::with_capacity(candidates.len());
    for path in candidates {
        if choices.iter().any(|c| &c.path == path) {
            continue;
        }
        choices.push(Choice {
            label: labeler.label(path),
            path: path.clone(),
        });
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for choice in &choices {
        *counts.entry(choice.label.clone()).or_default() += 1;
    }
    for choice in &mut choices {
        if counts[&choice.label] > 1 {
            choice.label = choice.path.display().to_string();
        }
    }

    let mut taken: HashSet<String> = choices.iter().map(|c| c.label.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    for choice in &mut choices {
        if seen.insert(choice.label.clone()) {
            continue;
        }
        let label = (2..)
            .map(|n| format!("{}<{}>", choice.label, n))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default();
        taken.insert(label.clone());
        seen.insert(label.clone());
        choice.label = label;
    }

    choices
}

/// Pick a single path from `candidates`.
///
/// The prompt is only consulted when there is more than one candidate. `Ok(None)` means there
/// was nothing to pick or the user cancelled.
pub fn select_one<L, P>(
    candidates: &[PathBuf],
    labeler: &L,
    prompt: &mut P,
) -> Result<Option<PathBuf>, ToggleError>
where
    L: Labeler + ?Sized,
    P: Prompt + ?Sized,
{
    match candidates {
        [] => Ok(None),
        [only] => Ok(Some(only.clone())),
        _ => {
            let choices = build_choices(candidates, labeler);
            let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
            let Some(answer) = prompt
                .choose(PROMPT_LABEL, &labels)
                .map_err(ToggleError::Prompt)?
            else {
                debug!(offered = labels.len(), "selection cancelled");
                return Ok(None);
            };

            choices
                .into_iter()
                .find(|c| c.label == answer)
                .map(|c| Some(c.path))
                .ok_or(ToggleError::UnknownChoice(answer))
        }
    }
}
