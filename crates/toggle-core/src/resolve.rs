//! Candidate resolution.
//!
//! Given the current file path, every matching rule is expanded through its mappers (rule order,
//! then mapper order) into one flat list, which is then filtered down to paths that exist.
//! Duplicates are kept and nothing is sorted.

use crate::error::ToggleError;
use crate::host::FileSystem;
use crate::registry::RuleRegistry;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A candidate path together with the rule and mapper that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Candidate path.
    pub path: PathBuf,
    /// Name of the rule that produced it.
    pub rule: String,
    /// Position of the producing mapper within the rule.
    pub mapper_index: usize,
}

/// Expand `path` through every matching rule without checking existence.
pub fn expand_candidates(
    registry: &RuleRegistry,
    path: Option<&Path>,
) -> Result<Vec<Candidate>, ToggleError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for rule in registry.matching_rules(Some(path))? {
        let produced = rule.candidates(path)?;
        out.extend(
            produced
                .into_iter()
                .enumerate()
                .map(|(mapper_index, candidate)| Candidate {
                    path: candidate,
                    rule: rule.name().to_string(),
                    mapper_index,
                }),
        );
    }
    Ok(out)
}

/// An expanded candidate and whether it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedCandidate {
    /// The expanded candidate.
    pub candidate: Candidate,
    /// Result of the existence check.
    pub exists: bool,
}

/// Expand `path` and check every candidate for existence, keeping missing ones.
///
/// The first failing existence check aborts the call.
pub fn check_candidates<F>(
    registry: &RuleRegistry,
    fs: &F,
    path: Option<&Path>,
) -> Result<Vec<CheckedCandidate>, ToggleError>
where
    F: FileSystem + ?Sized,
{
    expand_candidates(registry, path)?
        .into_iter()
        .map(|candidate| {
            let exists = fs
                .exists(&candidate.path)
                .map_err(|source| ToggleError::FileSystem {
                    path: candidate.path.clone(),
                    source,
                })?;
            trace!(
                candidate = %candidate.path.display(),
                rule = %candidate.rule,
                exists,
                "checked candidate"
            );
            Ok(CheckedCandidate { candidate, exists })
        })
        .collect()
}

/// Candidates for `path` that exist, in rule order then mapper order.
pub fn resolve_candidates<F>(
    registry: &RuleRegistry,
    fs: &F,
    path: Option<&Path>,
) -> Result<Vec<PathBuf>, ToggleError>
where
    F: FileSystem + ?Sized,
{
    let checked = check_candidates(registry, fs, path)?;
    let total = checked.len();
    let existing: Vec<PathBuf> = checked
        .into_iter()
        .filter(|c| c.exists)
        .map(|c| c.candidate.path)
        .collect();

    debug!(
        expanded = total,
        existing = existing.len(),
        "resolved candidates"
    );
    Ok(existing)
}
