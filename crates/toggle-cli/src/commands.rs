use crate::error::CliError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use toggle_core::{
    Editor, FileSystem, Labeler, Prompt, RuleRegistry, ToggleCommand, ToggleOutcome,
    check_candidates,
};
use toggle_rules::RuleFile;

#[derive(Debug, Serialize)]
struct CandidateReport {
    path: String,
    rule: String,
    mapper: usize,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct RuleReport<'a> {
    name: &'a str,
    #[serde(rename = "match")]
    pattern: &'a str,
    mappers: usize,
}

/// `switch`: run the toggle command once.
pub fn switch<F, L, E, P>(
    registry: &RuleRegistry,
    fs: F,
    labeler: L,
    editor: &mut E,
    prompt: &mut P,
) -> Result<ToggleOutcome, CliError>
where
    F: FileSystem,
    L: Labeler,
    E: Editor,
    P: Prompt + ?Sized,
{
    let command = ToggleCommand::new(registry, fs, labeler);
    Ok(command.run(editor, prompt)?)
}

/// `candidates`: list existing candidates, or every expanded candidate with `all`.
pub fn candidates<F, W>(
    registry: &RuleRegistry,
    fs: &F,
    path: &Path,
    all: bool,
    json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    F: FileSystem,
    W: Write,
{
    let reports: Vec<CandidateReport> = check_candidates(registry, fs, Some(path))?
        .into_iter()
        .filter(|c| all || c.exists)
        .map(|c| CandidateReport {
            path: c.candidate.path.display().to_string(),
            rule: c.candidate.rule,
            mapper: c.candidate.mapper_index,
            exists: c.exists,
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else if all {
        for r in &reports {
            let state = if r.exists { "exists" } else { "missing" };
            writeln!(out, "{}\t{}#{}\t{}", r.path, r.rule, r.mapper, state)?;
        }
    } else {
        for r in &reports {
            writeln!(out, "{}", r.path)?;
        }
    }
    Ok(())
}

/// `rules`: list the rules of a rule file in registration order.
pub fn rules<W: Write>(file: &RuleFile, json: bool, out: &mut W) -> Result<(), CliError> {
    let registry = file.to_registry()?;
    let reports: Vec<RuleReport> = registry
        .names()
        .filter_map(|name| {
            let rule = file.rules().iter().rev().find(|r| r.name == name)?;
            Some(RuleReport {
                name: rule.name.as_str(),
                pattern: rule.matcher.as_str(),
                mappers: rule.mappers.len(),
            })
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else {
        for r in &reports {
            writeln!(out, "{}\t{}\t{} mapper(s)", r.name, r.pattern, r.mappers)?;
        }
    }
    Ok(())
}
