use crate::definition::{MapperDefinition, RuleDefinition, RuleFileDefinition};
use crate::error::RuleFileError;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use toggle_core::{Mapper, Mappers, Matcher, RegistryError, Rule, RuleError};

static VARIABLE_REF: OnceLock<Regex> = OnceLock::new();

fn variable_ref() -> &'static Regex {
    VARIABLE_REF.get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid variable regex"))
}

#[derive(Debug, Clone)]
/// [`Matcher`] testing a regex against the path's string form.
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, RuleFileError> {
        Ok(Self {
            regex: compile_regex(pattern)?,
        })
    }

    /// The regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for RegexMatcher {
    fn matches(&self, path: &Path) -> Result<bool, RuleError> {
        Ok(self.regex.is_match(&path.to_string_lossy()))
    }
}

#[derive(Debug, Clone)]
/// [`Mapper`] replacing the first match of a regex with a template.
///
/// The path must be valid UTF-8, and the regex must match it; otherwise mapping fails.
pub struct RegexMapper {
    regex: Regex,
    template: String,
}

impl RegexMapper {
    /// Compile `pattern` and pair it with `template`.
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, RuleFileError> {
        Ok(Self {
            regex: compile_regex(pattern)?,
            template: template.into(),
        })
    }

    fn with_regex(regex: Regex, template: impl Into<String>) -> Self {
        Self {
            regex,
            template: template.into(),
        }
    }

    /// The replacement template.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Mapper for RegexMapper {
    fn map(&self, path: &Path) -> Result<PathBuf, RuleError> {
        let Some(text) = path.to_str() else {
            return Err(RuleError::NonUtf8Path(path.to_path_buf()));
        };
        if !self.regex.is_match(text) {
            return Err(RuleError::message(format!(
                "pattern '{}' does not match '{}'",
                self.regex.as_str(),
                text
            )));
        }
        let mapped = self.regex.replace(text, self.template.as_str());
        Ok(PathBuf::from(mapped.into_owned()))
    }
}

#[derive(Debug, Clone)]
/// A rule compiled from a rule file, ready to be registered (possibly more than once).
pub struct CompiledRule {
    /// Rule name.
    pub name: String,
    /// Compiled `match` regex.
    pub matcher: RegexMatcher,
    /// Compiled mappers, in declaration order (never empty).
    pub mappers: Vec<RegexMapper>,
}

impl CompiledRule {
    /// Build a registry [`Rule`] from this definition.
    pub fn to_rule(&self) -> Result<Rule, RegistryError> {
        let mappers: Vec<Box<dyn Mapper>> = self
            .mappers
            .iter()
            .cloned()
            .map(|m| Box::new(m) as Box<dyn Mapper>)
            .collect();
        Rule::new(self.name.clone(), self.matcher.clone(), Mappers::many(mappers))
    }
}

/// Compile every rule of a parsed rule file, in file order.
pub fn compile_rules(definition: &RuleFileDefinition) -> Result<Vec<CompiledRule>, RuleFileError> {
    definition
        .rules
        .iter()
        .map(|rule| compile_rule(rule, &definition.variables))
        .collect()
}

fn compile_rule(
    rule: &RuleDefinition,
    variables: &HashMap<String, String>,
) -> Result<CompiledRule, RuleFileError> {
    let entries = rule.map.entries();
    if entries.is_empty() {
        return Err(RegistryError::EmptyMappers(rule.name.clone()).into());
    }

    let match_source = substitute_variables(&rule.pattern, variables)?;
    let matcher = RegexMatcher::new(&match_source)?;

    let mut mappers = Vec::with_capacity(entries.len());
    for entry in entries {
        let mapper = match entry {
            MapperDefinition::Template(template) => {
                RegexMapper::with_regex(matcher.regex.clone(), template.as_str())
            }
            MapperDefinition::Replace { pattern, replace } => {
                let source = substitute_variables(pattern, variables)?;
                RegexMapper::new(&source, replace.as_str())?
            }
        };
        mappers.push(mapper);
    }

    Ok(CompiledRule {
        name: rule.name.clone(),
        matcher,
        mappers,
    })
}

fn compile_regex(pattern: &str) -> Result<Regex, RuleFileError> {
    Regex::new(pattern).map_err(|e| RuleFileError::RegexCompile {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Replace `{{name}}` references with entries from `variables`.
fn substitute_variables(
    text: &str,
    variables: &HashMap<String, String>,
) -> Result<String, RuleFileError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for cap in variable_ref().captures_iter(text) {
        let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let value = variables
            .get(name.as_str())
            .ok_or_else(|| RuleFileError::UnknownVariable(name.as_str().to_string()))?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}
