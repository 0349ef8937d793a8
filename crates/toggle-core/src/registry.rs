//! Named rule storage.
//!
//! [`RuleRegistry`] is an ordinary value owned by the host session; there is no process-wide
//! registry. Iteration order is registration order. Registering a rule under an existing name
//! removes the old rule and appends the new one, so the replacement moves to the end.

use crate::error::{RegistryError, ToggleError};
use crate::rule::{Mappers, Matcher, Rule};
use std::path::Path;
use tracing::{debug, trace};

/// An ordered collection of [`Rule`]s keyed by name.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build and register a rule.
    ///
    /// A single mapper and a list of mappers are both accepted (see [`Mappers`]). If a rule
    /// with the same name exists it is replaced and returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        matcher: impl Matcher + 'static,
        mappers: impl Into<Mappers>,
    ) -> Result<Option<Rule>, RegistryError> {
        let rule = Rule::new(name, matcher, mappers)?;
        Ok(self.insert(rule))
    }

    /// Register an already built rule, returning the rule it replaced (if any).
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        let replaced = self.unregister(rule.name());
        debug!(
            rule = rule.name(),
            mappers = rule.mapper_count(),
            replaced = replaced.is_some(),
            "registered rule"
        );
        self.rules.push(rule);
        replaced
    }

    /// Remove a rule by name.
    pub fn unregister(&mut self, name: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|r| r.name() == name)?;
        Some(self.rules.remove(index))
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Returns `true` if a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rule names, in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    /// All rules, in registry order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rules whose matcher accepts `path`, in registry order.
    ///
    /// `None` (no file behind the current view) matches nothing and evaluates no matcher.
    /// The first failing matcher aborts the whole call.
    pub fn matching_rules(&self, path: Option<&Path>) -> Result<Vec<&Rule>, ToggleError> {
        let Some(path) = path else {
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for rule in &self.rules {
            if rule.matches(path)? {
                trace!(rule = rule.name(), path = %path.display(), "rule matched");
                matched.push(rule);
            }
        }
        Ok(matched)
    }
}
