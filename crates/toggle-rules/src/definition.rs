use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Raw YAML rule file.
pub struct RuleFileDefinition {
    #[serde(default)]
    /// Regex fragments substituted into patterns as `{{name}}`.
    pub variables: HashMap<String, String>,

    #[serde(default)]
    /// Rules, registered in file order.
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single rule entry.
pub struct RuleDefinition {
    /// Rule name (later entries with the same name replace earlier ones).
    pub name: String,

    #[serde(rename = "match")]
    /// Regex deciding whether the rule applies to a path.
    pub pattern: String,

    /// Candidate mappers.
    pub map: MapDefinition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// `map:` field of a rule.
pub enum MapDefinition {
    /// Mappers applied in order.
    Many(Vec<MapperDefinition>),
    /// A single mapper.
    One(MapperDefinition),
}

impl MapDefinition {
    /// Mappers in declaration order.
    pub fn entries(&self) -> &[MapperDefinition] {
        match self {
            MapDefinition::One(one) => std::slice::from_ref(one),
            MapDefinition::Many(many) => many,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// A single mapper entry.
pub enum MapperDefinition {
    /// Replacement template expanded against the rule's `match` regex.
    Template(String),
    /// Replacement with its own regex.
    Replace {
        /// Regex to replace.
        pattern: String,
        /// Replacement template (`$1`, `${name}`).
        replace: String,
    },
}
