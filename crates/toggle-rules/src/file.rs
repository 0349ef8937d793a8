use crate::compiler::{CompiledRule, compile_rules};
use crate::definition::RuleFileDefinition;
use crate::error::RuleFileError;
use std::path::{Path, PathBuf};
use toggle_core::RuleRegistry;
use tracing::debug;

/// File name looked up by [`RuleFile::discover`].
pub const CONFIG_FILE_NAME: &str = ".toggle-file.yaml";

#[derive(Debug, Clone, Default)]
/// A compiled rule file.
pub struct RuleFile {
    source: Option<PathBuf>,
    rules: Vec<CompiledRule>,
}

impl RuleFile {
    /// Loads rules from a YAML string.
    pub fn load_from_str(yaml: &str) -> Result<Self, RuleFileError> {
        let definition: RuleFileDefinition = serde_yaml::from_str(yaml)?;
        let rules = compile_rules(&definition)?;
        Ok(Self {
            source: None,
            rules,
        })
    }

    /// Loads rules from a filesystem path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RuleFileError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RuleFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = Self::load_from_str(&yaml)?;
        debug!(path = %path.display(), rules = file.rules.len(), "loaded rule file");
        file.source = Some(path.to_path_buf());
        Ok(file)
    }

    /// Finds the nearest [`CONFIG_FILE_NAME`], starting at `start` and walking up its ancestors.
    ///
    /// `start` may be a file (its directory is searched first) or a directory.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let dir = if start.is_dir() {
            start
        } else {
            start.parent()?
        };
        dir.ancestors()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Where the rules were loaded from (`None` for in-memory sources).
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Compiled rules, in file order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns the number of rules in the file.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the file defines no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Register every rule into `registry`, in file order.
    ///
    /// Same-name rules replace existing ones, including earlier entries of this file.
    pub fn register_into(&self, registry: &mut RuleRegistry) -> Result<(), RuleFileError> {
        for rule in &self.rules {
            registry.insert(rule.to_rule()?);
        }
        Ok(())
    }

    /// Build a fresh registry holding this file's rules.
    pub fn to_registry(&self) -> Result<RuleRegistry, RuleFileError> {
        let mut registry = RuleRegistry::new();
        self.register_into(&mut registry)?;
        Ok(registry)
    }
}
