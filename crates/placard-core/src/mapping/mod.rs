pub mod schema;

pub use schema::{MappingFile, PrefixRule, SkuMapping};

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::error::PlacardError;

/// Resolves SKUs to chemicals via three ordered strategies, first match
/// wins: exact mapping, regex mapping (insertion order), prefix rule
/// (insertion order). Explicit mappings always beat generic rules, and
/// regex is checked before the blunter prefix rules so operators can add
/// precise exceptions without restructuring prefix rules.
#[derive(Debug, Default)]
pub struct SkuMapper {
    explicit: HashMap<String, SkuMapping>,
    /// Regex mappings with their compiled, prefix-anchored patterns.
    regex: Vec<(Regex, SkuMapping)>,
    prefix_rules: Vec<PrefixRule>,
}

impl SkuMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load mappings from a JSON file. A missing file is an empty mapper.
    /// Malformed regex patterns fail here, at load time, rather than on
    /// every lookup.
    pub fn load(path: &Path) -> Result<Self, PlacardError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| PlacardError::MappingLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let file: MappingFile =
            serde_json::from_str(&content).map_err(|e| PlacardError::MappingLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_file(file)
    }

    pub fn from_file(file: MappingFile) -> Result<Self, PlacardError> {
        let mut mapper = Self::new();
        for mapping in file.mappings {
            mapper.add_mapping(mapping)?;
        }
        for rule in file.prefix_rules {
            mapper.add_prefix_rule(rule);
        }
        Ok(mapper)
    }

    /// Add an explicit or regex mapping. Regex patterns are compiled
    /// immediately; invalid ones are rejected.
    pub fn add_mapping(&mut self, mapping: SkuMapping) -> Result<(), PlacardError> {
        if mapping.is_regex {
            let compiled = compile_prefix_anchored(&mapping.sku_pattern)?;
            self.regex.push((compiled, mapping));
        } else {
            self.explicit.insert(mapping.sku_pattern.clone(), mapping);
        }
        Ok(())
    }

    pub fn add_prefix_rule(&mut self, rule: PrefixRule) {
        self.prefix_rules.push(rule);
    }

    /// Find the mapping for a SKU, or None if no tier matches. A prefix
    /// rule hit synthesizes an implicit mapping with no overrides.
    pub fn resolve(&self, sku: &str) -> Option<SkuMapping> {
        if let Some(mapping) = self.explicit.get(sku) {
            return Some(mapping.clone());
        }

        for (pattern, mapping) in &self.regex {
            if pattern.is_match(sku) {
                return Some(mapping.clone());
            }
        }

        for rule in &self.prefix_rules {
            if sku.starts_with(&rule.prefix) {
                return Some(SkuMapping::exact(sku, &rule.chemical_id));
            }
        }

        None
    }

    /// The chemical_id for a SKU, if mapped.
    pub fn chemical_id(&self, sku: &str) -> Option<String> {
        self.resolve(sku).map(|m| m.chemical_id)
    }

    /// SKUs from the given list that no tier matches.
    pub fn unmapped(&self, skus: &[String]) -> Vec<String> {
        skus.iter()
            .filter(|sku| self.resolve(sku).is_none())
            .cloned()
            .collect()
    }

    /// Write the current mappings back to `path`.
    pub fn save(&self, path: &Path) -> Result<(), PlacardError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut mappings: Vec<SkuMapping> = self.explicit.values().cloned().collect();
        mappings.sort_by(|a, b| a.sku_pattern.cmp(&b.sku_pattern));
        mappings.extend(self.regex.iter().map(|(_, m)| m.clone()));

        let file = MappingFile {
            mappings,
            prefix_rules: self.prefix_rules.clone(),
        };

        let mut json = serde_json::to_string_pretty(&file)?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.explicit.len() + self.regex.len() + self.prefix_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn explicit_mappings(&self) -> Vec<&SkuMapping> {
        let mut all: Vec<&SkuMapping> = self.explicit.values().collect();
        all.sort_by(|a, b| a.sku_pattern.cmp(&b.sku_pattern));
        all
    }

    pub fn regex_mappings(&self) -> impl Iterator<Item = &SkuMapping> {
        self.regex.iter().map(|(_, m)| m)
    }

    pub fn prefix_rules(&self) -> &[PrefixRule] {
        &self.prefix_rules
    }
}

/// Compile a mapping pattern with match-at-start semantics: the pattern may
/// match a proper prefix of the SKU. "AC-IPA" therefore matches
/// "AC-IPA-ANYTHING"; authors who want a full match must anchor with `$`.
fn compile_prefix_anchored(pattern: &str) -> Result<Regex, PlacardError> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
        PlacardError::MappingInvalid(format!("bad regex pattern '{pattern}': {e}"))
    })
}
