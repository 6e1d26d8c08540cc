use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::chem::schema::ChemicalRecord;
use crate::error::PlacardError;

/// A chemical file that failed to parse during database load.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// In-memory database of chemical hazard data, loaded fresh from a
/// directory of `<chemical_id>.json` files at the start of each invocation.
///
/// Indexed by chemical_id (primary), CAS number, and normalized name/alias.
#[derive(Debug, Default)]
pub struct ChemicalDatabase {
    by_id: HashMap<String, ChemicalRecord>,
    by_cas: HashMap<String, String>,
    by_alias: HashMap<String, String>,
    skipped: Vec<SkippedFile>,
}

impl ChemicalDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file under `dir`. Malformed files do not abort
    /// the load; they are recorded in `skipped()` and logged, keeping the
    /// rest of the database available.
    pub fn load(dir: &Path) -> Result<Self, PlacardError> {
        let mut db = Self::new();

        if !dir.exists() {
            return Ok(db);
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
            .collect();
        paths.sort();

        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<ChemicalRecord>(&content).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(chemical) => db.index(chemical),
                Err(reason) => {
                    log::warn!("skipping malformed chemical file {}: {}", path.display(), reason);
                    db.skipped.push(SkippedFile { path, reason });
                }
            }
        }

        Ok(db)
    }

    fn index(&mut self, chemical: ChemicalRecord) {
        let id = chemical.chemical_id.clone();

        if let Some(cas) = &chemical.cas_number {
            self.by_cas.insert(cas.clone(), id.clone());
        }

        for alias in &chemical.aliases {
            self.by_alias.insert(normalize_name(alias), id.clone());
        }
        self.by_alias
            .insert(normalize_name(&chemical.chemical_name), id.clone());

        self.by_id.insert(id, chemical);
    }

    pub fn get_by_id(&self, chemical_id: &str) -> Option<&ChemicalRecord> {
        self.by_id.get(chemical_id)
    }

    pub fn get_by_cas(&self, cas_number: &str) -> Option<&ChemicalRecord> {
        self.by_cas.get(cas_number).and_then(|id| self.by_id.get(id))
    }

    /// Look up by chemical name or alias (normalized match).
    pub fn get_by_name(&self, name: &str) -> Option<&ChemicalRecord> {
        self.by_alias
            .get(&normalize_name(name))
            .and_then(|id| self.by_id.get(id))
    }

    /// Search by any identifier, trying in order: exact id, CAS, name/alias.
    pub fn search(&self, query: &str) -> Option<&ChemicalRecord> {
        self.get_by_id(query)
            .or_else(|| self.get_by_cas(query))
            .or_else(|| self.get_by_name(query))
    }

    /// Add a chemical to the in-memory indexes and write it to `dir` as
    /// `<chemical_id>.json`.
    pub fn add(&mut self, chemical: ChemicalRecord, dir: &Path) -> Result<PathBuf, PlacardError> {
        chemical.validate()?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", chemical.chemical_id));
        let mut json = serde_json::to_string_pretty(&chemical)?;
        json.push('\n');
        std::fs::write(&path, json)?;

        self.index(chemical);
        Ok(path)
    }

    /// All chemicals, sorted by id for stable iteration.
    pub fn list_all(&self) -> Vec<&ChemicalRecord> {
        let mut all: Vec<&ChemicalRecord> = self.by_id.values().collect();
        all.sort_by(|a, b| a.chemical_id.cmp(&b.chemical_id));
        all
    }

    /// Files skipped during the last load.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', '_'], " ")
}
