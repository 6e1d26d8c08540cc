//! Merge SKU stubs with chemical master data into complete label records.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::chem::{ChemicalDatabase, ChemicalRecord};
use crate::error::PlacardError;
use crate::mapping::SkuMapper;

/// Import-only scratch fields stripped from the stub during merge.
const SCRATCH_FIELDS: &[&str] = &["needs_review", "import_notes", "import_size_source"];

/// Hazard/regulatory fields overlaid from the chemical record, replacing
/// whatever placeholder the stub carried.
const CHEMICAL_FIELDS: &[&str] = &[
    "cas_number",
    "hazcom_applicable",
    "ghs_pictograms",
    "signal_word",
    "hazard_statements",
    "precaution_statements",
    "dot_regulated",
    "un_number",
    "proper_shipping_name",
    "hazard_class",
    "packing_group",
    "nfpa_health",
    "nfpa_fire",
    "nfpa_reactivity",
    "nfpa_special",
];

/// Outcome of one SKU's merge during a sync pass. Ephemeral: exists only
/// for reporting, never persisted.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub sku: String,
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub chemical_id: Option<String>,
    /// False when the record was already complete and left untouched.
    pub was_updated: bool,
    pub error: Option<String>,
}

impl MergeResult {
    fn failure(sku: &str, error: String) -> Self {
        Self {
            sku: sku.to_string(),
            success: false,
            output_path: None,
            chemical_id: None,
            was_updated: false,
            error: Some(error),
        }
    }
}

/// Merge a SKU stub with a chemical record into a complete label record.
///
/// Override precedence: `sds_url_override` beats the chemical's own SDS
/// URL; `grade_override` is applied only when present (the stub's own grade
/// is left untouched otherwise). The result is tagged with `_chemical_id`.
pub fn merge_with_chemical(
    stub: &Map<String, Value>,
    chemical: &ChemicalRecord,
    grade_override: Option<&str>,
    sds_url_override: Option<&str>,
) -> Result<Map<String, Value>, PlacardError> {
    let mut merged = stub.clone();

    for field in SCRATCH_FIELDS {
        merged.remove(*field);
    }

    let chemical_value = serde_json::to_value(chemical)?;
    let chemical_map = chemical_value.as_object().ok_or_else(|| {
        PlacardError::InvalidRecord(format!(
            "chemical '{}' did not serialize to a JSON object",
            chemical.chemical_id
        ))
    })?;

    for field in CHEMICAL_FIELDS {
        let value = chemical_map.get(*field).cloned().unwrap_or(Value::Null);
        merged.insert((*field).to_string(), value);
    }

    let sds_url = match sds_url_override {
        Some(url) => Some(url.to_string()),
        None => chemical.sds_url.clone(),
    };
    merged.insert(
        "sds_url".to_string(),
        sds_url.map(Value::String).unwrap_or(Value::Null),
    );

    if let Some(grade) = grade_override {
        merged.insert(
            "grade_or_concentration".to_string(),
            Value::String(grade.to_string()),
        );
    }

    if let Some(family) = &chemical.product_family {
        merged.insert(
            "product_family".to_string(),
            Value::String(family.clone()),
        );
    }

    merged.insert(
        "_chemical_id".to_string(),
        Value::String(chemical.chemical_id.clone()),
    );

    Ok(merged)
}

fn is_complete(stub: &Map<String, Value>) -> Option<String> {
    match stub.get("_chemical_id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        _ => None,
    }
}

/// Sync every SKU stub under `sku_dir` to a complete label record in
/// `output_dir`.
///
/// Records already carrying `_chemical_id` are skipped unless `overwrite`
/// is set (at-most-once-merge guarantee across repeated runs). Resolution
/// failures are collected per item; the batch never aborts. `dry_run`
/// performs the full computation but suppresses writes.
///
/// Stub files are processed in sorted filename order so batch output is
/// reproducible across filesystems.
pub fn sync(
    sku_dir: &Path,
    output_dir: &Path,
    db: &ChemicalDatabase,
    mapper: &SkuMapper,
    overwrite: bool,
    dry_run: bool,
) -> Result<(Vec<MergeResult>, Vec<MergeResult>), PlacardError> {
    let mut successful = Vec::new();
    let mut failed = Vec::new();

    if !sku_dir.exists() {
        return Ok((successful, failed));
    }

    for path in sorted_json_files(sku_dir)? {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let stub: Map<String, Value> = match read_object(&path) {
            Ok(map) => map,
            Err(e) => {
                failed.push(MergeResult::failure(&stem, format!("Failed to read file: {e}")));
                continue;
            }
        };

        let sku = stub
            .get("sku")
            .and_then(Value::as_str)
            .unwrap_or(&stem)
            .to_string();

        if !overwrite {
            if let Some(existing_id) = is_complete(&stub) {
                successful.push(MergeResult {
                    sku,
                    success: true,
                    output_path: Some(path.clone()),
                    chemical_id: Some(existing_id),
                    was_updated: false,
                    error: None,
                });
                continue;
            }
        }

        let Some(mapping) = mapper.resolve(&sku) else {
            failed.push(MergeResult::failure(&sku, "No SKU mapping found".into()));
            continue;
        };

        let Some(chemical) = db.get_by_id(&mapping.chemical_id) else {
            failed.push(MergeResult {
                sku,
                success: false,
                output_path: None,
                chemical_id: Some(mapping.chemical_id.clone()),
                was_updated: false,
                error: Some(format!("Chemical not found: {}", mapping.chemical_id)),
            });
            continue;
        };

        let merged = merge_with_chemical(
            &stub,
            chemical,
            mapping.grade_override.as_deref(),
            mapping.sds_url_override.as_deref(),
        )?;

        let output_path = output_dir.join(format!("{sku}.json"));
        if !dry_run {
            std::fs::create_dir_all(output_dir)?;
            let mut json = serde_json::to_string_pretty(&Value::Object(merged))?;
            json.push('\n');
            std::fs::write(&output_path, json)?;
        }

        successful.push(MergeResult {
            sku,
            success: true,
            output_path: Some(output_path),
            chemical_id: Some(mapping.chemical_id),
            was_updated: true,
            error: None,
        });
    }

    Ok((successful, failed))
}

/// Mapping status for one SKU still missing its chemical.
#[derive(Debug, Clone)]
pub struct SkuChemicalPair {
    pub sku: String,
    pub chemical_id: String,
}

/// Aggregate mapping status across a SKU directory.
#[derive(Debug, Default)]
pub struct MappingReport {
    pub total_skus: usize,
    pub mapped: Vec<SkuChemicalPair>,
    pub unmapped: Vec<String>,
    pub missing_chemical: Vec<SkuChemicalPair>,
    pub complete: Vec<String>,
}

/// Survey every stub under `sku_dir` without modifying anything.
pub fn mapping_report(
    sku_dir: &Path,
    db: &ChemicalDatabase,
    mapper: &SkuMapper,
) -> Result<MappingReport, PlacardError> {
    let mut report = MappingReport::default();

    if !sku_dir.exists() {
        return Ok(report);
    }

    for path in sorted_json_files(sku_dir)? {
        report.total_skus += 1;

        let Ok(stub) = read_object(&path) else {
            continue;
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sku = stub
            .get("sku")
            .and_then(Value::as_str)
            .unwrap_or(&stem)
            .to_string();

        if is_complete(&stub).is_some() {
            report.complete.push(sku);
            continue;
        }

        let Some(mapping) = mapper.resolve(&sku) else {
            report.unmapped.push(sku);
            continue;
        };

        let pair = SkuChemicalPair {
            sku,
            chemical_id: mapping.chemical_id.clone(),
        };
        if db.get_by_id(&mapping.chemical_id).is_some() {
            report.mapped.push(pair);
        } else {
            report.missing_chemical.push(pair);
        }
    }

    Ok(report)
}

fn sorted_json_files(dir: &Path) -> Result<Vec<PathBuf>, PlacardError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();
    Ok(paths)
}

fn read_object(path: &Path) -> Result<Map<String, Value>, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err("expected a JSON object".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{MappingFile, SkuMapper};
    use crate::model::SignalWord;

    fn ipa() -> ChemicalRecord {
        serde_json::from_value(serde_json::json!({
            "chemical_id": "ipa-99",
            "chemical_name": "Isopropyl Alcohol 99%",
            "cas_number": "67-63-0",
            "hazcom_applicable": true,
            "ghs_pictograms": ["GHS02", "GHS07"],
            "signal_word": "Danger",
            "hazard_statements": ["H225: Highly flammable liquid and vapor."],
            "precaution_statements": ["P210: Keep away from heat."],
            "dot_regulated": true,
            "un_number": "UN1219",
            "proper_shipping_name": "Isopropanol",
            "hazard_class": "3",
            "packing_group": "II",
            "sds_url": "https://example.com/sds/ipa-99.pdf",
            "product_family": "solvents"
        }))
        .unwrap()
    }

    fn stub() -> Map<String, Value> {
        serde_json::from_value::<Value>(serde_json::json!({
            "sku": "AC-IPA-99-55",
            "product_name": "Isopropyl Alcohol",
            "package_type": "drum_55gal",
            "net_contents_us": "55 GAL",
            "net_contents_metric": "208.2 L",
            "upc_gtin12": "860001234567",
            "needs_review": true,
            "import_notes": "from shopify export"
        }))
        .unwrap()
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_merge_overlays_hazard_data() {
        let merged = merge_with_chemical(&stub(), &ipa(), None, None).unwrap();
        assert_eq!(merged["hazcom_applicable"], true);
        assert_eq!(merged["signal_word"], "Danger");
        assert_eq!(merged["un_number"], "UN1219");
        assert_eq!(merged["packing_group"], "II");
        assert_eq!(merged["_chemical_id"], "ipa-99");
        assert_eq!(merged["product_family"], "solvents");
        // Commercial fields from the stub survive.
        assert_eq!(merged["product_name"], "Isopropyl Alcohol");
    }

    #[test]
    fn test_merge_strips_scratch_fields() {
        let merged = merge_with_chemical(&stub(), &ipa(), None, None).unwrap();
        assert!(!merged.contains_key("needs_review"));
        assert!(!merged.contains_key("import_notes"));
    }

    #[test]
    fn test_grade_override_applied_only_when_present() {
        let merged = merge_with_chemical(&stub(), &ipa(), Some("99%"), None).unwrap();
        assert_eq!(merged["grade_or_concentration"], "99%");

        let mut s = stub();
        s.insert("grade_or_concentration".into(), Value::String("ACS".into()));
        let merged = merge_with_chemical(&s, &ipa(), None, None).unwrap();
        assert_eq!(merged["grade_or_concentration"], "ACS");
    }

    #[test]
    fn test_sds_url_override_precedence() {
        let merged =
            merge_with_chemical(&stub(), &ipa(), None, Some("https://other/sds.pdf")).unwrap();
        assert_eq!(merged["sds_url"], "https://other/sds.pdf");

        let merged = merge_with_chemical(&stub(), &ipa(), None, None).unwrap();
        assert_eq!(merged["sds_url"], "https://example.com/sds/ipa-99.pdf");
    }

    #[test]
    fn test_merged_record_deserializes_as_label_record() {
        let merged = merge_with_chemical(&stub(), &ipa(), None, None).unwrap();
        let record: crate::model::LabelRecord =
            serde_json::from_value(Value::Object(merged)).unwrap();
        assert_eq!(record.signal_word, Some(SignalWord::Danger));
        assert_eq!(record.chemical_id.as_deref(), Some("ipa-99"));
        assert!(record.validate().is_ok());
    }

    fn setup_dirs(
        stubs: &[(&str, Value)],
        chemicals: &[Value],
        mappings: Value,
    ) -> (tempfile::TempDir, ChemicalDatabase, SkuMapper) {
        let dir = tempfile::tempdir().unwrap();
        let sku_dir = dir.path().join("skus");
        let chem_dir = dir.path().join("chemicals");
        std::fs::create_dir_all(&sku_dir).unwrap();
        std::fs::create_dir_all(&chem_dir).unwrap();

        for (name, body) in stubs {
            std::fs::write(
                sku_dir.join(format!("{name}.json")),
                serde_json::to_string_pretty(body).unwrap(),
            )
            .unwrap();
        }
        for chem in chemicals {
            let id = chem["chemical_id"].as_str().unwrap();
            std::fs::write(
                chem_dir.join(format!("{id}.json")),
                serde_json::to_string_pretty(chem).unwrap(),
            )
            .unwrap();
        }

        let db = ChemicalDatabase::load(&chem_dir).unwrap();
        let file: MappingFile = serde_json::from_value(mappings).unwrap();
        let mapper = SkuMapper::from_file(file).unwrap();
        (dir, db, mapper)
    }

    fn ipa_stub_value() -> Value {
        Value::Object(stub())
    }

    #[test]
    fn test_sync_merges_and_writes() {
        let (dir, db, mapper) = setup_dirs(
            &[("AC-IPA-99-55", ipa_stub_value())],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        let (ok, fail) = sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        assert_eq!(ok.len(), 1);
        assert!(fail.is_empty());
        assert!(ok[0].was_updated);

        let written = read_object(&sku_dir.join("AC-IPA-99-55.json")).unwrap();
        assert_eq!(written["_chemical_id"], "ipa-99");
        assert_eq!(written["signal_word"], "Danger");
    }

    #[test]
    fn test_sync_idempotent_second_run() {
        let (dir, db, mapper) = setup_dirs(
            &[("AC-IPA-99-55", ipa_stub_value())],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        let (first, _) = sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        assert!(first[0].was_updated);

        let (second, fail) = sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        assert!(fail.is_empty());
        assert_eq!(second.len(), 1);
        // Zero additional writes on the second run.
        assert!(!second[0].was_updated);
    }

    #[test]
    fn test_sync_overwrite_remerges() {
        let (dir, db, mapper) = setup_dirs(
            &[("AC-IPA-99-55", ipa_stub_value())],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        let (again, _) = sync(&sku_dir, &sku_dir, &db, &mapper, true, false).unwrap();
        assert!(again[0].was_updated);
    }

    #[test]
    fn test_sync_collects_failures_without_aborting() {
        let (dir, db, mapper) = setup_dirs(
            &[
                ("AC-IPA-99-55", ipa_stub_value()),
                (
                    "AC-MYSTERY-1",
                    serde_json::json!({ "sku": "AC-MYSTERY-1" }),
                ),
                (
                    "AC-GHOST-1",
                    serde_json::json!({ "sku": "AC-GHOST-1" }),
                ),
            ],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" },
                    { "sku_pattern": "AC-GHOST-1", "chemical_id": "does-not-exist" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        let (ok, fail) = sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        assert_eq!(ok.len(), 1);
        assert_eq!(fail.len(), 2);

        let ghost = fail.iter().find(|r| r.sku == "AC-GHOST-1").unwrap();
        assert!(ghost.error.as_ref().unwrap().contains("does-not-exist"));
        let mystery = fail.iter().find(|r| r.sku == "AC-MYSTERY-1").unwrap();
        assert_eq!(mystery.error.as_deref(), Some("No SKU mapping found"));
    }

    #[test]
    fn test_sync_dry_run_writes_nothing() {
        let (dir, db, mapper) = setup_dirs(
            &[("AC-IPA-99-55", ipa_stub_value())],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        let (ok, _) = sync(&sku_dir, &sku_dir, &db, &mapper, false, true).unwrap();
        assert_eq!(ok.len(), 1);
        assert!(ok[0].was_updated);

        let on_disk = read_object(&sku_dir.join("AC-IPA-99-55.json")).unwrap();
        assert!(!on_disk.contains_key("_chemical_id"));
    }

    #[test]
    fn test_prefix_rule_scenario() {
        let (dir, db, mapper) = setup_dirs(
            &[(
                "AC-AMMONIA-25",
                serde_json::json!({
                    "sku": "AC-AMMONIA-25",
                    "product_name": "Ammonium Hydroxide"
                }),
            )],
            &[serde_json::json!({
                "chemical_id": "ammonia-25",
                "chemical_name": "Ammonium Hydroxide 25%"
            })],
            serde_json::json!({
                "prefix_rules": [
                    { "prefix": "AC-AMMONIA", "chemical_id": "ammonia-25" }
                ]
            }),
        );
        let sku_dir = dir.path().join("skus");

        let (ok, fail) = sync(&sku_dir, &sku_dir, &db, &mapper, false, false).unwrap();
        assert!(fail.is_empty());
        assert_eq!(ok[0].chemical_id.as_deref(), Some("ammonia-25"));
    }

    #[test]
    fn test_mapping_report() {
        let (dir, db, mapper) = setup_dirs(
            &[
                ("AC-IPA-99-55", ipa_stub_value()),
                ("AC-MYSTERY-1", serde_json::json!({ "sku": "AC-MYSTERY-1" })),
                (
                    "AC-DONE-1",
                    serde_json::json!({ "sku": "AC-DONE-1", "_chemical_id": "ipa-99" }),
                ),
                ("AC-GHOST-1", serde_json::json!({ "sku": "AC-GHOST-1" })),
            ],
            &[serde_json::to_value(ipa()).unwrap()],
            serde_json::json!({
                "mappings": [
                    { "sku_pattern": "AC-IPA-99-55", "chemical_id": "ipa-99" },
                    { "sku_pattern": "AC-GHOST-1", "chemical_id": "missing" }
                ]
            }),
        );

        let report = mapping_report(&dir.path().join("skus"), &db, &mapper).unwrap();
        assert_eq!(report.total_skus, 4);
        assert_eq!(report.mapped.len(), 1);
        assert_eq!(report.unmapped, vec!["AC-MYSTERY-1"]);
        assert_eq!(report.missing_chemical.len(), 1);
        assert_eq!(report.complete, vec!["AC-DONE-1"]);
    }

    #[test]
    fn test_sync_missing_dir_is_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let db = ChemicalDatabase::new();
        let mapper = SkuMapper::new();
        let (ok, fail) = sync(
            &dir.path().join("nope"),
            &dir.path().join("out"),
            &db,
            &mapper,
            false,
            false,
        )
        .unwrap();
        assert!(ok.is_empty());
        assert!(fail.is_empty());
    }
}
