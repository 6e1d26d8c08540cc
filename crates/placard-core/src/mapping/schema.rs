use serde::{Deserialize, Serialize};

/// Mapping from a SKU pattern to a chemical, with optional per-SKU
/// overrides that take precedence during merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuMapping {
    /// Exact SKU, or a regex when `is_regex` is set.
    pub sku_pattern: String,
    pub chemical_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sds_url_override: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_regex: bool,
}

impl SkuMapping {
    pub fn exact(sku: &str, chemical_id: &str) -> Self {
        Self {
            sku_pattern: sku.to_string(),
            chemical_id: chemical_id.to_string(),
            grade_override: None,
            sds_url_override: None,
            is_regex: false,
        }
    }
}

/// Rule mapping every SKU with a literal prefix to one chemical, e.g.
/// "AC-IPA-" -> "isopropyl-alcohol". Carries no overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixRule {
    pub prefix: String,
    pub chemical_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// On-disk shape of the mapping file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingFile {
    #[serde(default)]
    pub mappings: Vec<SkuMapping>,
    #[serde(default)]
    pub prefix_rules: Vec<PrefixRule>,
}
