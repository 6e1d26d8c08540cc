use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlacardError;

/// GHS pictogram identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhsPictogram {
    GHS01,
    GHS02,
    GHS03,
    GHS04,
    GHS05,
    GHS06,
    GHS07,
    GHS08,
    GHS09,
}

impl GhsPictogram {
    pub fn code(&self) -> &'static str {
        match self {
            GhsPictogram::GHS01 => "GHS01",
            GhsPictogram::GHS02 => "GHS02",
            GhsPictogram::GHS03 => "GHS03",
            GhsPictogram::GHS04 => "GHS04",
            GhsPictogram::GHS05 => "GHS05",
            GhsPictogram::GHS06 => "GHS06",
            GhsPictogram::GHS07 => "GHS07",
            GhsPictogram::GHS08 => "GHS08",
            GhsPictogram::GHS09 => "GHS09",
        }
    }

    /// Short caption drawn under the pictogram diamond.
    pub fn caption(&self) -> &'static str {
        match self {
            GhsPictogram::GHS01 => "EXPLOSIVE",
            GhsPictogram::GHS02 => "FLAMMABLE",
            GhsPictogram::GHS03 => "OXIDIZER",
            GhsPictogram::GHS04 => "GAS",
            GhsPictogram::GHS05 => "CORROSIVE",
            GhsPictogram::GHS06 => "TOXIC",
            GhsPictogram::GHS07 => "IRRITANT",
            GhsPictogram::GHS08 => "HEALTH",
            GhsPictogram::GHS09 => "ENVIRONMENT",
        }
    }
}

impl fmt::Display for GhsPictogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// GHS signal words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalWord {
    Danger,
    Warning,
}

impl SignalWord {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalWord::Danger => "Danger",
            SignalWord::Warning => "Warning",
        }
    }
}

impl fmt::Display for SignalWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DOT packing groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingGroup {
    I,
    II,
    III,
}

impl PackingGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackingGroup::I => "I",
            PackingGroup::II => "II",
            PackingGroup::III => "III",
        }
    }
}

/// Package type identifiers matching the JSON data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    #[serde(rename = "quart_1")]
    Quart1,
    #[serde(rename = "gallon_1")]
    Gallon1,
    #[serde(rename = "gallon_2.5")]
    Gallon2_5,
    #[serde(rename = "gallon_5")]
    Gallon5,
    #[serde(rename = "drum_55gal")]
    Drum55Gal,
    #[serde(rename = "tote_275gal")]
    Tote275Gal,
    #[serde(rename = "tote_330gal")]
    Tote330Gal,
    #[serde(rename = "bag_25lb")]
    Bag25Lb,
    #[serde(rename = "bag_50lb")]
    Bag50Lb,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Quart1 => "quart_1",
            PackageType::Gallon1 => "gallon_1",
            PackageType::Gallon2_5 => "gallon_2.5",
            PackageType::Gallon5 => "gallon_5",
            PackageType::Drum55Gal => "drum_55gal",
            PackageType::Tote275Gal => "tote_275gal",
            PackageType::Tote330Gal => "tote_330gal",
            PackageType::Bag25Lb => "bag_25lb",
            PackageType::Bag50Lb => "bag_50lb",
        }
    }
}

fn default_chemtel() -> String {
    "1-800-255-3924".to_string()
}

/// Complete data for one product SKU label.
///
/// Freshly imported stubs carry only the commercial fields; the merge engine
/// fills in the hazard blocks and tags the record with `_chemical_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRecord {
    pub sku: String,
    pub product_name: String,
    #[serde(default)]
    pub grade_or_concentration: Option<String>,
    pub package_type: PackageType,
    pub net_contents_us: String,
    pub net_contents_metric: String,
    #[serde(default)]
    pub cas_number: Option<String>,
    pub upc_gtin12: String,

    // GHS/HazCom
    #[serde(default)]
    pub hazcom_applicable: bool,
    #[serde(default)]
    pub ghs_pictograms: Vec<GhsPictogram>,
    #[serde(default)]
    pub signal_word: Option<SignalWord>,
    #[serde(default)]
    pub hazard_statements: Vec<String>,
    #[serde(default)]
    pub precaution_statements: Vec<String>,

    // DOT shipping
    #[serde(default)]
    pub dot_regulated: bool,
    #[serde(default)]
    pub un_number: Option<String>,
    #[serde(default)]
    pub proper_shipping_name: Option<String>,
    #[serde(default)]
    pub hazard_class: Option<String>,
    #[serde(default)]
    pub packing_group: Option<PackingGroup>,

    // NFPA 704
    #[serde(default)]
    pub nfpa_health: Option<u8>,
    #[serde(default)]
    pub nfpa_fire: Option<u8>,
    #[serde(default)]
    pub nfpa_reactivity: Option<u8>,
    #[serde(default)]
    pub nfpa_special: Option<String>,

    #[serde(default)]
    pub sds_url: Option<String>,
    #[serde(default)]
    pub product_family: Option<String>,

    #[serde(default = "default_chemtel")]
    pub chemtel_number: String,

    /// Assigned at render time, not stored in the SKU file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    /// Merge idempotency marker: set once hazard data has been merged in.
    #[serde(rename = "_chemical_id", default, skip_serializing_if = "Option::is_none")]
    pub chemical_id: Option<String>,
}

impl LabelRecord {
    /// Check that the record satisfies basic field constraints.
    pub fn validate(&self) -> Result<(), PlacardError> {
        if self.upc_gtin12.len() != 12 || !self.upc_gtin12.chars().all(|c| c.is_ascii_digit()) {
            return Err(PlacardError::InvalidRecord(format!(
                "upc_gtin12 must be exactly 12 digits, got '{}'",
                self.upc_gtin12
            )));
        }

        for (name, rating) in [
            ("nfpa_health", self.nfpa_health),
            ("nfpa_fire", self.nfpa_fire),
            ("nfpa_reactivity", self.nfpa_reactivity),
        ] {
            if let Some(r) = rating {
                if r > 4 {
                    return Err(PlacardError::InvalidRecord(format!(
                        "{} must be in 0..=4, got {}",
                        name, r
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn has_nfpa(&self) -> bool {
        self.nfpa_health.is_some() || self.nfpa_fire.is_some() || self.nfpa_reactivity.is_some()
    }
}
