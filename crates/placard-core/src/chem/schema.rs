use serde::{Deserialize, Serialize};

use crate::error::PlacardError;
use crate::model::{GhsPictogram, PackingGroup, SignalWord};

/// Master hazard/regulatory record for one chemical substance, independent
/// of packaging. One JSON file per chemical under the chemicals directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalRecord {
    /// Stable slug, e.g. "isopropyl-alcohol-99".
    pub chemical_id: String,
    pub chemical_name: String,
    #[serde(default)]
    pub cas_number: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Used only for cosmetic label styling.
    #[serde(default)]
    pub product_family: Option<String>,

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
}

impl ChemicalRecord {
    /// Skeleton record with everything defaulted, for `chem stub`.
    pub fn stub(chemical_id: &str, chemical_name: &str) -> Self {
        Self {
            chemical_id: chemical_id.to_string(),
            chemical_name: chemical_name.to_string(),
            cas_number: None,
            aliases: Vec::new(),
            product_family: None,
            hazcom_applicable: false,
            ghs_pictograms: Vec::new(),
            signal_word: None,
            hazard_statements: Vec::new(),
            precaution_statements: Vec::new(),
            dot_regulated: false,
            un_number: None,
            proper_shipping_name: None,
            hazard_class: None,
            packing_group: None,
            nfpa_health: None,
            nfpa_fire: None,
            nfpa_reactivity: None,
            nfpa_special: None,
            sds_url: None,
        }
    }

    /// Enforce the record invariants: a chemical with HazCom not applicable
    /// must carry no GHS content, and one that is not DOT regulated must
    /// carry no shipping fields.
    pub fn validate(&self) -> Result<(), PlacardError> {
        if self.chemical_id.is_empty() {
            return Err(PlacardError::InvalidRecord(
                "chemical_id must not be empty".into(),
            ));
        }

        if !self.hazcom_applicable
            && (!self.ghs_pictograms.is_empty()
                || self.signal_word.is_some()
                || !self.hazard_statements.is_empty()
                || !self.precaution_statements.is_empty())
        {
            return Err(PlacardError::InvalidRecord(format!(
                "'{}' has hazcom_applicable=false but carries GHS data",
                self.chemical_id
            )));
        }

        if !self.dot_regulated
            && (self.un_number.is_some()
                || self.proper_shipping_name.is_some()
                || self.hazard_class.is_some()
                || self.packing_group.is_some())
        {
            return Err(PlacardError::InvalidRecord(format!(
                "'{}' has dot_regulated=false but carries DOT fields",
                self.chemical_id
            )));
        }

        for rating in [self.nfpa_health, self.nfpa_fire, self.nfpa_reactivity]
            .into_iter()
            .flatten()
        {
            if rating > 4 {
                return Err(PlacardError::InvalidRecord(format!(
                    "'{}' has NFPA rating {} outside 0..=4",
                    self.chemical_id, rating
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_is_valid() {
        let c = ChemicalRecord::stub("ipa-99", "Isopropyl Alcohol 99%");
        assert!(c.validate().is_ok());
        assert!(!c.hazcom_applicable);
    }

    #[test]
    fn test_ghs_data_without_hazcom_rejected() {
        let mut c = ChemicalRecord::stub("ipa-99", "Isopropyl Alcohol 99%");
        c.signal_word = Some(SignalWord::Danger);
        assert!(c.validate().is_err());
        c.hazcom_applicable = true;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_dot_fields_without_regulated_rejected() {
        let mut c = ChemicalRecord::stub("ipa-99", "Isopropyl Alcohol 99%");
        c.un_number = Some("UN1219".into());
        assert!(c.validate().is_err());
        c.dot_regulated = true;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_nfpa_out_of_range_rejected() {
        let mut c = ChemicalRecord::stub("ipa-99", "Isopropyl Alcohol 99%");
        c.nfpa_fire = Some(9);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal() {
        let c: ChemicalRecord = serde_json::from_str(
            r#"{ "chemical_id": "ammonia-25", "chemical_name": "Ammonium Hydroxide 25%" }"#,
        )
        .unwrap();
        assert_eq!(c.chemical_id, "ammonia-25");
        assert!(c.aliases.is_empty());
    }
}
