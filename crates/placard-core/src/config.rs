use std::path::{Path, PathBuf};

/// Locations of the on-disk data the engine works against.
///
/// Constructed once per invocation and passed by reference; nothing in the
/// engine mutates it after construction.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn chemicals_dir(&self) -> PathBuf {
        self.data_dir.join("chemicals")
    }

    pub fn mappings_file(&self) -> PathBuf {
        self.data_dir.join("sku_mappings.json")
    }

    /// Directories searched for `<sku>.json`, in order.
    pub fn sku_dirs(&self) -> Vec<PathBuf> {
        vec![self.data_dir.join("skus"), self.data_dir.join("test_skus")]
    }

    /// Primary directory SKU records are written to.
    pub fn sku_dir(&self) -> PathBuf {
        self.data_dir.join("skus")
    }

    pub fn rooted_at(root: &Path) -> Self {
        Self::new(root.join("data"), root.join("output"))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new("data", "output")
    }
}

/// Fixed company identity printed on every label.
#[derive(Debug, Clone)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Alliance Chemical".to_string(),
            address: "204 Production Dr, Taylor, TX 76574".to_string(),
            phone: "(512) 365-6838".to_string(),
            website: "alliancechemical.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let cfg = DataConfig::new("/tmp/d", "/tmp/o");
        assert_eq!(cfg.chemicals_dir(), PathBuf::from("/tmp/d/chemicals"));
        assert_eq!(cfg.mappings_file(), PathBuf::from("/tmp/d/sku_mappings.json"));
        assert_eq!(cfg.sku_dirs().len(), 2);
    }
}
