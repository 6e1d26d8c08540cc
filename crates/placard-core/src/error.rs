use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlacardError {
    #[error("SKU data for '{sku}' not found in: {searched}")]
    SkuNotFound { sku: String, searched: String },

    #[error("chemical not found: {0}")]
    ChemicalNotFound(String),

    #[error("failed to load SKU mappings from {path}: {reason}")]
    MappingLoad { path: PathBuf, reason: String },

    #[error("invalid SKU mapping: {0}")]
    MappingInvalid(String),

    #[error("invalid label record: {0}")]
    InvalidRecord(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
