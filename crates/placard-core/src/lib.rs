//! Label generation engine for packaged chemical products.
//!
//! The crate covers the full pipeline: SKU records on disk, a chemical
//! hazard database, SKU-to-chemical mapping and merge, text fitting, and a
//! vector label renderer with a PDF backend. The `placard` CLI in the
//! sibling crate is a thin wrapper over this API.

pub mod chem;
pub mod config;
pub mod error;
pub mod fit;
pub mod layout;
pub mod mapping;
pub mod merge;
pub mod model;

use std::path::PathBuf;

use config::{CompanyInfo, DataConfig};
use error::PlacardError;
use fit::CoreFontMetrics;
use layout::{LabelRenderer, LabelStyle, PdfCanvas};
use model::LabelRecord;

/// Load the record for `sku`, searching the configured SKU directories in
/// order. Missing SKU data is a hard error naming every directory searched.
pub fn load_label_record(config: &DataConfig, sku: &str) -> Result<LabelRecord, PlacardError> {
    let filename = format!("{sku}.json");
    let searched = config.sku_dirs();

    for dir in &searched {
        let path = dir.join(&filename);
        if path.is_file() {
            let data = std::fs::read_to_string(&path)?;
            let record: LabelRecord = serde_json::from_str(&data)?;
            return Ok(record);
        }
    }

    Err(PlacardError::SkuNotFound {
        sku: sku.to_string(),
        searched: searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Render one label PDF for `sku` into the configured output directory.
/// Returns the path of the written file, named `<sku>-<lot>.pdf` (or
/// `<sku>.pdf` without a lot number).
pub fn generate_label(
    config: &DataConfig,
    sku: &str,
    lot: Option<&str>,
    style: LabelStyle,
) -> Result<PathBuf, PlacardError> {
    let mut record = load_label_record(config, sku)?;
    record.lot_number = lot.map(str::to_string);

    let metrics = CoreFontMetrics::new();
    let renderer = LabelRenderer::new(style.preset(), &metrics).with_company(CompanyInfo::default());

    let mut canvas = PdfCanvas::new();
    renderer.render(&record, &mut canvas)?;

    std::fs::create_dir_all(&config.output_dir)?;
    let filename = match lot {
        Some(lot) => format!("{sku}-{lot}.pdf"),
        None => format!("{sku}.pdf"),
    };
    let path = config.output_dir.join(filename);
    canvas.save(&path)?;

    log::info!("wrote {} ({} style)", path.display(), style.as_str());
    Ok(path)
}
