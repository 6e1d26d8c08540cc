use placard_core::chem::ChemicalDatabase;
use placard_core::config::DataConfig;
use placard_core::error::PlacardError;
use placard_core::mapping::SkuMapper;
use placard_core::merge;

use crate::output::table;

pub fn run(config: &DataConfig, overwrite: bool, dry_run: bool) -> Result<(), PlacardError> {
    let db = ChemicalDatabase::load(&config.chemicals_dir())?;
    let mapper = SkuMapper::load(&config.mappings_file())?;

    for skipped in db.skipped() {
        eprintln!(
            "Warning: skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }

    let sku_dir = config.sku_dir();
    let (successful, failed) = merge::sync(&sku_dir, &sku_dir, &db, &mapper, overwrite, dry_run)?;

    table::print_sync_summary(&successful, &failed, dry_run);

    // A batch with partial failures still exits cleanly; only a total
    // failure is an error.
    if successful.is_empty() && !failed.is_empty() {
        return Err(PlacardError::InvalidRecord(format!(
            "sync failed for all {} SKU(s)",
            failed.len()
        )));
    }
    Ok(())
}

pub fn report(config: &DataConfig) -> Result<(), PlacardError> {
    let db = ChemicalDatabase::load(&config.chemicals_dir())?;
    let mapper = SkuMapper::load(&config.mappings_file())?;

    let report = merge::mapping_report(&config.sku_dir(), &db, &mapper)?;
    table::print_mapping_report(&report);
    Ok(())
}
