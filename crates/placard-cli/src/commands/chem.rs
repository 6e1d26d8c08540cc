use placard_core::chem::{ChemicalDatabase, ChemicalRecord};
use placard_core::config::DataConfig;
use placard_core::error::PlacardError;

pub fn list(config: &DataConfig) -> Result<(), PlacardError> {
    let db = ChemicalDatabase::load(&config.chemicals_dir())?;

    if db.is_empty() {
        println!("No chemicals in {}.", config.chemicals_dir().display());
        return Ok(());
    }

    for chemical in db.list_all() {
        let cas = chemical.cas_number.as_deref().unwrap_or("-");
        let flags = match (chemical.hazcom_applicable, chemical.dot_regulated) {
            (true, true) => "GHS DOT",
            (true, false) => "GHS",
            (false, true) => "DOT",
            (false, false) => "",
        };
        println!(
            "  {:<28} {:<32} {:<12} {}",
            chemical.chemical_id, chemical.chemical_name, cas, flags
        );
    }

    for skipped in db.skipped() {
        eprintln!(
            "Warning: skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }
    Ok(())
}

pub fn show(config: &DataConfig, chemical_id: &str) -> Result<(), PlacardError> {
    let db = ChemicalDatabase::load(&config.chemicals_dir())?;
    let chemical = db
        .search(chemical_id)
        .ok_or_else(|| PlacardError::ChemicalNotFound(chemical_id.to_string()))?;

    println!("{}", serde_json::to_string_pretty(chemical)?);
    Ok(())
}

pub fn stub(config: &DataConfig, chemical_id: &str, name: &str) -> Result<(), PlacardError> {
    let mut db = ChemicalDatabase::load(&config.chemicals_dir())?;

    if db.get_by_id(chemical_id).is_some() {
        return Err(PlacardError::InvalidRecord(format!(
            "chemical '{chemical_id}' already exists"
        )));
    }

    let path = db.add(ChemicalRecord::stub(chemical_id, name), &config.chemicals_dir())?;
    println!("Wrote {} -- fill in the hazard data.", path.display());
    Ok(())
}
