use std::path::PathBuf;

use placard_core::config::DataConfig;
use placard_core::error::PlacardError;
use placard_core::layout::LabelStyle;
use placard_core::{generate_label, load_label_record};

pub fn run(
    config: &DataConfig,
    sku: &str,
    lot: Option<&str>,
    style: &str,
    output: PathBuf,
) -> Result<(), PlacardError> {
    let style: LabelStyle = style.parse()?;
    let config = DataConfig::new(config.data_dir.clone(), output);

    let path = generate_label(&config, sku, lot, style)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn info(config: &DataConfig, sku: &str) -> Result<(), PlacardError> {
    let record = load_label_record(config, sku)?;

    println!("{} -- {}", record.sku, record.product_name);
    if let Some(grade) = &record.grade_or_concentration {
        println!("  Grade:        {grade}");
    }
    println!("  Package:      {}", record.package_type.as_str());
    println!(
        "  Contents:     {} ({})",
        record.net_contents_us, record.net_contents_metric
    );
    println!("  UPC:          {}", record.upc_gtin12);
    if let Some(cas) = &record.cas_number {
        println!("  CAS:          {cas}");
    }

    if record.hazcom_applicable {
        let pictograms: Vec<&str> = record.ghs_pictograms.iter().map(|p| p.code()).collect();
        println!("  GHS:          {}", pictograms.join(", "));
        if let Some(signal) = record.signal_word {
            println!("  Signal word:  {signal}");
        }
        println!(
            "  Statements:   {} hazard, {} precautionary",
            record.hazard_statements.len(),
            record.precaution_statements.len()
        );
    } else {
        println!("  GHS:          not applicable");
    }

    if record.dot_regulated {
        println!(
            "  DOT:          {} {} class {} PG {}",
            record.un_number.as_deref().unwrap_or("-"),
            record.proper_shipping_name.as_deref().unwrap_or("-"),
            record.hazard_class.as_deref().unwrap_or("-"),
            record.packing_group.map(|g| g.as_str()).unwrap_or("-"),
        );
    }

    match &record.chemical_id {
        Some(id) => println!("  Chemical:     {id}"),
        None => println!("  Chemical:     (not merged -- run `placard sync`)"),
    }

    Ok(())
}

/// Generate a batch of labels; per-item failures are reported without
/// aborting the rest. Fails only when nothing at all was produced.
pub fn batch(
    config: &DataConfig,
    skus: &str,
    lot_prefix: Option<&str>,
    style: &str,
    output: PathBuf,
) -> Result<(), PlacardError> {
    let style: LabelStyle = style.parse()?;
    let config = DataConfig::new(config.data_dir.clone(), output);

    let mut produced = 0usize;
    let mut failures: Vec<(String, PlacardError)> = Vec::new();

    for sku in skus.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match generate_label(&config, sku, lot_prefix, style) {
            Ok(path) => {
                println!("Wrote {}", path.display());
                produced += 1;
            }
            Err(e) => failures.push((sku.to_string(), e)),
        }
    }

    for (sku, e) in &failures {
        eprintln!("Failed {sku}: {e}");
    }
    println!("{produced} label(s) written, {} failed", failures.len());

    if produced == 0 {
        if let Some((_, e)) = failures.into_iter().next() {
            return Err(e);
        }
    }
    Ok(())
}
