use placard_core::merge::{MappingReport, MergeResult};

/// Cap on the per-item failure list; the aggregate counts always print.
const MAX_FAILURES_SHOWN: usize = 20;

pub fn print_sync_summary(successful: &[MergeResult], failed: &[MergeResult], dry_run: bool) {
    let updated = successful.iter().filter(|r| r.was_updated).count();
    let skipped = successful.len() - updated;

    if dry_run {
        println!("Dry run -- nothing written.");
    }
    println!(
        "{} merged, {} already complete, {} failed",
        updated,
        skipped,
        failed.len()
    );

    for result in successful.iter().filter(|r| r.was_updated) {
        let chemical = result.chemical_id.as_deref().unwrap_or("?");
        println!("  {} <- {}", result.sku, chemical);
    }

    if !failed.is_empty() {
        println!();
        for result in failed.iter().take(MAX_FAILURES_SHOWN) {
            println!(
                "  FAILED {}: {}",
                result.sku,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        if failed.len() > MAX_FAILURES_SHOWN {
            println!("  ... and {} more", failed.len() - MAX_FAILURES_SHOWN);
        }
    }
}

pub fn print_mapping_report(report: &MappingReport) {
    println!("{} SKU stub(s) surveyed", report.total_skus);
    println!("  {:<20} {}", "complete:", report.complete.len());
    println!("  {:<20} {}", "ready to merge:", report.mapped.len());
    println!("  {:<20} {}", "unmapped:", report.unmapped.len());
    println!("  {:<20} {}", "missing chemical:", report.missing_chemical.len());

    if !report.unmapped.is_empty() {
        println!("\nUnmapped SKUs:");
        for sku in &report.unmapped {
            println!("  {sku}");
        }
    }

    if !report.missing_chemical.is_empty() {
        println!("\nMapped to a chemical that does not exist:");
        for pair in &report.missing_chemical {
            println!("  {} -> {}", pair.sku, pair.chemical_id);
        }
    }
}
