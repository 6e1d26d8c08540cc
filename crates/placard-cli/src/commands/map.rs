use placard_core::config::DataConfig;
use placard_core::error::PlacardError;
use placard_core::mapping::{PrefixRule, SkuMapper, SkuMapping};

pub fn add(
    config: &DataConfig,
    sku_pattern: &str,
    chemical_id: &str,
    regex: bool,
    grade: Option<String>,
    sds_url: Option<String>,
) -> Result<(), PlacardError> {
    let mut mapper = SkuMapper::load(&config.mappings_file())?;

    let mut mapping = SkuMapping::exact(sku_pattern, chemical_id);
    mapping.is_regex = regex;
    mapping.grade_override = grade;
    mapping.sds_url_override = sds_url;

    mapper.add_mapping(mapping)?;
    mapper.save(&config.mappings_file())?;

    let kind = if regex { "regex" } else { "exact" };
    println!("Added {kind} mapping {sku_pattern} -> {chemical_id}");
    Ok(())
}

pub fn add_prefix(
    config: &DataConfig,
    prefix: &str,
    chemical_id: &str,
    description: Option<String>,
) -> Result<(), PlacardError> {
    let mut mapper = SkuMapper::load(&config.mappings_file())?;
    mapper.add_prefix_rule(PrefixRule {
        prefix: prefix.to_string(),
        chemical_id: chemical_id.to_string(),
        description,
    });
    mapper.save(&config.mappings_file())?;

    println!("Added prefix rule {prefix}* -> {chemical_id}");
    Ok(())
}

pub fn list(config: &DataConfig) -> Result<(), PlacardError> {
    let mapper = SkuMapper::load(&config.mappings_file())?;

    if mapper.is_empty() && mapper.prefix_rules().is_empty() {
        println!("No mappings defined.");
        return Ok(());
    }

    let explicit = mapper.explicit_mappings();
    if !explicit.is_empty() {
        println!("Exact mappings:");
        for m in explicit {
            print_mapping(m, "  ");
        }
    }

    let regex: Vec<_> = mapper.regex_mappings().collect();
    if !regex.is_empty() {
        println!("Regex mappings:");
        for m in regex {
            print_mapping(m, "  ");
        }
    }

    if !mapper.prefix_rules().is_empty() {
        println!("Prefix rules:");
        for rule in mapper.prefix_rules() {
            match &rule.description {
                Some(desc) => println!("  {}* -> {}  ({desc})", rule.prefix, rule.chemical_id),
                None => println!("  {}* -> {}", rule.prefix, rule.chemical_id),
            }
        }
    }

    Ok(())
}

fn print_mapping(m: &SkuMapping, indent: &str) {
    let mut line = format!("{indent}{} -> {}", m.sku_pattern, m.chemical_id);
    if let Some(grade) = &m.grade_override {
        line.push_str(&format!("  [grade: {grade}]"));
    }
    if m.sds_url_override.is_some() {
        line.push_str("  [sds override]");
    }
    println!("{line}");
}

pub fn unmapped(config: &DataConfig) -> Result<(), PlacardError> {
    let mapper = SkuMapper::load(&config.mappings_file())?;

    let sku_dir = config.sku_dir();
    let mut skus: Vec<String> = Vec::new();
    if sku_dir.exists() {
        for entry in std::fs::read_dir(&sku_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    skus.push(stem.to_string_lossy().into_owned());
                }
            }
        }
    }
    skus.sort();

    let unmapped = mapper.unmapped(&skus);
    if unmapped.is_empty() {
        println!("All {} SKU(s) resolve to a chemical.", skus.len());
    } else {
        println!("{} of {} SKU(s) have no mapping:", unmapped.len(), skus.len());
        for sku in unmapped {
            println!("  {sku}");
        }
    }
    Ok(())
}
