mod commands;
mod output;

use clap::{Parser, Subcommand};
use placard_core::config::DataConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "placard",
    version,
    about = "Label generator for packaged chemical products"
)]
struct Cli {
    /// Root of the data directory (chemicals/, skus/, sku_mappings.json)
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a label PDF for one SKU
    Generate {
        sku: String,

        /// Lot number printed on the label and appended to the filename
        #[arg(short, long)]
        lot: Option<String>,

        /// Label style: frame (default), organic or scientific
        #[arg(short, long, default_value = "frame")]
        style: String,

        /// Output directory for the PDF
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
    /// Print a summary of one SKU's label record
    Info { sku: String },
    /// Generate labels for a comma-separated list of SKUs
    Batch {
        /// SKUs, e.g. "AC-IPA-99-55,AC-ACETONE-1G"
        skus: String,

        /// Lot number applied to every label
        #[arg(long)]
        lot_prefix: Option<String>,

        /// Label style: frame (default), organic or scientific
        #[arg(short, long, default_value = "frame")]
        style: String,

        /// Output directory for the PDFs
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
    /// Merge chemical hazard data into every SKU stub
    Sync {
        /// Re-merge records that already carry chemical data
        #[arg(long)]
        overwrite: bool,

        /// Compute everything but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Show mapping status for every SKU stub
    Report,
    /// Manage SKU-to-chemical mappings
    Map {
        #[command(subcommand)]
        action: MapAction,
    },
    /// Manage the chemical database
    Chem {
        #[command(subcommand)]
        action: ChemAction,
    },
}

#[derive(Subcommand)]
enum MapAction {
    /// Add an exact or regex SKU mapping
    Add {
        sku_pattern: String,
        chemical_id: String,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        /// Grade/concentration text overriding the chemical's default
        #[arg(long)]
        grade: Option<String>,

        /// SDS URL overriding the chemical's default
        #[arg(long)]
        sds_url: Option<String>,
    },
    /// Add a prefix rule covering a whole SKU family
    AddPrefix {
        prefix: String,
        chemical_id: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// List all mappings and prefix rules
    List,
    /// List SKU stubs no mapping resolves
    Unmapped,
}

#[derive(Subcommand)]
enum ChemAction {
    /// List all chemicals in the database
    List,
    /// Show one chemical record in full
    Show { chemical_id: String },
    /// Write a skeleton chemical JSON file to fill in
    Stub { chemical_id: String, name: String },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = DataConfig::new(cli.data_dir, "output");

    let result = match cli.command {
        Commands::Generate {
            sku,
            lot,
            style,
            output,
        } => commands::generate::run(&config, &sku, lot.as_deref(), &style, output),
        Commands::Info { sku } => commands::generate::info(&config, &sku),
        Commands::Batch {
            skus,
            lot_prefix,
            style,
            output,
        } => commands::generate::batch(&config, &skus, lot_prefix.as_deref(), &style, output),
        Commands::Sync { overwrite, dry_run } => commands::sync::run(&config, overwrite, dry_run),
        Commands::Report => commands::sync::report(&config),
        Commands::Map { action } => match action {
            MapAction::Add {
                sku_pattern,
                chemical_id,
                regex,
                grade,
                sds_url,
            } => commands::map::add(&config, &sku_pattern, &chemical_id, regex, grade, sds_url),
            MapAction::AddPrefix {
                prefix,
                chemical_id,
                description,
            } => commands::map::add_prefix(&config, &prefix, &chemical_id, description),
            MapAction::List => commands::map::list(&config),
            MapAction::Unmapped => commands::map::unmapped(&config),
        },
        Commands::Chem { action } => match action {
            ChemAction::List => commands::chem::list(&config),
            ChemAction::Show { chemical_id } => commands::chem::show(&config, &chemical_id),
            ChemAction::Stub { chemical_id, name } => {
                commands::chem::stub(&config, &chemical_id, &name)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
