use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;

use cutplan::{
    CutRequirement, Material, export_plan_csv, load_materials_json, load_materials_toml,
    optimize_materials, read_cuts_csv, render_text,
};

#[derive(Parser)]
#[command(author, version, about = "Exact 1D cutting-stock optimizer", long_about = None)]
struct Args {
    /// Materials file (TOML with a [[materials]] array)
    #[arg(short = 'c', long = "config", default_value = "materials.toml")]
    config: PathBuf,

    /// Materials file in JSON instead of TOML
    #[arg(long = "json", conflicts_with = "config")]
    json: Option<PathBuf>,

    /// Single-material mode: Length,Quantity CSV of required cuts
    #[arg(
        long = "cuts",
        requires = "stock_length",
        requires = "stock_cost",
        conflicts_with = "json"
    )]
    cuts: Option<PathBuf>,

    /// Material name for --cuts mode
    #[arg(long = "name", default_value = "material")]
    name: String,

    /// Stock length for --cuts mode
    #[arg(long = "stock-length")]
    stock_length: Option<f64>,

    /// Cost per stock piece for --cuts mode
    #[arg(long = "stock-cost")]
    stock_cost: Option<f64>,

    /// Saw kerf for --cuts mode
    #[arg(long = "kerf", default_value_t = 0.0)]
    kerf: f64,

    /// Output format for the solved plan
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    format: Format,

    /// Also export one CSV per solved material into this directory
    #[arg(short = 'e', long = "export-dir")]
    export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let materials = load_materials(&args)?;
    if materials.is_empty() {
        bail!("No materials to plan");
    }
    info!("Loaded {} material(s)", materials.len());

    let result = optimize_materials(&materials);

    match args.format {
        Format::Text => print!("{}", render_text(&result)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(ref dir) = args.export_dir {
        for material_result in &result.materials {
            let path = export_plan_csv(material_result, Some(dir))?;
            info!("Plan for '{}' exported to {}", material_result.name, path.display());
        }
    }

    if result.materials.is_empty() {
        for skipped in &result.skipped {
            error!("{}: {}", skipped.name, skipped.reason);
        }
        bail!("No material could be planned");
    }

    Ok(())
}

fn load_materials(args: &Args) -> Result<Vec<Material>> {
    if let Some(ref cuts_path) = args.cuts {
        let required_cuts: Vec<CutRequirement> = read_cuts_csv(cuts_path)
            .with_context(|| format!("Failed to read cuts from {}", cuts_path.display()))?;
        // clap guarantees both values in --cuts mode.
        let material = Material {
            name: args.name.clone(),
            stock_length: args.stock_length.unwrap_or_default(),
            stock_cost: args.stock_cost.unwrap_or_default(),
            saw_kerf: args.kerf,
            required_cuts,
        };
        return Ok(vec![material]);
    }

    if let Some(ref json_path) = args.json {
        return load_materials_json(json_path)
            .with_context(|| format!("Failed to load materials from {}", json_path.display()));
    }

    load_materials_toml(&args.config)
        .with_context(|| format!("Failed to load materials from {}", args.config.display()))
}
