//! Generate a default quote configuration file
//!
//! Creates a JSON config with all default parameters

use std::{env, path::Path, process};
use upholstery_quote::QuoteConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/quote.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = QuoteConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Pricing: labor ${}, standard ${}/yd, premium ${}/yd, min {:.2} yd",
                config.pricing.base_labor,
                config.pricing.fabric_rates.standard,
                config.pricing.fabric_rates.premium,
                config.pricing.min_yards
            );
            eprintln!(
                "  Photo: min {}x{}, brightness {:.0}-{:.0}, sharpness >= {:.1} at {}px",
                config.photo_check.min_width,
                config.photo_check.min_height,
                config.photo_check.min_brightness,
                config.photo_check.max_brightness,
                config.photo_check.min_sharpness,
                config.photo_check.analysis_max_dimension
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
