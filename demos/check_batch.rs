//! Batch photo-quality check with JSON configuration
//!
//! Checks every supported image in a directory and writes a JSON report

use std::{env, fs, path::{Path, PathBuf}, process};
use tracing_subscriber::EnvFilter;
use upholstery_quote::image_loader::is_supported_extension;
use upholstery_quote::{PhotoChecker, PhotoSource, PhotoVerdict, QuoteConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_help(&args[0]);
        process::exit(1);
    }

    let config_path = Path::new(&args[1]);
    let input_path = Path::new(&args[2]);

    let config = match QuoteConfig::from_json_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    eprintln!("Loaded configuration from {}", config_path.display());

    let image_files = match find_image_files(input_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_path.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to check", image_files.len());
    eprintln!();

    let checker = PhotoChecker::new(config.photo_check);
    let mut accepted = 0;
    let mut rejected = 0;
    let mut unchecked = 0;
    let mut errors = 0;
    let mut reports = serde_json::Map::new();

    for (i, image_path) in image_files.iter().enumerate() {
        let filename = image_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        eprint!("[{}/{}] Checking {}... ", i + 1, image_files.len(), filename);

        match checker.check(&PhotoSource::from(image_path.as_path())) {
            Ok(report) => {
                match report.verdict {
                    PhotoVerdict::Accepted => {
                        eprintln!("accepted");
                        accepted += 1;
                    }
                    PhotoVerdict::Unchecked => {
                        eprintln!("unchecked (pixels unreadable)");
                        unchecked += 1;
                    }
                    PhotoVerdict::Rejected => {
                        eprintln!("rejected");
                        rejected += 1;
                    }
                }

                if env::var("VERBOSE").is_ok() {
                    for issue in &report.issues {
                        eprintln!("  - {}", issue);
                    }
                }

                match serde_json::to_value(&report) {
                    Ok(value) => {
                        reports.insert(filename.to_string(), value);
                    }
                    Err(e) => eprintln!("Warning: could not serialize report: {}", e),
                }
            }
            Err(error) => {
                eprintln!("error: {}", error);
                errors += 1;
            }
        }
    }

    match serde_json::to_string_pretty(&reports) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing reports: {}", e),
    }

    eprintln!();
    eprintln!("Batch check complete:");
    eprintln!("  Accepted: {}", accepted);
    eprintln!("  Rejected: {}", rejected);
    eprintln!("  Unchecked: {}", unchecked);
    eprintln!("  Errors: {}", errors);

    if errors > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <config.json> <image_dir|image_file>", program_name);
    eprintln!();
    eprintln!("Run the photo-quality check over a directory of customer photos.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBOSE=1      Print every issue found");
    eprintln!("  RUST_LOG=debug Show metric details");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} quote.json uploads/", program_name);
    eprintln!("  VERBOSE=1 {} quote.json uploads/sofa.jpg", program_name);
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if dir.is_file() {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(is_supported_extension);
        if path.is_file() && supported {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
