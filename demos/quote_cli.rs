//! Command-line interface for upholstery_quote
//!
//! Prints a baseline estimate and, if a photo is given, the quality report.

use serde_json::json;
use std::{env, path::{Path, PathBuf}, process};
use tracing_subscriber::EnvFilter;
use upholstery_quote::{
    Estimate, Estimator, PhotoChecker, PhotoReport, PhotoSource, PhotoVerdict, QuoteConfig,
};

#[derive(Default)]
struct Args {
    width: String,
    depth: String,
    fabric: String,
    photo: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = env::args().collect();
    let args = parse_args(&argv);

    let config = match &args.config {
        Some(path) => match QuoteConfig::from_json_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => QuoteConfig::default(),
    };

    let estimator = Estimator::new(config.pricing.clone());
    let estimate = match estimator.estimate_from_text(&args.width, &args.depth, &args.fabric) {
        Ok(estimate) => estimate,
        Err(error) => {
            eprintln!("Estimate failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    };

    let report = args.photo.as_deref().map(|path| check(path, PhotoChecker::new(config.photo_check.clone())));

    print_result(&estimate, report.as_ref());

    if report.is_some_and(|r| !r.allows_submission()) {
        process::exit(2);
    }
}

fn check(path: &Path, checker: PhotoChecker) -> PhotoReport {
    match checker.check(&PhotoSource::from(path)) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("Photo check failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn parse_args(argv: &[String]) -> Args {
    let mut args = Args::default();
    let mut i = 1;
    while i < argv.len() {
        let flag = argv[i].as_str();
        if matches!(flag, "--help" | "-h") {
            print_help(&argv[0]);
            process::exit(0);
        }
        let Some(value) = argv.get(i + 1).cloned() else {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        };
        match flag {
            "--width" => args.width = value,
            "--depth" => args.depth = value,
            "--fabric" => args.fabric = value,
            "--photo" => args.photo = Some(PathBuf::from(value)),
            "--config" => args.config = Some(PathBuf::from(value)),
            _ => {
                eprintln!("Unknown option: {}", flag);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 2;
    }
    args
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS]", program_name);
    eprintln!();
    eprintln!("Estimate an upholstery quote and check the customer's photo.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --width <IN>      Seat width in inches");
    eprintln!("  --depth <IN>      Seat depth in inches");
    eprintln!("  --fabric <GRADE>  standard | premium (default: standard)");
    eprintln!("  --photo <FILE>    Run the photo-quality check on FILE");
    eprintln!("  --config <FILE>   JSON configuration (see generate_config)");
    eprintln!("  --help, -h        Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --width 72 --depth 36", program_name);
    eprintln!("  {} --width 30 --depth 28 --fabric premium --photo chair.jpg", program_name);
}

fn print_result(estimate: &Estimate, report: Option<&PhotoReport>) {
    // JSON to stdout for programmatic use
    let output = json!({
        "estimate": estimate,
        "photo": report,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("{}", estimate.summary());

    if let Some(report) = report {
        eprintln!();
        eprintln!("Photo: {}x{} -> {:?}", report.width, report.height, report.verdict);
        if let Some(metrics) = report.metrics {
            eprintln!(
                "  Brightness: {:.1}  Sharpness: {:.1}",
                metrics.brightness, metrics.sharpness
            );
        }
        for issue in &report.issues {
            eprintln!("  - {}: {}", issue, issue.hint());
        }
        if report.verdict == PhotoVerdict::Unchecked {
            eprintln!("  Warning: pixels could not be read; only resolution was checked.");
        }
    }
}
