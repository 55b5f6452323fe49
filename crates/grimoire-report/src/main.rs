use std::path::PathBuf;
use std::process;

use grimoire_report::format;
use grimoire_report::input::{self, DataPaths};

fn usage() {
    eprintln!("Usage: conflict-report [OPTIONS]");
    eprintln!("  --catalog <path>      Catalog file (RON, or JSON by extension); repeatable");
    eprintln!("  --categories <path>   Category rules RON");
    eprintln!("  --groups <path>       Conflict groups RON; repeatable");
    eprintln!("  --config <path>       Engine config RON");
    eprintln!("  --check <id,id,...>   Report every conflict among these items");
    eprintln!("  --output <path>       Write the JSON report");
}

/// Value following a flag, or exit with a message.
fn value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut paths = DataPaths::default();
    let mut check: Option<Vec<String>> = None;
    let mut output_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                i += 1;
                paths.catalogs.push(PathBuf::from(value(&args, i, "--catalog")));
            }
            "--categories" => {
                i += 1;
                paths.categories = Some(PathBuf::from(value(&args, i, "--categories")));
            }
            "--groups" => {
                i += 1;
                paths.groups.push(PathBuf::from(value(&args, i, "--groups")));
            }
            "--config" => {
                i += 1;
                paths.config = Some(PathBuf::from(value(&args, i, "--config")));
            }
            "--check" => {
                i += 1;
                let ids = value(&args, i, "--check")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                check = Some(ids);
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value(&args, i, "--output")));
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    log::info!("Loading catalog and rules...");
    let engine = match input::load_engine(&paths) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let report = engine.generate_report();

    println!("\n## Conflict Statistics\n");
    println!("{}", format::format_statistics(&report.statistics));
    println!("## Rule Validation\n");
    println!("{}", format::format_validation(&report.validation));

    if let Some(ids) = &check {
        println!("## Conflicts among {}\n", ids.join(", "));
        let results = engine.check_multiple_conflicts(ids.as_slice());
        println!("{}", format::format_conflicts(&engine, &results));
        let combination = engine.combination_report(ids.as_slice());
        println!("{}", format::format_combination(&engine, &combination));
    }

    if let Some(ref path) = output_path {
        if let Err(e) = input::save_report(path, &report) {
            eprintln!("ERROR: failed to write {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved report to {}", path.display());
    }

    if !report.validation.is_valid {
        eprintln!(
            "ERROR: {} rule errors detected, exiting with code 1",
            report.validation.errors.len()
        );
        process::exit(1);
    }

    log::info!("Report complete.");
}
