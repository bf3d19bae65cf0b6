use clap::Parser;
use log::{error, info};
use rrscat_core::cli::ExportCli;
use rrscat_core::export::export_artifacts;
use std::process;

fn main() {
    let cli = ExportCli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if !cli.classified.is_file() {
        eprintln!("Error: {} is not a file", cli.classified.display());
        process::exit(1);
    }

    let outdir = cli.output_dir();
    if !outdir.is_dir() {
        eprintln!("Error: {} is not a directory", outdir.display());
        process::exit(1);
    }

    info!("Processing classified file: {}", cli.classified.display());

    match export_artifacts(&cli.classified, &outdir, cli.templates.as_deref()) {
        Ok(paths) => {
            for path in paths {
                println!("Wrote {}", path.display());
            }
        }
        Err(e) => {
            error!("Failed to export artifacts: {}", e);
            eprintln!("Error: Failed to export artifacts: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
