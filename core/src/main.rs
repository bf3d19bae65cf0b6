use clap::Parser;
use log::{error, info};
use rrscat_core::cli::Cli;
use rrscat_core::export::export_artifacts;
use rrscat_core::pipeline::ClassificationPipeline;
use rrscat_core::terminology::FhirTerminologyClient;
use rrscat_core::SummaryReport;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = cli.pipeline_config();
    info!("Using terminology server: {}", config.server_url);

    let client = match FhirTerminologyClient::new(&config) {
        Ok(client) => client,
        Err(e) => fail(&format!("Failed to create terminology client: {}", e)),
    };

    let mut pipeline = ClassificationPipeline::new(client, config);
    let summary = match pipeline.run(&cli.infile, &cli.outdir) {
        Ok(summary) => summary,
        Err(e) => fail(&format!("Cannot continue: {}", e)),
    };

    println!("{}", SummaryReport::new(&summary));

    if cli.no_export {
        return;
    }

    if let Some(classified) = &summary.output_path {
        match export_artifacts(classified, &cli.outdir, cli.templates.as_deref()) {
            Ok(paths) => {
                for path in paths {
                    println!("Wrote {}", path.display());
                }
            }
            Err(e) => fail(&format!("Failed to export artifacts: {}", e)),
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

fn fail(message: &str) -> ! {
    error!("{}", message);
    eprintln!("Error: {}", message);
    process::exit(1);
}
