pub mod report;

use crate::constants::DEFAULT_TERMINOLOGY_URL;
use crate::types::{PipelineConfig, DEFAULT_PAGE_SIZE};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for rrscat
#[derive(Parser, Debug)]
#[command(name = "rrscat")]
#[command(about = "Classify radiology order codes against SNOMED CT")]
#[command(version)]
pub struct Cli {
    /// Snap2SNOMED map file (tab separated) of order codes to SNOMED CT
    #[arg(short, long, value_name = "FILE")]
    pub infile: PathBuf,

    /// Output directory for the classified file and artifacts
    #[arg(short, long, value_name = "DIR")]
    pub outdir: PathBuf,

    /// FHIR terminology server base URL
    #[arg(short, long, env = "RRS_TERMINOLOGY_URL", default_value = DEFAULT_TERMINOLOGY_URL)]
    pub server: String,

    /// Focus procedure list (code,display per line)
    #[arg(short, long, value_name = "FILE", default_value = "procedures.txt")]
    pub procedures: PathBuf,

    /// Directory holding ValueSet/ConceptMap templates
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// HTTP timeout in seconds for each terminology request
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Codes per expansion page (0 disables paging)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Skip the FHIR artifact export
    #[arg(long)]
    pub no_export: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Pipeline configuration described by these arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_server_url(&self.server)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_page_size(self.page_size)
            .with_procedures_file(self.procedures.clone())
    }
}

/// Command-line arguments for rrsexport
#[derive(Parser, Debug)]
#[command(name = "rrsexport")]
#[command(about = "Build FHIR ValueSets and a ConceptMap from a classified order file")]
#[command(version)]
pub struct ExportCli {
    /// Classified order file produced by rrscat
    #[arg(value_name = "FILE")]
    pub classified: PathBuf,

    /// Output directory (defaults to the classified file's directory)
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Directory holding ValueSet/ConceptMap templates
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportCli {
    pub fn output_dir(&self) -> PathBuf {
        match &self.outdir {
            Some(dir) => dir.clone(),
            None => self
                .classified
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        ExportCli::command().debug_assert();
    }

    #[test]
    fn test_pipeline_config_from_args() {
        let cli = Cli::try_parse_from([
            "rrscat",
            "-i",
            "map.tsv",
            "-o",
            "out",
            "--server",
            "http://localhost:8080/fhir/",
            "--page-size",
            "0",
            "--timeout",
            "5",
        ])
        .unwrap();

        let config = cli.pipeline_config();
        assert_eq!(config.server_url, "http://localhost:8080/fhir");
        assert_eq!(config.page_size, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.procedures_file, PathBuf::from("procedures.txt"));
        assert!(!cli.no_export);
    }

    #[test]
    fn test_export_output_dir_defaults_to_parent() {
        let cli = ExportCli::try_parse_from(["rrsexport", "out/rrs.txt"]).unwrap();
        assert_eq!(cli.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_export_output_dir_for_bare_filename() {
        let cli = ExportCli::try_parse_from(["rrsexport", "rrs.txt"]).unwrap();
        assert_eq!(cli.output_dir(), PathBuf::from("."));
        assert!(cli.output_dir().is_dir());
    }
}
