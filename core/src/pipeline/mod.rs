//! Classification pipeline
//!
//! Drives the classifier over a Snap2SNOMED map file:
//! `Init → BuildIndices → ProcessRow* → Done`.
//! Reference data is built once; rows are processed strictly in input
//! order and each resolved order is written as soon as it is classified.

mod input;
mod output;

pub use input::{open_map_file, read_map_rows, MapRow};
pub use output::{
    read_classified_file, read_classified_rows, ClassifiedRow, OrderWriter, HEADER,
};

use crate::api::{Classification, OrderClassifier, ReferenceSets, UnresolvedReason};
use crate::error::{Result, RrsError};
use crate::terminology::TerminologyService;
use crate::types::{Concept, FocusProcedureList, PipelineConfig};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the classified order file written into the output directory
pub const OUTPUT_FILE_NAME: &str = "rrs.txt";

/// Pipeline lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    BuildIndices,
    ProcessRows,
    Done,
}

/// What happened to one input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not an equivalence row, or no target code
    Ignored,
    /// Classified and written
    Written,
    /// Target code already processed in this run
    Duplicate,
    /// Classification did not resolve
    Unresolved(UnresolvedReason),
    /// Terminology service failed for this row
    Failed,
}

/// Counts of row outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub ignored: usize,
    pub written: usize,
    pub duplicates: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: Outcome) {
        self.rows_read += 1;
        match outcome {
            Outcome::Ignored => self.ignored += 1,
            Outcome::Written => self.written += 1,
            Outcome::Duplicate => self.duplicates += 1,
            Outcome::Unresolved(_) => self.unresolved += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    /// Number of distinct target codes classified (resolved or not)
    pub fn distinct_codes(&self) -> usize {
        self.written + self.unresolved + self.failed
    }
}

/// Sequential classification pipeline over a terminology service
///
/// # Example
///
/// ```
/// use rrscat_core::pipeline::{ClassificationPipeline, MapRow, OrderWriter};
/// use rrscat_core::terminology::StaticTerminology;
/// use rrscat_core::{Concept, FocusProcedureList, PipelineConfig};
///
/// let service = StaticTerminology::new()
///     .with_relationships("169069000", &[("260686004", "312251004")])
///     .with_expansion(">> 169069000", &["169069000", "77477000"]);
/// let focus = FocusProcedureList::new(vec![(Concept::from("77477000"), "CT".into())]);
///
/// let mut pipeline = ClassificationPipeline::new(service, PipelineConfig::default())
///     .with_focus_list(focus);
/// pipeline.init().unwrap();
/// pipeline.build_indices().unwrap();
///
/// let row = MapRow {
///     relationship_type: "TARGET_EQUIVALENT".into(),
///     target_code: "169069000".into(),
///     ..Default::default()
/// };
/// let mut writer = OrderWriter::new(Vec::new()).unwrap();
/// let summary = pipeline.process_rows(vec![Ok(row)], &mut writer).unwrap();
/// assert_eq!(summary.written, 1);
/// ```
pub struct ClassificationPipeline<S> {
    service: S,
    config: PipelineConfig,
    focus: Option<FocusProcedureList>,
    references: Option<ReferenceSets>,
    seen: HashSet<Concept>,
    stage: Stage,
}

impl<S: TerminologyService> ClassificationPipeline<S> {
    pub fn new(service: S, config: PipelineConfig) -> Self {
        Self {
            service,
            config,
            focus: None,
            references: None,
            seen: HashSet::new(),
            stage: Stage::Init,
        }
    }

    /// Builder: Use this focus list instead of loading the configured file
    pub fn with_focus_list(mut self, focus: FocusProcedureList) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Verifies the terminology service is reachable and active
    ///
    /// # Errors
    ///
    /// Returns [`RrsError::ServiceUnavailable`] on transport failure or a
    /// non-active status.
    pub fn init(&mut self) -> Result<()> {
        let url = &self.config.server_url;
        match self.service.check_health() {
            Ok(true) => {
                info!("Terminology service {} is active", url);
                self.stage = Stage::BuildIndices;
                Ok(())
            }
            Ok(false) => Err(RrsError::ServiceUnavailable(format!(
                "{} does not report an active status",
                url
            ))),
            Err(e) => Err(RrsError::ServiceUnavailable(format!(
                "{} appears to be down: {}",
                url, e
            ))),
        }
    }

    /// Builds the laterality index, override sets and focus list
    pub fn build_indices(&mut self) -> Result<()> {
        if self.stage != Stage::BuildIndices {
            return Err(RrsError::ClassificationError(format!(
                "cannot build indices in stage {:?}",
                self.stage
            )));
        }

        let focus = match self.focus.take() {
            Some(focus) => focus,
            None => {
                info!("Get focus procedures from {}", self.config.procedures_file.display());
                FocusProcedureList::from_file(&self.config.procedures_file)?
            }
        };
        info!("Focus procedures: {}", focus.len());

        self.references = Some(ReferenceSets::build(&self.service, focus)?);
        self.stage = Stage::ProcessRows;
        Ok(())
    }

    /// Processes one input row
    ///
    /// Duplicate and unresolved codes are logged and skipped. Terminology
    /// failures for the row are logged and reported as [`Outcome::Failed`].
    pub fn process_row<W: Write>(
        &mut self,
        index: usize,
        row: &MapRow,
        writer: &mut OrderWriter<W>,
    ) -> Result<Outcome> {
        let references = match (&self.references, self.stage) {
            (Some(references), Stage::ProcessRows) => references,
            _ => {
                return Err(RrsError::ClassificationError(format!(
                    "cannot process rows in stage {:?}",
                    self.stage
                )))
            }
        };

        let Some(code) = row.equivalent_target() else {
            return Ok(Outcome::Ignored);
        };

        if !self.seen.insert(code.clone()) {
            warn!(
                "Duplicate code detected at index {}: {}, ignoring",
                index, code
            );
            return Ok(Outcome::Duplicate);
        }

        debug!("Classifying {} (source {})", code, row.source_code);
        let classifier = OrderClassifier::new(&self.service, references, &self.config.system);
        match classifier.classify(&code) {
            Ok(Classification::Resolved(order)) => {
                writer.write(&order)?;
                Ok(Outcome::Written)
            }
            Ok(Classification::Unresolved { source_code, reason }) => {
                error!("{} for code: {}", capitalize(&reason.to_string()), source_code);
                Ok(Outcome::Unresolved(reason))
            }
            Err(e) => {
                error!("Failed to classify code {}: {}", code, e);
                Ok(Outcome::Failed)
            }
        }
    }

    /// Processes rows in order, writing resolved orders as they are produced
    pub fn process_rows<I, W>(&mut self, rows: I, writer: &mut OrderWriter<W>) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<MapRow>>,
        W: Write,
    {
        let mut summary = RunSummary::default();
        for (index, row) in rows.into_iter().enumerate() {
            let outcome = match row {
                Ok(row) => self.process_row(index, &row, writer)?,
                Err(e) => {
                    error!("Failed to read row at index {}: {}", index, e);
                    Outcome::Failed
                }
            };
            summary.record(outcome);
        }
        Ok(summary)
    }

    /// Runs the whole pipeline from a map file into `<outdir>/rrs.txt`
    ///
    /// # Errors
    ///
    /// Fails if the input file or output directory is missing, the service
    /// is unavailable, or reference data cannot be built.
    pub fn run(&mut self, input: &Path, outdir: &Path) -> Result<RunSummary> {
        if !input.is_file() {
            return Err(not_found("input file", input));
        }
        if !outdir.is_dir() {
            return Err(not_found("output directory", outdir));
        }

        self.init()?;
        self.build_indices()?;

        let output_path = outdir.join(OUTPUT_FILE_NAME);
        info!("Process Snap2SNOMED file: {}", input.display());
        let mut writer = OrderWriter::create(&output_path)?;
        let rows = open_map_file(input)?;
        let mut summary = self.process_rows(rows, &mut writer)?;
        info!("Wrote {} classified orders", writer.written());
        writer.finish()?;
        self.stage = Stage::Done;

        info!("Finished building RRS flat file: {}", output_path.display());
        summary.output_path = Some(output_path);
        Ok(summary)
    }
}

fn not_found(what: &str, path: &Path) -> RrsError {
    RrsError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} {} does not exist", what, path.display()),
    ))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PROCEDURE_QUALIFIER, SITE_QUALIFIER};
    use crate::terminology::{ecl, StaticTerminology};
    use std::fs;
    use tempfile::TempDir;

    const CT_ABDOMEN: &str = "169069000";
    const CT: &str = "77477000";
    const LEFT_ABDOMEN: &str = "1290040001";
    const ABDOMEN: &str = "818983003";
    const UNMAPPED: &str = "399208008";

    fn service() -> StaticTerminology {
        StaticTerminology::new()
            .with_expansion(&ecl::lateralized_structures(crate::Side::Left), &[LEFT_ABDOMEN])
            .with_relationships(
                CT_ABDOMEN,
                &[
                    (SITE_QUALIFIER, LEFT_ABDOMEN),
                    (PROCEDURE_QUALIFIER, "312251004"),
                ],
            )
            .with_expansion(&ecl::ancestors_or_self(CT_ABDOMEN), &[CT_ABDOMEN, CT])
            .with_expansion(&ecl::proximal_primitive_parent(LEFT_ABDOMEN), &[ABDOMEN])
            .with_relationships(UNMAPPED, &[(PROCEDURE_QUALIFIER, "363680008")])
            .with_expansion(&ecl::ancestors_or_self(UNMAPPED), &[UNMAPPED, "71388002"])
    }

    fn focus() -> FocusProcedureList {
        FocusProcedureList::new(vec![(Concept::from(CT), "CT".into())])
    }

    fn ready_pipeline(service: StaticTerminology) -> ClassificationPipeline<StaticTerminology> {
        let mut pipeline =
            ClassificationPipeline::new(service, PipelineConfig::default()).with_focus_list(focus());
        pipeline.init().unwrap();
        pipeline.build_indices().unwrap();
        pipeline
    }

    fn equivalent(code: &str) -> Result<MapRow> {
        Ok(MapRow {
            source_code: format!("RAD-{}", code),
            relationship_type: "TARGET_EQUIVALENT".into(),
            target_code: code.into(),
        })
    }

    fn run_rows(rows: Vec<Result<MapRow>>) -> (RunSummary, String) {
        let mut pipeline = ready_pipeline(service());
        let mut writer = OrderWriter::new(Vec::new()).unwrap();
        let summary = pipeline.process_rows(rows, &mut writer).unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        (summary, output)
    }

    #[test]
    fn test_end_to_end_left_ct_abdomen() {
        let (summary, output) = run_rows(vec![equivalent(CT_ABDOMEN)]);
        assert_eq!(summary.written, 1);
        assert_eq!(
            output,
            "Service\tProcedure\tSite\tLaterality\tContrast\n\
             169069000\t77477000\t818983003\t7771000\t\n"
        );
    }

    #[test]
    fn test_duplicate_code_written_once() {
        let (summary, output) = run_rows(vec![
            equivalent(CT_ABDOMEN),
            equivalent(&format!(" {} ", CT_ABDOMEN)),
        ]);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_unresolved_code_skipped() {
        let (summary, output) = run_rows(vec![equivalent(UNMAPPED), equivalent(CT_ABDOMEN)]);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.written, 1);
        assert!(!output.contains(UNMAPPED));
        assert!(output.contains(CT_ABDOMEN));
    }

    #[test]
    fn test_unreadable_row_does_not_stop_run() {
        let rows = vec![
            Err(RrsError::from("invalid UTF-8 in record 2")),
            equivalent(CT_ABDOMEN),
        ];
        let (summary, output) = run_rows(rows);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.rows_read, 2);
        assert!(output.contains(CT_ABDOMEN));
    }

    #[test]
    fn test_non_equivalent_rows_ignored() {
        let rows = vec![
            Ok(MapRow {
                relationship_type: "TARGET_BROADER".into(),
                target_code: CT_ABDOMEN.into(),
                ..Default::default()
            }),
            Ok(MapRow {
                relationship_type: "TARGET_EQUIVALENT".into(),
                ..Default::default()
            }),
        ];
        let (summary, output) = run_rows(rows);
        assert_eq!(summary.ignored, 2);
        assert_eq!(summary.distinct_codes(), 0);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_init_fails_when_service_inactive() {
        let mut pipeline =
            ClassificationPipeline::new(StaticTerminology::new().with_health(false), PipelineConfig::default());
        let err = pipeline.init().unwrap_err();
        assert!(matches!(err, RrsError::ServiceUnavailable(_)));
        assert_eq!(pipeline.stage(), Stage::Init);
    }

    #[test]
    fn test_process_before_build_is_error() {
        let mut pipeline = ClassificationPipeline::new(service(), PipelineConfig::default());
        let mut writer = OrderWriter::new(Vec::new()).unwrap();
        let result = pipeline.process_row(0, &equivalent(CT_ABDOMEN).unwrap(), &mut writer);
        assert!(result.is_err());
    }

    #[test]
    fn test_indices_built_once() {
        let pipeline = ready_pipeline(service());
        let index_queries = pipeline.service().queries().len();
        assert_eq!(index_queries, 4);
        assert_eq!(pipeline.stage(), Stage::ProcessRows);
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("map.tsv");
        fs::write(
            &input,
            "Source code\tTarget code\tRelationship type code\n\
             RAD001\t169069000\tTARGET_EQUIVALENT\n\
             RAD002\t169069000\tTARGET_EQUIVALENT\n",
        )
        .unwrap();

        let mut pipeline =
            ClassificationPipeline::new(service(), PipelineConfig::default()).with_focus_list(focus());
        let summary = pipeline.run(&input, dir.path()).unwrap();

        assert_eq!(pipeline.stage(), Stage::Done);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.duplicates, 1);
        let output_path = summary.output_path.unwrap();
        let rows = read_classified_file(&output_path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].site, ABDOMEN);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = ClassificationPipeline::new(service(), PipelineConfig::default());
        let err = pipeline
            .run(&dir.path().join("missing.tsv"), dir.path())
            .unwrap_err();
        assert!(matches!(err, RrsError::IoError(_)));
        assert!(pipeline.service().queries().is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("unable to map"), "Unable to map");
        assert_eq!(capitalize(""), "");
    }
}
