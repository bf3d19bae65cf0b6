//! FHIR artifact export
//!
//! Turns a classified order file into terminology artifacts:
//! one `ValueSet` per facet column and a `ConceptMap` from focus procedure
//! (with site, laterality and contrast dependencies) back to the order code.

mod conceptmap;
mod template;
mod valueset;

pub use conceptmap::{build_concept_map, ConceptMap};
pub use template::{Artifact, ResourceMetadata};
pub use valueset::{build_value_set, distinct_column, ValueSet};

use crate::error::Result;
use crate::pipeline::read_classified_file;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes all artifacts for a classified order file into `outdir`
///
/// Templates are read from `templates` when given, otherwise built-in
/// metadata is used. Returns the paths written.
pub fn export_artifacts(
    classified_file: &Path,
    outdir: &Path,
    templates: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let rows = read_classified_file(classified_file)?;
    info!(
        "Exporting artifacts for {} classified orders from {}",
        rows.len(),
        classified_file.display()
    );

    let mut written = Vec::new();
    for artifact in Artifact::VALUE_SETS {
        let Some(column) = artifact.column() else {
            continue;
        };
        let value_set = build_value_set(&rows, column, artifact.metadata(templates)?);
        info!(
            "{}: {} concepts",
            artifact.output_file(),
            value_set.compose.include[0].concept.len()
        );
        written.push(write_json(&value_set, &outdir.join(artifact.output_file()))?);
    }

    let concept_map = build_concept_map(&rows, Artifact::ServiceMap.metadata(templates)?);
    info!(
        "{}: {} elements",
        Artifact::ServiceMap.output_file(),
        concept_map.group[0].element.len()
    );
    written.push(write_json(
        &concept_map,
        &outdir.join(Artifact::ServiceMap.output_file()),
    )?);

    Ok(written)
}

fn write_json<T: Serialize>(resource: &T, path: &Path) -> Result<PathBuf> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, resource)?;
    Ok(path.to_path_buf())
}
