use crate::constants::TARGET_EQUIVALENT;
use crate::error::Result;
use crate::types::Concept;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of a Snap2SNOMED map export
///
/// Only the columns the classifier needs are read; all others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MapRow {
    #[serde(rename = "Source code", default)]
    pub source_code: String,

    #[serde(rename = "Relationship type code", default)]
    pub relationship_type: String,

    #[serde(rename = "Target code", default)]
    pub target_code: String,
}

impl MapRow {
    /// Returns the normalized target code for equivalence rows with a target
    pub fn equivalent_target(&self) -> Option<Concept> {
        if self.relationship_type.trim() != TARGET_EQUIVALENT {
            return None;
        }
        let target = Concept::from(self.target_code.as_str());
        (!target.is_empty()).then_some(target)
    }
}

/// Reads map rows from a tab-separated source with a header line
pub fn read_map_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<MapRow>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader)
        .into_deserialize::<MapRow>()
        .map(|row| row.map_err(Into::into))
}

/// Opens a Snap2SNOMED map file
pub fn open_map_file(path: &Path) -> Result<impl Iterator<Item = Result<MapRow>>> {
    let file = std::fs::File::open(path)?;
    Ok(read_map_rows(file))
}
