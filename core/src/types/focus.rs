use super::Concept;
use crate::error::{Result, RrsError};
use std::io::Read;
use std::path::Path;

/// Curated, ordered vocabulary of coarse-grained procedures/modalities
///
/// Order is significant: more specific entries precede generic ones and the
/// first entry found among a procedure's ancestors wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusProcedureList {
    entries: Vec<(Concept, String)>,
}

impl FocusProcedureList {
    /// Creates a list from `(concept, display)` pairs, preserving order
    pub fn new(entries: Vec<(Concept, String)>) -> Self {
        Self { entries }
    }

    /// Loads the list from a `code,display` file
    ///
    /// Lines starting with `#` are comments. A missing file or a line without
    /// exactly two fields is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RrsError::FocusList(format!(
                "procedures file {} does not exist",
                path.display()
            )));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses the list from any `code,display` source
    ///
    /// # Example
    ///
    /// ```
    /// use rrscat_core::FocusProcedureList;
    ///
    /// let data = "# code,display\n77477000,CT\n363680008,X-ray\n";
    /// let list = FocusProcedureList::from_reader(data.as_bytes()).unwrap();
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.concepts().next().map(|c| c.as_str()), Some("77477000"));
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.len() != 2 {
                return Err(RrsError::FocusList(format!(
                    "record {} has {} fields, expected code,display",
                    line + 1,
                    record.len()
                )));
            }
            entries.push((Concept::from(&record[0]), record[1].to_string()));
        }
        Ok(Self { entries })
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.entries.iter().map(|(concept, _)| concept)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
