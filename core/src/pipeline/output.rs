use crate::error::Result;
use crate::types::ClassifiedOrder;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column header of the classified order file
pub const HEADER: [&str; 5] = ["Service", "Procedure", "Site", "Laterality", "Contrast"];

/// Incremental tab-separated writer for classified orders
///
/// The header is written on creation and every record is flushed as soon
/// as it is written, so an interrupted run leaves a valid partial file.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl OrderWriter<File> {
    /// Creates (or truncates) an output file
    pub fn create(path: &Path) -> Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> OrderWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(Self { writer, written: 0 })
    }

    pub fn write(&mut self, order: &ClassifiedOrder) -> Result<()> {
        self.writer.write_record(order.columns())?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and returns the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

/// One row of a classified order file, as text
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassifiedRow {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Procedure")]
    pub procedure: String,
    #[serde(rename = "Site", default)]
    pub site: String,
    #[serde(rename = "Laterality", default)]
    pub laterality: String,
    #[serde(rename = "Contrast", default)]
    pub contrast: String,
}

impl ClassifiedRow {
    /// Value of column 0..=4 in header order
    pub fn column(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.service),
            1 => Some(&self.procedure),
            2 => Some(&self.site),
            3 => Some(&self.laterality),
            4 => Some(&self.contrast),
            _ => None,
        }
    }
}

/// Reads all rows of a classified order file
pub fn read_classified_rows<R: Read>(reader: R) -> Result<Vec<ClassifiedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: ClassifiedRow = row?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a classified order file from disk
pub fn read_classified_file(path: &Path) -> Result<Vec<ClassifiedRow>> {
    read_classified_rows(File::open(path)?)
}
