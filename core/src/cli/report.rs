use crate::pipeline::RunSummary;
use std::fmt;

/// Text report formatter for a classification run
pub struct SummaryReport<'a> {
    summary: &'a RunSummary,
}

impl<'a> SummaryReport<'a> {
    /// Creates a new summary report
    pub fn new(summary: &'a RunSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for SummaryReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classification Summary")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Rows read:      {}", self.summary.rows_read)?;
        writeln!(f, "Distinct codes: {}", self.summary.distinct_codes())?;
        writeln!(f, "Written:        {}", self.summary.written)?;
        writeln!(f, "Duplicates:     {}", self.summary.duplicates)?;
        writeln!(f, "Unresolved:     {}", self.summary.unresolved)?;
        writeln!(f, "Failed:         {}", self.summary.failed)?;
        writeln!(f, "Ignored:        {}", self.summary.ignored)?;
        writeln!(
            f,
            "Output:         {}",
            self.summary
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        )?;

        Ok(())
    }
}
