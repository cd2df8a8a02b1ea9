//! The final deduplicated dataset and its export formats.

use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

use crate::error::Result;
use crate::record::EmployeeRecord;

/// One row per employee, in the order their records were started.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
}

impl Dataset {
    /// Exported columns, in order.
    pub const COLUMNS: [&'static str; 16] = [
        "Employee Name",
        "Team",
        "Role",
        "Quality Score",
        "Quality Notes",
        "Productivity Score",
        "Productivity Notes",
        "Attendance Score",
        "Attendance Notes",
        "Skill Score",
        "Skill Notes",
        "Teamwork Score",
        "Teamwork Notes",
        "Weighted Score",
        "Salary Increase",
        "Manager Notes",
    ];

    /// Build the dataset from flushed records, keeping the first record for
    /// each distinct employee name (exact match).
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            if seen.contains(&record.employee_name) {
                log::debug!("Dropping duplicate record for '{}'", record.employee_name);
                continue;
            }
            seen.insert(record.employee_name.clone());
            kept.push(record);
        }

        Self { records: kept }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the dataset as CSV with a header row.
    ///
    /// The header is written even when the dataset is empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(Self::COLUMNS)?;
        for record in &self.records {
            csv_writer.serialize(record)?;
        }

        // Check for error rather than implicitly flushing and ignoring.
        csv_writer.flush()?;
        Ok(())
    }

    /// Render the dataset as a CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| crate::Error::ExportError(e.to_string()))
    }

    /// Render the dataset as a pretty-printed JSON array of row objects.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Plain-text summary of name, team, weighted score and salary increase.
    pub fn preview(&self) -> String {
        let name_width = self
            .records
            .iter()
            .map(|r| r.employee_name.chars().count())
            .chain(std::iter::once("Employee Name".len()))
            .max()
            .unwrap_or(0);
        let team_width = self
            .records
            .iter()
            .map(|r| r.team.chars().count())
            .chain(std::iter::once("Team".len()))
            .max()
            .unwrap_or(0);

        let mut lines = vec![format!(
            "{:<name_width$}  {:<team_width$}  {:>14}  {:>15}",
            "Employee Name", "Team", "Weighted Score", "Salary Increase"
        )];
        for r in &self.records {
            lines.push(format!(
                "{:<name_width$}  {:<team_width$}  {:>14.2}  {:>15.2}",
                r.employee_name, r.team, r.weighted_score, r.salary_increase
            ));
        }
        lines.join("\n")
    }
}

impl IntoIterator for Dataset {
    type Item = EmployeeRecord;
    type IntoIter = std::vec::IntoIter<EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
