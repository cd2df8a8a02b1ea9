//! Table classification and column-role inference.
//!
//! Assessment tables have no fixed schema: the score column may be headed
//! "Performance", "Rating", "Score" or "Weight %", and notes may sit in a
//! "Comments" or "Reason" column, or nowhere at all.

use crate::normalize::lower_key;
use crate::types::Table;

/// Header keywords that mark the score column outright.
const PRIMARY_SCORE_KEYWORDS: &[&str] = &["performance", "quantification", "rating"];

/// Header keywords that mark a notes column.
const NOTES_KEYWORDS: &[&str] = &["comments", "notes", "reason"];

/// Marker in a row's first cell that starts a new employee record.
pub const NAME_ROW_MARKER: &str = "employee name";

/// Column positions inferred from a table's header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub score: Option<usize>,
    pub notes: Option<usize>,
}

impl ColumnRoles {
    /// Infer column roles from lowercased, trimmed header cells.
    ///
    /// The score column is the first header naming a primary keyword. Failing
    /// that, every header is scanned: the last "weight" header is taken, or
    /// else the last "score" header that is not a "reason" column. The notes
    /// column is the last header naming a notes keyword.
    pub fn infer<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut score = headers.iter().position(|h| {
            let h = h.as_ref();
            PRIMARY_SCORE_KEYWORDS.iter().any(|k| h.contains(k))
        });

        if score.is_none() {
            let mut last_score = None;
            let mut last_weight = None;
            for (idx, header) in headers.iter().enumerate() {
                let h = header.as_ref();
                if h.contains("score") && !h.contains("reason") {
                    last_score = Some(idx);
                }
                if h.contains("weight") {
                    last_weight = Some(idx);
                }
            }
            // A weight column beats a score column wherever it sits.
            score = last_weight.or(last_score);
        }

        let notes = headers
            .iter()
            .rposition(|h| NOTES_KEYWORDS.iter().any(|k| h.as_ref().contains(k)));

        Self { score, notes }
    }

    /// Infer column roles from a table's first row.
    pub fn from_table(table: &Table) -> Self {
        let headers: Vec<String> = table
            .rows
            .first()
            .map(|row| row.cells.iter().map(|c| lower_key(&c.text)).collect())
            .unwrap_or_default();
        Self::infer(&headers)
    }
}

/// What a table means for the record being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Contains an employee-name row: starts a new record.
    NameTable(ColumnRoles),
    /// No name row, but a record is in progress to receive its rows.
    ContinuationTable(ColumnRoles),
    /// Nothing to attach to, or too small to carry data. Ignored.
    Orphan,
}

/// Whether any row's first cell names the employee.
pub fn has_name_row(table: &Table) -> bool {
    table.rows.iter().any(|row| {
        row.first_text()
            .map(|text| text.to_lowercase().contains(NAME_ROW_MARKER))
            .unwrap_or(false)
    })
}

/// Classify a table given whether a record is currently in progress.
pub fn classify_table(table: &Table, has_active_record: bool) -> TableKind {
    if table.row_count() < 2 {
        return TableKind::Orphan;
    }

    let roles = ColumnRoles::from_table(table);

    if has_name_row(table) {
        TableKind::NameTable(roles)
    } else if has_active_record {
        TableKind::ContinuationTable(roles)
    } else {
        TableKind::Orphan
    }
}
