//! Mapping table rows onto record fields.
//!
//! A row's meaning comes from its first cell. Values are located by the
//! table's inferred column roles, with positional fallbacks for tables
//! whose headers named no usable columns.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::ColumnRoles;
use crate::normalize::parse_number;
use crate::record::{ActiveRecord, Category};

static NAME_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(employee name\)").unwrap());

static ROLE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(role\)").unwrap());

/// What a row describes, decided by its label cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLabel {
    EmployeeName,
    Role,
    Category(Category),
    WeightedFinalScore,
    SalaryIncrease,
    ManagerNotes,
}

/// Label keywords in precedence order. The first one contained in the
/// lowercased label cell decides the row.
const LABEL_KEYWORDS: &[(&str, RowLabel)] = &[
    ("employee name", RowLabel::EmployeeName),
    ("role", RowLabel::Role),
    ("quality", RowLabel::Category(Category::Quality)),
    ("productivity", RowLabel::Category(Category::Productivity)),
    ("attendance", RowLabel::Category(Category::Attendance)),
    ("skill", RowLabel::Category(Category::Skill)),
    ("teamwork", RowLabel::Category(Category::Teamwork)),
    ("weighted final score", RowLabel::WeightedFinalScore),
    ("recommended salary increase", RowLabel::SalaryIncrease),
    ("manager comments", RowLabel::ManagerNotes),
    ("notes", RowLabel::ManagerNotes),
];

impl RowLabel {
    /// Classify a label cell. `None` means the row carries no field.
    pub fn detect(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        LABEL_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, label)| *label)
    }
}

/// Score for a category row.
///
/// Uses the score column when it exists in this row. Otherwise a two-cell
/// row holds the score in cell 1, and a wider row whose cell 1 is a
/// percentage weight holds it in cell 2.
pub fn row_score(cells: &[String], score_col: Option<usize>) -> f64 {
    if let Some(cell) = score_col.and_then(|idx| cells.get(idx)) {
        return parse_number(cell);
    }
    if cells.len() == 2 {
        return parse_number(&cells[1]);
    }
    if cells.len() > 2 && cells[1].contains('%') {
        return parse_number(&cells[2]);
    }
    0.0
}

/// Notes for a category row.
///
/// Uses the notes column when it exists in this row, else cell 4 of a wide
/// row, else the last cell when no notes column was found at all.
pub fn row_notes(cells: &[String], notes_col: Option<usize>) -> String {
    if let Some(cell) = notes_col.and_then(|idx| cells.get(idx)) {
        return cell.clone();
    }
    if cells.len() > 4 {
        return cells[4].clone();
    }
    if cells.len() > 2 && notes_col.is_none() {
        return cells[cells.len() - 1].clone();
    }
    String::new()
}

/// Value of a name or role row.
///
/// Handles three layouts: the label cell carries a "(marker)" next to the
/// value, the label cell is exactly the bare label with the value in cell
/// 1, or the label cell is the whole value.
fn labelled_value(cells: &[String], bare_label: &str, marker: &Regex) -> String {
    let label = &cells[0];
    if marker.is_match(label) {
        return marker.replace_all(label, "").trim().to_string();
    }
    if label.to_lowercase() == bare_label && cells.len() > 1 {
        return cells[1].trim().to_string();
    }
    label.trim().to_string()
}

/// Apply one normalized row to the in-progress record.
///
/// Returns the label the row was recognized as, or `None` when the row was
/// ignored and the record left untouched.
pub fn apply_row(record: &mut ActiveRecord, cells: &[String], roles: ColumnRoles) -> Option<RowLabel> {
    let label = RowLabel::detect(cells.first()?)?;

    match label {
        RowLabel::EmployeeName => {
            record.set_employee_name(labelled_value(cells, "employee name", &NAME_MARKER_REGEX));
        }
        RowLabel::Role => {
            record.set_role(labelled_value(cells, "role", &ROLE_MARKER_REGEX));
        }
        RowLabel::Category(category) => {
            let score = row_score(cells, roles.score);
            let notes = row_notes(cells, roles.notes);
            record.set_category(category, score, notes);
        }
        RowLabel::WeightedFinalScore => {
            record.set_weighted_score(row_score(cells, roles.score));
        }
        RowLabel::SalaryIncrease => {
            let mut increase = row_score(cells, roles.score);
            if increase == 0.0 && cells.len() > 1 {
                increase = parse_number(&cells[1]);
            }
            record.set_salary_increase(increase);
        }
        RowLabel::ManagerNotes => {
            record.set_manager_notes(cells[1..].join(" ").trim());
        }
    }

    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const NO_ROLES: ColumnRoles = ColumnRoles {
        score: None,
        notes: None,
    };

    #[test]
    fn test_detect_precedence() {
        assert_eq!(RowLabel::detect("Employee Name"), Some(RowLabel::EmployeeName));
        assert_eq!(RowLabel::detect("Employee Role"), Some(RowLabel::Role));
        assert_eq!(
            RowLabel::detect("Quality notes"),
            Some(RowLabel::Category(Category::Quality))
        );
        assert_eq!(
            RowLabel::detect("Teamwork & Skill"),
            Some(RowLabel::Category(Category::Skill))
        );
        assert_eq!(RowLabel::detect("Weighted Final Score"), Some(RowLabel::WeightedFinalScore));
        assert_eq!(
            RowLabel::detect("Recommended Salary Increase (%)"),
            Some(RowLabel::SalaryIncrease)
        );
        assert_eq!(RowLabel::detect("Manager Comments"), Some(RowLabel::ManagerNotes));
        assert_eq!(RowLabel::detect("Additional Notes"), Some(RowLabel::ManagerNotes));
        assert_eq!(RowLabel::detect("Category"), None);
        assert_eq!(RowLabel::detect(""), None);
    }

    #[test]
    fn test_row_score_fallbacks() {
        assert_eq!(row_score(&cells(&["Quality", "4.2/5"]), None), 4.2);
        assert_eq!(row_score(&cells(&["Quality", "42%", "4.2"]), None), 4.2);
        assert_eq!(row_score(&cells(&["Quality", "high", "4.2"]), None), 0.0);
        assert_eq!(row_score(&cells(&["Quality"]), None), 0.0);
    }

    #[test]
    fn test_row_score_column_out_of_range_falls_back() {
        assert_eq!(row_score(&cells(&["Quality", "3"]), Some(5)), 3.0);
        assert_eq!(row_score(&cells(&["Quality", "20%", "3", "ok"]), Some(3)), 0.0);
    }

    #[test]
    fn test_row_notes_fallbacks() {
        let wide = cells(&["Skill", "20%", "4", "x", "grows fast", "y"]);
        assert_eq!(row_notes(&wide, None), "grows fast");
        assert_eq!(row_notes(&wide, Some(3)), "x");

        let three = cells(&["Skill", "4", "steady"]);
        assert_eq!(row_notes(&three, None), "steady");
        // A notes column that this row lacks yields nothing
        assert_eq!(row_notes(&three, Some(7)), "");

        assert_eq!(row_notes(&cells(&["Skill", "4"]), None), "");
    }

    #[test]
    fn test_name_layouts() {
        let mut record = ActiveRecord::new("R&D");

        apply_row(&mut record, &cells(&["Employee Name", "Alice"]), NO_ROLES);
        assert_eq!(record.employee_name(), "Alice");

        apply_row(&mut record, &cells(&["Bob Smith (Employee Name)"]), NO_ROLES);
        assert_eq!(record.employee_name(), "Bob Smith");

        apply_row(&mut record, &cells(&["Employee Name: Carol"]), NO_ROLES);
        assert_eq!(record.employee_name(), "Employee Name: Carol");

        // Bare label with nothing beside it keeps the label text
        apply_row(&mut record, &cells(&["Employee Name"]), NO_ROLES);
        assert_eq!(record.employee_name(), "Employee Name");
    }

    #[test]
    fn test_role_layouts() {
        let mut record = ActiveRecord::new("R&D");

        apply_row(&mut record, &cells(&["ROLE", "Engineer"]), NO_ROLES);
        assert_eq!(record.fields().role, "Engineer");

        apply_row(&mut record, &cells(&["Lead Technician (role)", "ignored"]), NO_ROLES);
        assert_eq!(record.fields().role, "Lead Technician");
    }

    #[test]
    fn test_category_rows_use_roles() {
        let mut record = ActiveRecord::new("QA/QC");
        let roles = ColumnRoles {
            score: Some(2),
            notes: Some(3),
        };

        let label = apply_row(
            &mut record,
            &cells(&["Attendance", "10%", "4.8 / 5", "Never late"]),
            roles,
        );
        assert_eq!(label, Some(RowLabel::Category(Category::Attendance)));
        assert_eq!(record.fields().category(Category::Attendance), (4.8, "Never late"));
    }

    #[test]
    fn test_salary_increase_falls_back_to_cell_one() {
        let mut record = ActiveRecord::new("R&D");
        let roles = ColumnRoles {
            score: Some(2),
            notes: None,
        };

        apply_row(
            &mut record,
            &cells(&["Recommended Salary Increase", "5.5%", "-"]),
            roles,
        );
        assert_eq!(record.fields().salary_increase, 5.5);
    }

    #[test]
    fn test_weighted_score() {
        let mut record = ActiveRecord::new("R&D");
        apply_row(&mut record, &cells(&["Weighted Final Score", "4.35"]), NO_ROLES);
        assert_eq!(record.fields().weighted_score, 4.35);
    }

    #[test]
    fn test_manager_notes_joins_cells() {
        let mut record = ActiveRecord::new("R&D");
        apply_row(
            &mut record,
            &cells(&["Manager Comments", "Great year.", "", "Promote"]),
            NO_ROLES,
        );
        assert_eq!(record.fields().manager_notes, "Great year.  Promote");

        apply_row(&mut record, &cells(&["Notes"]), NO_ROLES);
        assert_eq!(record.fields().manager_notes, "");
    }

    #[test]
    fn test_unrecognized_row_leaves_record_unchanged() {
        let mut record = ActiveRecord::new("R&D");
        record.set_employee_name("Alice");
        let before = record.clone();

        assert_eq!(apply_row(&mut record, &cells(&["Category", "Score"]), NO_ROLES), None);
        assert_eq!(apply_row(&mut record, &[], NO_ROLES), None);
        assert_eq!(record, before);
    }
}
