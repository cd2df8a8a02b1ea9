//! Employee records: the in-progress record and its flushed snapshot.

use serde::{Deserialize, Serialize};

/// Placeholder name that never counts as a real employee.
pub const PLACEHOLDER_NAME: &str = "Unassigned";

/// One assessed category, each with a score and a free-text note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Quality,
    Productivity,
    Attendance,
    Skill,
    Teamwork,
}

/// A finished employee record, one dataset row.
///
/// Field order and serde names define the exported column layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Quality Score")]
    pub quality_score: f64,
    #[serde(rename = "Quality Notes")]
    pub quality_notes: String,
    #[serde(rename = "Productivity Score")]
    pub productivity_score: f64,
    #[serde(rename = "Productivity Notes")]
    pub productivity_notes: String,
    #[serde(rename = "Attendance Score")]
    pub attendance_score: f64,
    #[serde(rename = "Attendance Notes")]
    pub attendance_notes: String,
    #[serde(rename = "Skill Score")]
    pub skill_score: f64,
    #[serde(rename = "Skill Notes")]
    pub skill_notes: String,
    #[serde(rename = "Teamwork Score")]
    pub teamwork_score: f64,
    #[serde(rename = "Teamwork Notes")]
    pub teamwork_notes: String,
    #[serde(rename = "Weighted Score")]
    pub weighted_score: f64,
    #[serde(rename = "Salary Increase")]
    pub salary_increase: f64,
    #[serde(rename = "Manager Notes")]
    pub manager_notes: String,
}

impl EmployeeRecord {
    /// Score and notes for a category.
    pub fn category(&self, category: Category) -> (f64, &str) {
        match category {
            Category::Quality => (self.quality_score, &self.quality_notes),
            Category::Productivity => (self.productivity_score, &self.productivity_notes),
            Category::Attendance => (self.attendance_score, &self.attendance_notes),
            Category::Skill => (self.skill_score, &self.skill_notes),
            Category::Teamwork => (self.teamwork_score, &self.teamwork_notes),
        }
    }

    /// Whether this record names a real employee.
    pub fn is_valid(&self) -> bool {
        let name = self.employee_name.trim();
        !name.is_empty() && self.employee_name != PLACEHOLDER_NAME
    }
}

/// The record being accumulated across tables and slides.
///
/// The team is fixed when the record starts; there is no setter for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRecord {
    record: EmployeeRecord,
}

impl ActiveRecord {
    /// Start a record for an employee of `team`.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            record: EmployeeRecord {
                team: team.into(),
                ..EmployeeRecord::default()
            },
        }
    }

    pub fn team(&self) -> &str {
        &self.record.team
    }

    pub fn employee_name(&self) -> &str {
        &self.record.employee_name
    }

    /// Read-only view of the fields accumulated so far.
    pub fn fields(&self) -> &EmployeeRecord {
        &self.record
    }

    pub fn set_employee_name(&mut self, name: impl Into<String>) {
        self.record.employee_name = name.into();
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.record.role = role.into();
    }

    pub fn set_category(&mut self, category: Category, score: f64, notes: impl Into<String>) {
        let notes = notes.into();
        let r = &mut self.record;
        match category {
            Category::Quality => (r.quality_score, r.quality_notes) = (score, notes),
            Category::Productivity => (r.productivity_score, r.productivity_notes) = (score, notes),
            Category::Attendance => (r.attendance_score, r.attendance_notes) = (score, notes),
            Category::Skill => (r.skill_score, r.skill_notes) = (score, notes),
            Category::Teamwork => (r.teamwork_score, r.teamwork_notes) = (score, notes),
        }
    }

    pub fn set_weighted_score(&mut self, score: f64) {
        self.record.weighted_score = score;
    }

    pub fn set_salary_increase(&mut self, increase: f64) {
        self.record.salary_increase = increase;
    }

    pub fn set_manager_notes(&mut self, notes: impl Into<String>) {
        self.record.manager_notes = notes.into();
    }

    /// See [`EmployeeRecord::is_valid`].
    pub fn is_valid(&self) -> bool {
        self.record.is_valid()
    }

    /// Finalize into an immutable record.
    pub fn into_record(self) -> EmployeeRecord {
        self.record
    }
}
