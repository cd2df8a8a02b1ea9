//! The record accumulation state machine.
//!
//! Walks slides in document order carrying two pieces of state forward: the
//! current team section and the record being built. A record may span
//! several tables and slides; it ends when the next name table starts
//! another record or when the document ends.

use crate::classify::{classify_table, ColumnRoles, TableKind};
use crate::fields::apply_row;
use crate::normalize::clean_text;
use crate::record::{ActiveRecord, EmployeeRecord};
use crate::team::{next_team, UNASSIGNED_TEAM};
use crate::types::{Presentation, Slide, Table};

/// Owned extraction state. Each slide and table is a transition on it.
#[derive(Debug, Clone)]
pub struct Accumulator {
    current_team: String,
    active: Option<ActiveRecord>,
    output: Vec<EmployeeRecord>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            current_team: UNASSIGNED_TEAM.to_string(),
            active: None,
            output: Vec::new(),
        }
    }
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_team(&self) -> &str {
        &self.current_team
    }

    /// The record in progress, if any.
    pub fn active(&self) -> Option<&ActiveRecord> {
        self.active.as_ref()
    }

    /// Records flushed so far, in the order they were started.
    pub fn flushed(&self) -> &[EmployeeRecord] {
        &self.output
    }

    /// Process one slide: update the team section, then each table in order.
    pub fn process_slide(&mut self, slide: &Slide) {
        let team = next_team(&slide.aggregated_text(), &self.current_team);
        if team != self.current_team {
            log::debug!("Slide {}: team section '{}'", slide.number, team);
            self.current_team = team;
        }

        for table in slide.tables() {
            let kind = self.process_table(table);
            if kind == TableKind::Orphan {
                log::debug!("Slide {}: skipped table with no record to attach to", slide.number);
            }
        }
    }

    /// Process one table and return how it was classified.
    pub fn process_table(&mut self, table: &Table) -> TableKind {
        let kind = classify_table(table, self.active.is_some());

        match kind {
            TableKind::NameTable(roles) => {
                self.flush();
                self.active = Some(ActiveRecord::new(self.current_team.clone()));
                self.apply_rows(table, roles);
            }
            TableKind::ContinuationTable(roles) => self.apply_rows(table, roles),
            TableKind::Orphan => {}
        }

        kind
    }

    fn apply_rows(&mut self, table: &Table, roles: ColumnRoles) {
        let Some(record) = self.active.as_mut() else {
            return;
        };

        for row in &table.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| clean_text(&c.text)).collect();
            apply_row(record, &cells, roles);
        }
    }

    /// Finalize the record in progress. Invalid records are dropped.
    fn flush(&mut self) {
        if let Some(active) = self.active.take() {
            if active.is_valid() {
                log::debug!(
                    "Flushed record for '{}' ({})",
                    active.employee_name(),
                    active.team()
                );
                self.output.push(active.into_record());
            } else {
                log::debug!("Dropped record without a valid employee name");
            }
        }
    }

    /// End of document: flush the last record and return every flushed record.
    pub fn finish(mut self) -> Vec<EmployeeRecord> {
        self.flush();
        self.output
    }
}

/// Run the state machine over a whole presentation.
pub fn extract_records(presentation: &Presentation) -> Vec<EmployeeRecord> {
    let mut accumulator = Accumulator::new();
    for slide in &presentation.slides {
        accumulator.process_slide(slide);
    }
    accumulator.finish()
}
