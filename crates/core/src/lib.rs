//! Core document model and extraction state machine for turning employee
//! assessment decks into a tabular dataset.

pub mod accumulator;
pub mod classify;
pub mod dataset;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod record;
pub mod team;
pub mod types;

pub use accumulator::{extract_records, Accumulator};
pub use classify::{classify_table, ColumnRoles, TableKind};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use fields::RowLabel;
pub use record::{ActiveRecord, Category, EmployeeRecord};
pub use types::{Cell, Presentation, PresentationFormat, Row, Shape, Slide, Table};

/// Extract and deduplicate every employee record in a presentation.
pub fn extract_dataset(presentation: &Presentation) -> Dataset {
    let records = extract_records(presentation);
    let dataset = Dataset::from_records(records);
    log::info!(
        "Extracted {} records from {} slides of '{}'",
        dataset.len(),
        presentation.slides.len(),
        presentation.filename
    );
    dataset
}
