//! End-to-end tests for extract_dataset() over in-memory decks.

use assess_core::{
    extract_dataset, extract_records, Accumulator, Presentation, PresentationFormat, Shape, Slide,
    Table, TableKind,
};

fn deck(slides: Vec<Slide>) -> Presentation {
    let mut presentation = Presentation::new("Assessment.pptx", PresentationFormat::Pptx);
    for slide in slides {
        presentation.add_slide(slide);
    }
    presentation
}

fn slide(number: usize, texts: &[&str], tables: Vec<Vec<Vec<&str>>>) -> Slide {
    let mut slide = Slide::new(number);
    for text in texts {
        slide.add_shape(Shape::text(*text));
    }
    for rows in tables {
        slide.add_shape(Shape::table(Table::from_rows(rows)));
    }
    slide
}

// ---------------------------------------------------------------------------
// Record spanning slides, flushed by the next name table
// ---------------------------------------------------------------------------
#[test]
fn record_flushes_on_next_name_table() {
    let presentation = deck(vec![
        slide(1, &["R&D"], vec![]),
        slide(
            2,
            &[],
            vec![vec![vec!["Employee Name", "Alice"], vec!["Quality", "4.5", "good"]]],
        ),
        slide(3, &[], vec![vec![vec!["Employee Name", "Bob"], vec!["Role", "Chemist"]]]),
    ]);

    let records = extract_records(&presentation);
    assert_eq!(records.len(), 2);

    let alice = &records[0];
    assert_eq!(alice.employee_name, "Alice");
    assert_eq!(alice.team, "R&D");
    // A three-cell row without a score header or a percent weight in cell 1
    // has no score position; the trailing cell is still read as notes.
    assert_eq!(alice.quality_score, 0.0);
    assert_eq!(alice.quality_notes, "good");
    assert_eq!(alice.weighted_score, 0.0);

    let bob = &records[1];
    assert_eq!(bob.employee_name, "Bob");
    assert_eq!(bob.team, "R&D");
    assert_eq!(bob.role, "Chemist");
}

#[test]
fn record_not_flushed_until_superseded() {
    let mut acc = Accumulator::new();
    acc.process_slide(&slide(1, &["R&D"], vec![]));
    acc.process_slide(&slide(
        2,
        &[],
        vec![vec![vec!["Employee Name", "Alice"], vec!["Quality", "4.5", "good"]]],
    ));
    assert!(acc.flushed().is_empty());
    assert_eq!(acc.active().unwrap().employee_name(), "Alice");

    let kind = acc.process_table(&Table::from_rows([["Employee Name", "Bob"], ["Role", "Lead"]]));
    assert!(matches!(kind, TableKind::NameTable(_)));
    assert_eq!(acc.flushed().len(), 1);
    assert_eq!(acc.flushed()[0].quality_notes, "good");
    assert_eq!(acc.active().unwrap().employee_name(), "Bob");
}

// ---------------------------------------------------------------------------
// A full review split over a name table and a scored continuation table
// ---------------------------------------------------------------------------
#[test]
fn continuation_tables_fill_scores() {
    let presentation = deck(vec![
        slide(1, &["QA/QC"], vec![]),
        slide(
            2,
            &["Annual review"],
            vec![vec![
                vec!["Employee Name", "Carol"],
                vec!["Role", "Inspector"],
            ]],
        ),
        slide(
            3,
            &[],
            vec![vec![
                vec!["Category", "Weight %", "Performance", "Comments"],
                vec!["Quality", "30%", "4", "Thorough"],
                vec!["Productivity", "30%", "3.5", "Improving"],
                vec!["Attendance", "10%", "5", "Perfect"],
                vec!["Skill", "20%", "4.2", "Certified"],
                vec!["Teamwork", "10%", "3", "Quiet"],
            ]],
        ),
        slide(
            4,
            &[],
            vec![vec![
                vec!["Summary", "Value"],
                vec!["Weighted Final Score", "3.92"],
                vec!["Recommended Salary Increase", "4%"],
                vec!["Manager Comments", "Solid year,", "keep going."],
            ]],
        ),
    ]);

    let dataset = extract_dataset(&presentation);
    assert_eq!(dataset.len(), 1);

    let carol = &dataset.records()[0];
    assert_eq!(carol.team, "QA/QC");
    assert_eq!(carol.role, "Inspector");
    assert_eq!(carol.quality_score, 4.0);
    assert_eq!(carol.quality_notes, "Thorough");
    assert_eq!(carol.productivity_score, 3.5);
    assert_eq!(carol.attendance_score, 5.0);
    assert_eq!(carol.skill_score, 4.2);
    assert_eq!(carol.skill_notes, "Certified");
    assert_eq!(carol.teamwork_score, 3.0);
    assert_eq!(carol.weighted_score, 3.92);
    assert_eq!(carol.salary_increase, 4.0);
    assert_eq!(carol.manager_notes, "Solid year, keep going.");
}

// ---------------------------------------------------------------------------
// Team context is sticky and never rewrites started records
// ---------------------------------------------------------------------------
#[test]
fn team_context_is_sticky() {
    let presentation = deck(vec![
        slide(1, &["QA/QC"], vec![]),
        slide(2, &["Quarterly results"], vec![]),
        slide(3, &[], vec![vec![vec!["Employee Name", "Dan"], vec!["Role", "Tester"]]]),
        slide(4, &["Production"], vec![]),
        slide(5, &[], vec![vec![vec!["Employee Name", "Eve"], vec!["Role", "Operator"]]]),
    ]);

    let records = extract_records(&presentation);
    assert_eq!(records[0].team, "QA/QC");
    assert_eq!(records[1].team, "Production");
}

#[test]
fn long_slides_mentioning_a_team_do_not_switch() {
    let prose = "Our production targets were exceeded this year thanks to the new line";
    let presentation = deck(vec![
        slide(1, &["R&D"], vec![]),
        slide(2, &[prose], vec![vec![vec!["Employee Name", "Fay"], vec!["Role", "Engineer"]]]),
    ]);

    let records = extract_records(&presentation);
    assert_eq!(records[0].team, "R&D");
}

// ---------------------------------------------------------------------------
// Orphans, invalid names and duplicates
// ---------------------------------------------------------------------------
#[test]
fn orphan_tables_before_first_record_are_ignored() {
    let presentation = deck(vec![
        slide(
            1,
            &[],
            vec![vec![vec!["Category", "Score"], vec!["Quality", "5"]]],
        ),
        slide(2, &[], vec![vec![vec!["Employee Name", "Gus"], vec!["Role", "Tech"]]]),
    ]);

    let records = extract_records(&presentation);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quality_score, 0.0);
}

#[test]
fn records_without_valid_names_are_dropped() {
    let presentation = deck(vec![
        slide(1, &[], vec![vec![vec!["Employee Name", ""], vec!["Quality", "4"]]]),
        slide(2, &[], vec![vec![vec!["Employee Name", "Unassigned"], vec!["Quality", "4"]]]),
        slide(3, &[], vec![vec![vec!["Role", "Tech"], vec!["Quality", "4"]]]),
    ]);

    assert!(extract_dataset(&presentation).is_empty());
}

#[test]
fn duplicate_names_keep_first_record() {
    let presentation = deck(vec![
        slide(1, &["R&D"], vec![]),
        slide(
            2,
            &[],
            vec![vec![vec!["Employee Name", "Jane Doe"], vec!["Weighted Final Score", "4.1"]]],
        ),
        slide(3, &["QA/QC"], vec![]),
        slide(
            4,
            &[],
            vec![vec![vec!["Employee Name", "Jane Doe"], vec!["Weighted Final Score", "2.0"]]],
        ),
    ]);

    let dataset = extract_dataset(&presentation);
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].team, "R&D");
    assert_eq!(dataset.records()[0].weighted_score, 4.1);
}

#[test]
fn single_row_tables_never_start_records() {
    let presentation = deck(vec![slide(
        1,
        &[],
        vec![vec![vec!["Employee Name", "Hal"]]],
    )]);

    assert!(extract_records(&presentation).is_empty());
}

#[test]
fn several_name_tables_on_one_slide_flush_in_order() {
    let presentation = deck(vec![slide(
        1,
        &["Batt Dev"],
        vec![
            vec![vec!["Employee Name", "Ian"], vec!["Quality", "3"]],
            vec![vec!["Employee Name", "Joy"], vec!["Quality", "4"]],
        ],
    )]);

    let records = extract_records(&presentation);
    let names: Vec<&str> = records.iter().map(|r| r.employee_name.as_str()).collect();
    assert_eq!(names, ["Ian", "Joy"]);
    assert!(records.iter().all(|r| r.team == "Battery Development"));
}

#[test]
fn exported_csv_round_trips_through_extraction() {
    let presentation = deck(vec![slide(
        1,
        &["R&D"],
        vec![vec![vec!["Employee Name", "Kim"], vec!["Quality", "4.2/5"]]],
    )]);

    let csv = extract_dataset(&presentation).to_csv_string().unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("Kim,R&D,,4.2,,"));
}
