//! Domain types for representing a presentation as slides, shapes and tables.

use serde::{Deserialize, Serialize};

/// Represents an entire presentation with its slide content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Detected format of the source file.
    pub format: PresentationFormat,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a new presentation with the given filename and format.
    pub fn new(filename: impl Into<String>, format: PresentationFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Total number of tables across all slides.
    pub fn table_count(&self) -> usize {
        self.slides.iter().map(|s| s.tables().count()).sum()
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected so it can be rejected clearly.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }

    /// Short lowercase name, as used in file extensions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Ppt => "ppt",
        }
    }
}

/// A single slide: its shapes in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Shapes on this slide.
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Create a new empty slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Add a shape to this slide.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Text of every text-bearing shape, each followed by a single space.
    ///
    /// Shapes whose text frame is empty still contribute their separator,
    /// so the length reflects how busy the slide is.
    pub fn aggregated_text(&self) -> String {
        let mut text = String::new();
        for shape_text in self.shapes.iter().filter_map(|s| s.text.as_deref()) {
            text.push_str(shape_text);
            text.push(' ');
        }
        text
    }

    /// Tables on this slide, in shape order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.shapes.iter().filter_map(|s| s.table.as_ref())
    }
}

/// An element on a slide. It may carry a text frame, a table, or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    /// Text frame content; `None` when the shape has no text frame at all.
    pub text: Option<String>,

    /// Table content for graphic frames holding a table.
    pub table: Option<Table>,
}

impl Shape {
    /// A text-bearing shape.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            table: None,
        }
    }

    /// A table shape.
    pub fn table(table: Table) -> Self {
        Self {
            text: None,
            table: Some(table),
        }
    }
}

/// A table as an ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from rows of cell strings.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Row::from_cells).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// An ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Build a row from cell strings.
    pub fn from_cells<C>(cells: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Cell::new).collect(),
        }
    }

    /// Raw text of the first cell, if the row has any cells.
    pub fn first_text(&self) -> Option<&str> {
        self.cells.first().map(|c| c.text.as_str())
    }
}

/// A table cell's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
