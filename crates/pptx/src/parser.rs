//! PPTX file parser implementation.

use assess_core::{Cell, Error, Presentation, PresentationFormat, Result, Row, Shape, Slide, Table};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut presentation = Presentation::new(filename, PresentationFormat::Pptx);

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("Found {} slides in '{}'", slide_order.len(), filename);

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            presentation.add_slide(slide);
        }

        Ok(presentation)
    }

    /// Get the ordered list of slide paths.
    ///
    /// The slide list in presentation.xml gives the display order. An empty
    /// list falls back to the numbering of the slide relationships. A deck
    /// without presentation.xml is not a presentation and fails.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let relationships = parse_relationships(&rels_content)?;

        let content = self.read_file_from_archive(archive, PRESENTATION_PATH)?;
        let slide_ids = parse_slide_id_list(&content)?;

        if !slide_ids.is_empty() {
            let ordered = slide_ids
                .iter()
                .filter_map(|id| {
                    let rel = relationships.iter().find(|r| &r.id == id && r.is_slide());
                    if rel.is_none() {
                        log::warn!("Slide id '{}' has no slide relationship", id);
                    }
                    rel
                })
                .map(|r| r.part_path())
                .collect();
            return Ok(ordered);
        }

        let mut slides: Vec<(String, Option<usize>)> = relationships
            .iter()
            .filter(|r| r.is_slide())
            .map(|r| {
                let order_num = extract_slide_number(&r.id).or_else(|| extract_slide_number(&r.target));
                (r.part_path(), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<Slide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = Slide::new(slide_number);

        for shape in extract_shapes_from_xml(&content) {
            slide.add_shape(shape);
        }

        log::debug!(
            "Slide {}: {} shapes, {} tables",
            slide_number,
            slide.shapes.len(),
            slide.tables().count()
        );

        Ok(slide)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A relationship entry from a .rels part.
#[derive(Debug, Clone, PartialEq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }

    /// Archive path of the target part, resolved against the ppt/ folder.
    fn part_path(&self) -> String {
        match self.target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("ppt/{}", self.target),
        }
    }
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut relationships = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"Id" => rel.id = value,
                        _ => {}
                    }
                }

                relationships.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Relationship ids of the slides listed in presentation.xml, in order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // The plain `id` attribute is a numeric slide id; the
                // prefixed one (r:id) references the relationship.
                let rel_id = e.attributes().flatten().find(|attr| {
                    let key = attr.key.as_ref();
                    key.contains(&b':') && local_name(key) == b"id"
                });
                if let Some(attr) = rel_id {
                    ids.push(String::from_utf8_lossy(&attr.value).to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::PptxParseError(format!(
                    "Error parsing slide list: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Accumulates the text of one text body (a shape or a table cell).
#[derive(Debug, Default)]
struct TextCollector {
    text: String,
    paragraphs: usize,
    in_run: bool,
}

impl TextCollector {
    fn start_paragraph(&mut self) {
        if self.paragraphs > 0 {
            self.text.push('\n');
        }
        self.paragraphs += 1;
    }

    /// Soft line break inside a paragraph, kept distinct from paragraph ends.
    fn line_break(&mut self) {
        self.text.push('\u{000B}');
    }

    fn push_text(&mut self, text: &str) {
        if self.in_run {
            self.text.push_str(text);
        }
    }
}

/// The top-level shape currently being read.
#[derive(Debug, Default)]
enum ShapeState {
    #[default]
    Outside,
    /// A `p:sp`; its text body appears once `txBody` opens.
    Text(Option<TextCollector>),
    /// A `p:graphicFrame`, possibly holding a table.
    Frame {
        table: Option<Table>,
        cell: Option<TextCollector>,
    },
}

impl ShapeState {
    fn collector(&mut self) -> Option<&mut TextCollector> {
        match self {
            ShapeState::Text(text) => text.as_mut(),
            ShapeState::Frame { cell, .. } => cell.as_mut(),
            ShapeState::Outside => None,
        }
    }
}

/// Elements whose whole subtree is skipped: group shapes and
/// markup-compatibility blocks, which repeat their content per fallback.
fn is_skipped_container(name: &[u8], state: &ShapeState) -> bool {
    name == b"AlternateContent" || (name == b"grpSp" && matches!(state, ShapeState::Outside))
}

/// Extract the top-level shapes of a slide, in document order.
///
/// Malformed XML stops the walk; shapes read before the error are kept.
fn extract_shapes_from_xml(xml_content: &str) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);

    let mut state = ShapeState::Outside;
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let local_name = local_name(name.as_ref());

                if skip_depth > 0 {
                    if local_name == b"grpSp" || local_name == b"AlternateContent" {
                        skip_depth += 1;
                    }
                    continue;
                }
                if is_skipped_container(local_name, &state) {
                    skip_depth = 1;
                    continue;
                }

                match local_name {
                    b"sp" if matches!(state, ShapeState::Outside) => {
                        state = ShapeState::Text(None);
                    }
                    b"graphicFrame" if matches!(state, ShapeState::Outside) => {
                        state = ShapeState::Frame {
                            table: None,
                            cell: None,
                        };
                    }
                    b"txBody" => {
                        if let ShapeState::Text(text) = &mut state {
                            *text = Some(TextCollector::default());
                        }
                    }
                    b"tbl" => {
                        if let ShapeState::Frame { table, .. } = &mut state {
                            *table = Some(Table::default());
                        }
                    }
                    b"tr" => {
                        if let ShapeState::Frame { table: Some(table), .. } = &mut state {
                            table.rows.push(Row::default());
                        }
                    }
                    b"tc" => {
                        if let ShapeState::Frame { table: Some(_), cell } = &mut state {
                            *cell = Some(TextCollector::default());
                        }
                    }
                    b"p" => {
                        if let Some(collector) = state.collector() {
                            collector.start_paragraph();
                        }
                    }
                    b"t" => {
                        if let Some(collector) = state.collector() {
                            collector.in_run = true;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if skip_depth > 0 {
                    continue;
                }
                let name = e.name();

                match local_name(name.as_ref()) {
                    b"p" => {
                        if let Some(collector) = state.collector() {
                            collector.start_paragraph();
                        }
                    }
                    b"br" => {
                        if let Some(collector) = state.collector() {
                            collector.line_break();
                        }
                    }
                    b"tc" => {
                        if let ShapeState::Frame { table: Some(table), .. } = &mut state {
                            if let Some(row) = table.rows.last_mut() {
                                row.cells.push(Cell::default());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if skip_depth > 0 {
                    continue;
                }
                if let Some(collector) = state.collector() {
                    match e.unescape() {
                        Ok(text) => collector.push_text(&text),
                        Err(err) => log::warn!("Bad text escape (skipped): {}", err),
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let local_name = local_name(name.as_ref());

                if skip_depth > 0 {
                    if local_name == b"grpSp" || local_name == b"AlternateContent" {
                        skip_depth -= 1;
                    }
                    continue;
                }

                match local_name {
                    b"t" => {
                        if let Some(collector) = state.collector() {
                            collector.in_run = false;
                        }
                    }
                    b"tc" => {
                        if let ShapeState::Frame { table: Some(table), cell } = &mut state {
                            let text = cell.take().map(|c| c.text).unwrap_or_default();
                            if let Some(row) = table.rows.last_mut() {
                                row.cells.push(Cell::new(text));
                            }
                        }
                    }
                    b"sp" if matches!(state, ShapeState::Text(_)) => {
                        if let ShapeState::Text(text) = std::mem::take(&mut state) {
                            let text = text.map(|c| c.text).unwrap_or_default();
                            shapes.push(Shape::text(text));
                        }
                    }
                    b"graphicFrame" if matches!(state, ShapeState::Frame { .. }) => {
                        if let ShapeState::Frame { table: Some(table), .. } = std::mem::take(&mut state) {
                            shapes.push(Shape::table(table));
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "XML parsing error at position {} (keeping {} shapes): {}",
                    reader.buffer_position(),
                    shapes.len(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    shapes
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
