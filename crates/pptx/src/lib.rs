//! PPTX (Office Open XML) reader for assessment decks.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents, into
//! slides of text shapes and tables.

pub mod parser;

pub use parser::PptxParser;

use assess_core::{Error, Presentation, PresentationFormat, Result};
use std::io::{Read, Seek, SeekFrom};

/// Detect the format of `reader` and parse it.
///
/// Magic bytes decide the format, falling back to the filename's extension.
/// Legacy .ppt files are recognized and rejected, since the binary format
/// exposes no table structure to extract from.
pub fn load_presentation<R: Read + Seek>(mut reader: R, filename: &str) -> Result<Presentation> {
    let mut magic = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;

    let format = PresentationFormat::from_magic(&magic)
        .or_else(|| {
            filename
                .rsplit_once('.')
                .and_then(|(_, ext)| PresentationFormat::from_extension(ext))
        })
        .ok_or_else(|| Error::UnsupportedFormat(format!("could not detect format of '{}'", filename)))?;

    match format {
        PresentationFormat::Pptx => {
            log::debug!("Parsing '{}' as PPTX", filename);
            PptxParser::new().parse(reader, filename)
        }
        PresentationFormat::Ppt => Err(Error::UnsupportedFormat(format!(
            "'{}' is a legacy .ppt file; save it as .pptx first",
            filename
        ))),
    }
}
