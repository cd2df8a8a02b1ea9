//! WASM-compatible wrapper for assessment extraction.
//!
//! This crate exposes deck-to-dataset extraction to JavaScript for use in
//! Cloudflare Workers.

use assess_core::{Dataset, EmployeeRecord, PresentationFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of extracting an assessment deck.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Detected format of the source file.
    pub format: String,
    /// Number of slides found in the source.
    pub slide_count: usize,
    /// Number of employees in the dataset.
    pub record_count: usize,
    /// One row per employee, keyed by column name.
    pub records: Vec<EmployeeRecord>,
}

/// Extract the employee dataset from a PowerPoint file.
///
/// # Arguments
/// * `data` - The raw bytes of the PPTX file
/// * `filename` - The original filename (used for format detection)
///
/// # Returns
/// A JavaScript object with the extraction result, or throws on error.
#[wasm_bindgen]
pub fn extract_assessment(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let result = extract_assessment_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Extract the employee dataset and return it as CSV text.
#[wasm_bindgen]
pub fn extract_assessment_csv(data: &[u8], filename: &str) -> Result<String, JsValue> {
    let (_, _, dataset) = extract_dataset_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;
    dataset
        .to_csv_string()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn extract_dataset_impl(
    data: &[u8],
    filename: &str,
) -> Result<(PresentationFormat, usize, Dataset), String> {
    // Need at least 8 bytes for magic detection
    if data.len() < 8 {
        return Err("File too small to be a valid presentation".to_string());
    }

    let presentation = assess_pptx::load_presentation(Cursor::new(data), filename)
        .map_err(|e| e.to_string())?;

    let dataset = assess_core::extract_dataset(&presentation);
    Ok((presentation.format, presentation.slides.len(), dataset))
}

fn extract_assessment_impl(data: &[u8], filename: &str) -> Result<ExtractionResult, String> {
    let (format, slide_count, dataset) = extract_dataset_impl(data, filename)?;

    Ok(ExtractionResult {
        format: format.as_str().to_string(),
        slide_count,
        record_count: dataset.len(),
        records: dataset.into_iter().collect(),
    })
}
