//! Loading raw recipe dumps and preparing them for import.
//!
//! A dump is either a JSON object keyed by row number (`{"0": {...}, "1": {...}}`)
//! or a plain JSON array of rows. Rows are returned in row order.
//!
//! Shaping a prepared batch is data-parallel and uses Rayon.

use crate::error::{DataLoadError, Result};
use crate::parser::shape_record;
use crate::types::*;
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Read and parse a raw dump from disk.
pub fn load_raw_records(path: &Path) -> Result<Vec<RawRecipe>> {
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound { path: file.clone() },
        _ => DataLoadError::IoError(e),
    })?;

    let records = parse_raw_records(&content, &file)?;
    info!("Found {} raw records in {}", records.len(), file);
    Ok(records)
}

/// Parse the text of a raw dump. `file` is only used for error messages.
pub fn parse_raw_records(content: &str, file: &str) -> Result<Vec<RawRecipe>> {
    let root: Value = serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })?;

    match root {
        Value::Array(rows) => Ok(rows.into_iter().map(RawRecipe::from).collect()),
        Value::Object(rows) => {
            // Map key order depends on serde_json features ("10" may precede "2"), so restore row order
            let mut rows: Vec<(String, Value)> = rows.into_iter().collect();
            rows.sort_by_key(|(key, _)| row_number(key));
            Ok(rows.into_iter().map(|(_, row)| RawRecipe::from(row)).collect())
        }
        other => Err(DataLoadError::UnexpectedShape {
            file: file.to_string(),
            found: json_kind(&other).to_string(),
        }),
    }
}

/// Drop rows without a title and shape the rest, preserving row order.
pub fn prepare_records(raw: &[RawRecipe]) -> Vec<RecipeRecord> {
    raw.par_iter()
        .filter(|row| row.has_title())
        .map(shape_record)
        .collect()
}

/// Numeric keys sort numerically; anything else sorts after them by name.
fn row_number(key: &str) -> (u64, String) {
    match key.parse::<u64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (u64::MAX, key.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
