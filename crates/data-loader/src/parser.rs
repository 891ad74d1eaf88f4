//! Shaping of raw recipe rows into canonical records.
//!
//! Two pieces live here:
//! - `normalize_numeric`: turns `null`, `"NaN"`, `""`, `"42"` or `42.5` into a clean `Option<f64>`
//! - `shape_record`: maps a `RawRecipe` with upstream field names into a `RecipeRecord`
//!
//! Neither function can fail. A malformed field degrades to its default
//! (`None`, an empty list or an empty nutrient map) instead of rejecting the row.

use crate::types::*;
use chrono::Utc;
use serde_json::Value;

// Upstream field aliases, canonical name last where they differ
const CONTINENT: &[&str] = &["Contient", "Continent", "continent"];
const COUNTRY_STATE: &[&str] = &["Country_State", "country_state"];
const CUISINE: &[&str] = &["cuisine"];
const TITLE: &[&str] = &["title"];
const URL: &[&str] = &["URL", "url"];
const RATING: &[&str] = &["rating"];
const TOTAL_TIME: &[&str] = &["total_time"];
const PREP_TIME: &[&str] = &["prep_time"];
const COOK_TIME: &[&str] = &["cook_time"];
const DESCRIPTION: &[&str] = &["description"];
const INGREDIENTS: &[&str] = &["ingredients"];
const INSTRUCTIONS: &[&str] = &["instructions"];
const NUTRIENTS: &[&str] = &["nutrients"];
const SERVES: &[&str] = &["serves"];

/// Normalize a numeric-ish JSON value.
///
/// Rules, in order:
/// - missing or `null` -> `None`
/// - `"nan"` (any case) or `""` -> `None`
/// - anything that does not read as a finite number -> `None`
/// - otherwise the number itself
///
/// Example: `"42"` -> `Some(42.0)`, `42.5` -> `Some(42.5)`, `"NaN"` -> `None`
pub fn normalize_numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        // Booleans, arrays and objects are not numbers
        _ => None,
    }
}

/// Shape a raw row into the canonical stored record.
///
/// `created_at` is stamped with the current time; everything else is a pure
/// function of the input, so shaping the same row twice yields records that
/// differ only in `created_at`.
pub fn shape_record(raw: &RawRecipe) -> RecipeRecord {
    RecipeRecord {
        continent: text(raw.field(CONTINENT)),
        country_state: text(raw.field(COUNTRY_STATE)),
        cuisine: text(raw.field(CUISINE)),
        title: text(raw.field(TITLE)),
        url: text(raw.field(URL)),
        rating: normalize_numeric(raw.field(RATING)),
        total_time: normalize_numeric(raw.field(TOTAL_TIME)),
        prep_time: normalize_numeric(raw.field(PREP_TIME)),
        cook_time: normalize_numeric(raw.field(COOK_TIME)),
        description: text(raw.field(DESCRIPTION)),
        ingredients: text_list(raw.field(INGREDIENTS)),
        instructions: text_list(raw.field(INSTRUCTIONS)),
        nutrients: nutrient_map(raw.field(NUTRIENTS)),
        serves: text(raw.field(SERVES)),
        created_at: Utc::now(),
    }
}

/// Scalar text. Empty strings count as missing; numbers are kept as their text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Ordered list of strings. A non-list degrades to an empty list and
/// non-text entries inside a list are skipped.
fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Nutrient name -> display string ("389 kcal").
fn nutrient_map(value: Option<&Value>) -> Nutrients {
    let Some(Value::Object(entries)) = value else {
        return Nutrients::new();
    };

    entries
        .iter()
        .filter_map(|(name, amount)| {
            let amount = match amount {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((name.clone(), amount))
        })
        .collect()
}
