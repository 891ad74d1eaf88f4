//! Core domain types for the recipe collection.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `RawRecipe`: one loosely-shaped row exactly as it arrives from a scraped dump
//! - `RecipeRecord`: the canonical stored shape produced by the shaper
//! - `Recipe`: a stored record together with the identity the store assigned it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identity assigned by the record store (a 24 character hex string
/// for the document store).
pub type RecipeId = String;

/// Nutrient name (e.g. `calories`, `fatContent`) to display string (e.g. `"389 kcal"`).
pub type Nutrients = BTreeMap<String, String>;

// =============================================================================
// Raw input
// =============================================================================

/// A single raw record from an upstream dump.
///
/// Upstream sources disagree on field naming (`URL` vs `url`, the misspelled
/// `Contient`), so the row is kept as an untyped JSON object and fields are
/// looked up by alias when shaping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecipe {
    fields: Map<String, Value>,
}

impl RawRecipe {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up the first present alias, falling back to a case-insensitive
    /// match on every alias.
    pub fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .find_map(|alias| self.fields.get(*alias))
            .or_else(|| {
                self.fields.iter().find_map(|(key, value)| {
                    aliases
                        .iter()
                        .any(|alias| key.eq_ignore_ascii_case(alias))
                        .then_some(value)
                })
            })
    }

    /// Whether the row carries a usable title. Rows without one are article
    /// links and other noise scraped alongside the recipes.
    pub fn has_title(&self) -> bool {
        match self.field(&["title"]) {
            Some(Value::String(title)) => !title.is_empty(),
            Some(Value::Null) | None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(_) => true,
        }
    }
}

impl From<Value> for RawRecipe {
    /// Anything that is not a JSON object becomes an empty row.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

// =============================================================================
// Canonical record
// =============================================================================

/// A recipe in its canonical stored shape.
///
/// Numeric fields are either a finite number or `None`; they are never NaN.
/// `ingredients` and `instructions` keep their source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub continent: Option<String>,
    pub country_state: Option<String>,
    pub url: Option<String>,
    /// Conventionally 0.0 - 5.0
    pub rating: Option<f64>,
    /// Minutes
    pub total_time: Option<f64>,
    pub prep_time: Option<f64>,
    pub cook_time: Option<f64>,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutrients: Nutrients,
    /// Free text such as "8 servings"
    pub serves: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored recipe: canonical record plus its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: RecipeId,
    #[serde(flatten)]
    pub record: RecipeRecord,
}

impl Recipe {
    pub fn new(id: impl Into<RecipeId>, record: RecipeRecord) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}

impl std::ops::Deref for Recipe {
    type Target = RecipeRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}
