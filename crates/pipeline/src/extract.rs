//! Numeric extraction from nutrient display strings.
//!
//! Nutrients are stored as text ("389 kcal") so the store cannot compare
//! them. These helpers recover the magnitude after the records are fetched.

use data_loader::Nutrients;
use regex::Regex;
use std::sync::LazyLock;

/// First run of ASCII digits with an optional fractional part. Other
/// scripts' digits are skipped, not matched.
static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").expect("numeric run pattern is valid"));

/// Calories of a recipe, if its nutrient table has a readable `calories` entry.
///
/// Example: `{calories: "389 kcal"}` -> `Some(389.0)`, `{}` -> `None`
pub fn extract_calories(nutrients: Option<&Nutrients>) -> Option<f64> {
    extract_nutrient(nutrients?, "calories")
}

/// Magnitude of any nutrient entry, taken from the first numeric run in its text.
pub fn extract_nutrient(nutrients: &Nutrients, name: &str) -> Option<f64> {
    let text = nutrients.get(name)?;
    NUMERIC_RUN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
