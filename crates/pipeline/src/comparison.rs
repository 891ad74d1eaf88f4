//! Comparison-prefixed numeric filters such as `">=4.5"` or `"<60"`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Leading decimal literal or `Infinity`, optionally signed. Decimals may
/// carry an exponent. Digits are ASCII only.
static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("leading float pattern is valid")
});

/// Comparison operator carried by a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Equal,
}

impl Comparison {
    /// Prefixes in the order they must be tried: two-character prefixes
    /// first, otherwise `">=5"` would read as `>` with threshold `"=5"`.
    const PREFIXES: [(&'static str, Comparison); 5] = [
        ("<=", Comparison::LessOrEqual),
        (">=", Comparison::GreaterOrEqual),
        ("<", Comparison::LessThan),
        (">", Comparison::GreaterThan),
        ("=", Comparison::Equal),
    ];

    /// Query operator name in the document store's query language.
    pub fn operator(self) -> &'static str {
        match self {
            Comparison::LessThan => "$lt",
            Comparison::LessOrEqual => "$lte",
            Comparison::GreaterThan => "$gt",
            Comparison::GreaterOrEqual => "$gte",
            Comparison::Equal => "$eq",
        }
    }

    /// Evaluate `value <op> threshold`. Any comparison against NaN is false.
    pub fn compare(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::LessThan => value < threshold,
            Comparison::LessOrEqual => value <= threshold,
            Comparison::GreaterThan => value > threshold,
            Comparison::GreaterOrEqual => value >= threshold,
            Comparison::Equal => value == threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparison::LessThan => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterThan => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equal => "=",
        };
        f.write_str(symbol)
    }
}

/// Split a filter string into its operator and threshold.
///
/// Example: `">=4.5"` -> `(GreaterOrEqual, 4.5)`, `"5"` -> `(Equal, 5.0)`
///
/// Never fails. Text without a leading number yields a NaN threshold, and
/// callers decide what a NaN threshold means for their field.
pub fn parse_comparison(input: &str) -> (Comparison, f64) {
    for (prefix, comparison) in Comparison::PREFIXES {
        if let Some(rest) = input.strip_prefix(prefix) {
            return (comparison, parse_leading_float(rest));
        }
    }
    (Comparison::Equal, parse_leading_float(input))
}

/// Parse the longest leading decimal literal, ignoring anything after it
/// (`"4.5 stars"` -> 4.5). NaN when there is none.
pub fn parse_leading_float(input: &str) -> f64 {
    LEADING_FLOAT
        .find(input)
        .and_then(|m| m.as_str().trim_start().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
