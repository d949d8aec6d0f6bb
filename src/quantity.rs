//! # Quantity Normalizer
//!
//! Parses free-text quantity strings ("2 cups", "500g", "about 1.5 kg")
//! into a numeric amount plus a unit token, and standardizes recognized
//! mass units to grams.
//!
//! ## Features
//!
//! - Leading numeric token extraction (digits and a single decimal point);
//!   non-numeric leading characters are stripped
//! - Mass standardization to a gram base (gram, kilogram, ounce, pound and
//!   their common spellings)
//! - Best-effort policy throughout: unparseable input yields amount 0,
//!   unrecognized units pass through unchanged, nothing ever errors
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::quantity::{parse, standardize};
//!
//! let parsed = parse("2 cups flour");
//! assert_eq!(parsed.amount, 2.0);
//! assert_eq!(parsed.unit, "cups flour");
//!
//! let grams = standardize(1.0, "kilogram");
//! assert_eq!(grams.amount, 1000.0);
//! assert_eq!(grams.unit, "g");
//! ```

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::collections::HashMap;

/// Base unit all recognized mass units standardize to
pub const BASE_MASS_UNIT: &str = "g";

lazy_static! {
    /// Matches the first numeric token: digits with at most one decimal point
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"\d+(?:\.\d+)?").expect("Number pattern should be valid");

    /// Grams-per-unit factors for recognized mass units and their common
    /// spellings, plurals, and abbreviations
    static ref MASS_FACTORS: HashMap<&'static str, f64> = {
        let mut map = HashMap::new();

        map.insert("g", 1.0);
        map.insert("gram", 1.0);
        map.insert("grams", 1.0);
        map.insert("gramme", 1.0);
        map.insert("grammes", 1.0);

        map.insert("kg", 1000.0);
        map.insert("kilogram", 1000.0);
        map.insert("kilograms", 1000.0);
        map.insert("kilogramme", 1000.0);
        map.insert("kilogrammes", 1000.0);

        map.insert("oz", 28.35);
        map.insert("ounce", 28.35);
        map.insert("ounces", 28.35);

        map.insert("lb", 453.592);
        map.insert("lbs", 453.592);
        map.insert("pound", 453.592);
        map.insert("pounds", 453.592);

        map
    };
}

/// A parsed or standardized quantity: a numeric amount and a unit token
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub unit: String,
}

impl ParsedQuantity {
    pub fn new(amount: f64, unit: &str) -> Self {
        Self {
            amount,
            unit: unit.to_string(),
        }
    }
}

/// Parse a free-text quantity into an amount and a unit token.
///
/// The first numeric token in the text becomes the amount (leading
/// non-numeric characters are stripped); everything after it, trimmed, is
/// the unit token. If no numeric token is found the amount is 0.0 and the
/// whole trimmed text becomes the unit token.
///
/// This never fails; worst case is amount 0 for unparseable input.
///
/// ```rust
/// use mealplanner::quantity::parse;
///
/// assert_eq!(parse("2 cups").amount, 2.0);
/// assert_eq!(parse("butter").amount, 0.0);
/// assert_eq!(parse("butter").unit, "butter");
/// ```
pub fn parse(quantity_text: &str) -> ParsedQuantity {
    let text = quantity_text.trim();

    match NUMBER_PATTERN.find(text) {
        Some(token) => {
            // Non-ASCII decimal digits can match \d but fail to parse
            let amount: f64 = token.as_str().parse().unwrap_or(0.0);
            let unit = text[token.end()..].trim().to_string();
            trace!("parsed '{}' -> amount={}, unit='{}'", text, amount, unit);
            ParsedQuantity { amount, unit }
        }
        None => {
            debug!("no numeric token in '{}', defaulting amount to 0", text);
            ParsedQuantity {
                amount: 0.0,
                unit: text.to_string(),
            }
        }
    }
}

/// Standardize an amount to the gram base when the unit is a recognized
/// mass unit; otherwise pass amount and unit through unchanged.
///
/// Pass-through for unrecognized units is a deliberate best-effort policy,
/// not an error: "5 widgets" stays "5 widgets".
pub fn standardize(amount: f64, unit: &str) -> ParsedQuantity {
    let key = unit.trim().trim_end_matches('.').to_lowercase();

    match MASS_FACTORS.get(key.as_str()) {
        Some(factor) => {
            let standardized = amount * factor;
            trace!(
                "standardized {} {} -> {} {}",
                amount,
                unit,
                standardized,
                BASE_MASS_UNIT
            );
            ParsedQuantity::new(standardized, BASE_MASS_UNIT)
        }
        None => ParsedQuantity::new(amount, unit),
    }
}

/// Parse and standardize in one step
pub fn normalize(quantity_text: &str) -> ParsedQuantity {
    let parsed = parse(quantity_text);
    standardize(parsed.amount, &parsed.unit)
}

/// Check whether a unit token is a recognized mass unit
pub fn is_mass_unit(unit: &str) -> bool {
    let key = unit.trim().trim_end_matches('.').to_lowercase();
    MASS_FACTORS.contains_key(key.as_str())
}
