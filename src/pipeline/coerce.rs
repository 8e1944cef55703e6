//! Lenient numeric coercion for demographic fields
//!
//! Survey exports often carry demographics as text: CGPA bands such as
//! `"3.00 - 3.49"`, or study years such as `"year 2"`. These are read as the
//! band midpoint or the embedded number; anything else becomes missing.

use anyhow::Result;
use polars::prelude::*;

use super::schema::CanonicalField;
use super::values::{has_column, is_text_column, numeric_values, parse_number, set_numeric, text_values};

/// Demographic fields stored as numbers
pub const NUMERIC_DEMOGRAPHICS: [CanonicalField; 3] = [
    CanonicalField::Age,
    CanonicalField::YearOfStudy,
    CanonicalField::Cgpa,
];

/// Parse a plain number, a `low - high` band (midpoint), or the first number in the text
pub fn parse_lenient_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if let Some(n) = parse_number(trimmed) {
        return Some(n);
    }

    if let Some((low, high)) = trimmed.split_once(" - ").or_else(|| trimmed.split_once('-')) {
        if let (Some(low), Some(high)) = (parse_number(low), parse_number(high)) {
            return Some((low + high) / 2.0);
        }
    }

    embedded_numbers(trimmed).first().copied()
}

fn embedded_numbers(text: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_digit() || (ch == '.' && !current.is_empty()) {
            current.push(ch);
        } else if !current.is_empty() {
            if let Some(n) = parse_number(current.trim_end_matches('.')) {
                numbers.push(n);
            }
            current.clear();
        }
    }
    if let Some(n) = parse_number(current.trim_end_matches('.')) {
        numbers.push(n);
    }

    numbers
}

/// Coerce age, year of study and CGPA columns to numbers in place.
///
/// Text columns go through [`parse_lenient_number`]; numeric columns are cast.
pub fn coerce_demographics(df: &mut DataFrame) -> Result<()> {
    for field in NUMERIC_DEMOGRAPHICS {
        let name = field.name();
        if !has_column(df, name) {
            continue;
        }

        let values = if is_text_column(df, name)? {
            text_values(df, name)?
                .into_iter()
                .map(|v| v.as_deref().and_then(parse_lenient_number))
                .collect()
        } else {
            numeric_values(df, name)?
        };
        set_numeric(df, name, values)?;
    }

    Ok(())
}
