//! Typed column access over Polars DataFrames
//!
//! Stages read a column into plain Rust vectors, transform it, and write it
//! back in place. Reads never fail on cell contents: anything that cannot be
//! represented as the requested type becomes `None`.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Whether the frame has a column with this exact name
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Whether the column holds text (and therefore needs decoding before numeric use)
pub fn is_text_column(df: &DataFrame, name: &str) -> Result<bool> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    Ok(matches!(col.dtype(), DataType::String))
}

/// Read a column as numbers.
///
/// Text cells are trimmed and parsed; unparseable text, NaN and infinities
/// become `None`. Booleans read as 1.0/0.0.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    let values: Vec<Option<f64>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_number))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| if b { 1.0 } else { 0.0 }))
            .collect(),
        DataType::Null => vec![None; col.len()],
        dtype if dtype.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| n.is_finite()))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.and_then(parse_number))
                .collect()
        }
    };

    Ok(values)
}

/// Read a column as text, rendering numbers and booleans the way they print
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        DataType::Null => vec![None; col.len()],
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Replace (or append) a Float64 column
pub fn set_numeric(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))
        .with_context(|| format!("Failed to write column '{}'", name))?;
    Ok(())
}

/// Replace (or append) an Int64 column
pub fn set_integer(df: &mut DataFrame, name: &str, values: Vec<Option<i64>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))
        .with_context(|| format!("Failed to write column '{}'", name))?;
    Ok(())
}

/// Replace (or append) a String column
pub fn set_text(df: &mut DataFrame, name: &str, values: Vec<Option<String>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))
        .with_context(|| format!("Failed to write column '{}'", name))?;
    Ok(())
}

/// Strict numeric parse of a single cell
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
