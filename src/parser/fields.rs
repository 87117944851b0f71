//! Per-field validation and conversion for delimited feed lines.
//!
//! Mandatory variants fail with [`IngestError::FieldValidation`] on an
//! empty/blank token and [`IngestError::FieldFormat`] on a non-blank token
//! that does not parse. Lenient `*_or` variants swallow both failures and
//! yield the caller's default, which is how sentinel-bearing optional fields
//! are handled.

use crate::error::{IngestError, Result};

/// Strips every double quote, then trims surrounding whitespace.
fn trim_and_unquote(token: &str) -> String {
    token.replace('"', "").trim().to_string()
}

/// Rejects empty/blank tokens before any conversion is attempted.
fn validate(token: &str, target: &'static str) -> Result<String> {
    if token.trim().is_empty() {
        return Err(IngestError::FieldValidation { target });
    }
    Ok(trim_and_unquote(token))
}

pub fn parse_f64(token: &str) -> Result<f64> {
    let cleaned = validate(token, "f64")?;
    cleaned.parse().map_err(|_| IngestError::FieldFormat {
        target: "f64",
        token: cleaned,
    })
}

pub fn parse_i32(token: &str) -> Result<i32> {
    let cleaned = validate(token, "i32")?;
    cleaned.parse().map_err(|_| IngestError::FieldFormat {
        target: "i32",
        token: cleaned,
    })
}

pub fn parse_u32(token: &str) -> Result<u32> {
    let cleaned = validate(token, "u32")?;
    cleaned.parse().map_err(|_| IngestError::FieldFormat {
        target: "u32",
        token: cleaned,
    })
}

pub fn parse_i64(token: &str) -> Result<i64> {
    let cleaned = validate(token, "i64")?;
    cleaned.parse().map_err(|_| IngestError::FieldFormat {
        target: "i64",
        token: cleaned,
    })
}

pub fn parse_text(token: &str) -> Result<String> {
    validate(token, "text")
}

pub fn parse_f64_or(token: &str, default: f64) -> f64 {
    parse_f64(token).unwrap_or(default)
}

pub fn parse_i32_or(token: &str, default: i32) -> i32 {
    parse_i32(token).unwrap_or(default)
}

pub fn parse_u32_or(token: &str, default: u32) -> u32 {
    parse_u32(token).unwrap_or(default)
}

/// Lenient text: `None` for empty/blank tokens.
pub fn parse_text_opt(token: &str) -> Option<String> {
    if token.trim().is_empty() {
        None
    } else {
        Some(trim_and_unquote(token))
    }
}

/// Splits one line at commas, treating commas inside double-quoted spans as
/// literal. Trailing empty fields are preserved. Quote characters stay in the
/// tokens; the field parsers strip them.
pub fn split_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}
