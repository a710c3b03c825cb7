//! Structured analysis contract enforcement
//!
//! The assistant is asked for a single JSON object:
//!
//! ```json
//! {
//!   "summary": "...",
//!   "themes": ["..."],
//!   "opportunities": ["..."],
//!   "experiments": ["..."],
//!   "prd_outline": ["..."]
//! }
//! ```
//!
//! `prd_outline` may be omitted; every other key is required.

use std::sync::OnceLock;

use insight_core::StructuredAnalysis;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ParseError;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?is)```(?:json)?\s*(\{.*?\})\s*```").expect("Invalid fence regex pattern")
    })
}

/// Object content of the first fenced block, if any
fn unfence(text: &str) -> &str {
    fence_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Parse and validate assistant text against the analysis contract.
pub fn validate_analysis(text: &str) -> Result<StructuredAnalysis, ParseError> {
    let candidate = unfence(text.trim());

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(ParseError::NotAnObject)?;

    let summary = required_string(object, "summary")?;
    let themes = required_list(object, "themes")?;
    let opportunities = required_list(object, "opportunities")?;
    let experiments = required_list(object, "experiments")?;
    let prd_outline = optional_list(object, "prd_outline")?;

    Ok(StructuredAnalysis {
        summary,
        themes,
        opportunities,
        experiments,
        prd_outline,
    })
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    let value = object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::field(field, "must be a string"))?
        .trim();

    if value.is_empty() {
        return Err(ParseError::field(field, "must not be empty"));
    }
    Ok(value.to_string())
}

fn required_list(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, ParseError> {
    let items = object
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::field(field, "must be a list of strings"))?;

    if items.is_empty() {
        return Err(ParseError::field(field, "must not be empty"));
    }
    string_items(items, field)
}

fn optional_list(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => string_items(items, field),
        Some(_) => Err(ParseError::field(field, "must be a list of strings")),
    }
}

fn string_items(items: &[Value], field: &'static str) -> Result<Vec<String>, ParseError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_str().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            Some(_) => Err(ParseError::field(
                field,
                format!("item {} must not be empty", index),
            )),
            None => Err(ParseError::field(
                field,
                format!("item {} must be a string", index),
            )),
        })
        .collect()
}
