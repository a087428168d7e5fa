//! Defensive extraction of a country record from the directory response.
//!
//! The response shape is a JSON array whose first element is the record.
//! Sub-fields are read leniently: a missing or wrong-typed field becomes
//! `None` (or empty) instead of failing the whole record.

use crate::{CountryDetail, Currency, FetchError, Result};
use serde_json::{Map, Value};

/// Extract the first record of a directory response
pub fn parse_response(body: &Value) -> Result<CountryDetail> {
    let first = body
        .as_array()
        .ok_or_else(|| FetchError::Parse("response is not an array".into()))?
        .first()
        .ok_or_else(|| FetchError::Parse("response array is empty".into()))?;

    let record = first
        .as_object()
        .ok_or_else(|| FetchError::Parse("first element is not an object".into()))?;

    Ok(parse_record(record))
}

/// Read every known sub-field of one record
pub fn parse_record(record: &Map<String, Value>) -> CountryDetail {
    CountryDetail {
        common_name: record
            .get("name")
            .and_then(|n| n.get("common"))
            .and_then(non_empty_str),
        capital: record.get("capital").and_then(first_capital),
        population: record.get("population").and_then(Value::as_u64),
        languages: record.get("languages").map(languages).unwrap_or_default(),
        currencies: record.get("currencies").map(currencies).unwrap_or_default(),
        region: record.get("region").and_then(non_empty_str),
        subregion: record.get("subregion").and_then(non_empty_str),
        area: record
            .get("area")
            .and_then(Value::as_f64)
            .filter(|a| a.is_finite() && *a >= 0.0),
        flag: record.get("flag").and_then(non_empty_str),
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Directory publishes capitals as a list; a bare string is accepted too
fn first_capital(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.first().and_then(non_empty_str),
        other => non_empty_str(other),
    }
}

fn languages(value: &Value) -> Vec<String> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::with_capacity(map.len());
    for name in map.values().filter_map(non_empty_str) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn currencies(value: &Value) -> Vec<Currency> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    map.values()
        .map(|c| Currency {
            name: c.get("name").and_then(non_empty_str),
            symbol: c.get("symbol").and_then(non_empty_str),
        })
        .collect()
}
