//! Data loading from JSON files

use crate::{CountryRow, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Normalize an ISO alpha-3 code, rejecting anything that is not 3 ASCII letters
pub fn normalize_iso_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Raw country row from JSON (Gapminder column names)
#[derive(Debug, Deserialize)]
struct RawCountry {
    country: Option<String>,
    iso_alpha: Option<String>,
    #[serde(rename = "gdp_percap")]
    gdp_per_capita: Option<f64>,
    #[serde(rename = "life_exp")]
    life_expectancy: Option<f64>,
    #[serde(rename = "pop")]
    population: Option<u64>,
}

/// Container for the dataset JSON
#[derive(Debug, Deserialize)]
struct DatasetFile {
    year: i32,
    countries: Vec<RawCountry>,
}

/// Read and validate rows from a JSON file
pub fn read_rows(path: impl AsRef<Path>) -> Result<(i32, Vec<CountryRow>)> {
    let path = path.as_ref();
    info!("Loading country dataset from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: DatasetFile = serde_json::from_reader(reader)?;

    Ok(validate(raw))
}

/// Parse and validate rows from a JSON document
pub fn parse_rows(json: &str) -> Result<(i32, Vec<CountryRow>)> {
    let raw: DatasetFile = serde_json::from_str(json)?;
    Ok(validate(raw))
}

fn validate(raw: DatasetFile) -> (i32, Vec<CountryRow>) {
    let mut rows = Vec::with_capacity(raw.countries.len());
    let mut skipped = 0;

    for (i, country) in raw.countries.into_iter().enumerate() {
        let Some(iso_code) = country.iso_alpha.as_deref().and_then(normalize_iso_code) else {
            debug!("Skipping row {}: missing or malformed ISO code", i);
            skipped += 1;
            continue;
        };

        let name = match country.country {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => {
                debug!("Skipping {}: missing country name", iso_code);
                skipped += 1;
                continue;
            }
        };

        let (gdp_per_capita, life_expectancy, population) =
            match (country.gdp_per_capita, country.life_expectancy, country.population) {
                (Some(gdp), Some(life), Some(pop))
                    if is_valid_measure(gdp) && is_valid_measure(life) =>
                {
                    (gdp, life, pop)
                }
                _ => {
                    debug!("Skipping {}: missing or invalid measures", iso_code);
                    skipped += 1;
                    continue;
                }
            };

        rows.push(CountryRow {
            name,
            iso_code,
            gdp_per_capita,
            life_expectancy,
            population,
        });
    }

    info!(
        "Loaded {} countries for {} ({} skipped)",
        rows.len(),
        raw.year,
        skipped
    );

    (raw.year, rows)
}
