//! Country Dataset
//!
//! Fixed, read-only table of countries for a single reference year
//! (Gapminder 2007). The table is compiled into the binary and parsed once
//! at startup; afterwards it is only ever read, so it can be shared behind
//! an `Arc` without locking.
//!
//! # Usage
//!
//! ```rust,ignore
//! let dataset = Dataset::load_embedded()?;
//! let brazil = dataset.lookup("BRA").expect("present");
//! assert_eq!(brazil.name, "Brazil");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub mod loader;

/// Gapminder 2007 table shipped with the dashboard
pub const EMBEDDED_DATASET: &str = include_str!("../data/gapminder_2007.json");

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate ISO code in dataset: {0}")]
    DuplicateIsoCode(String),
    #[error("Dataset contains no valid rows")]
    Empty,
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// One country for the reference year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRow {
    pub name: String,
    /// ISO 3166-1 alpha-3, upper case
    pub iso_code: String,
    pub gdp_per_capita: f64,
    pub life_expectancy: f64,
    pub population: u64,
}

/// Read-only country table keyed by ISO alpha-3 code
#[derive(Debug, Clone)]
pub struct Dataset {
    year: i32,
    rows: Vec<CountryRow>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Parse the table compiled into the binary
    pub fn load_embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    /// Parse a table from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let (year, rows) = loader::parse_rows(json)?;
        Self::from_rows(year, rows)
    }

    /// Parse a table from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let (year, rows) = loader::read_rows(path)?;
        Self::from_rows(year, rows)
    }

    /// Build from already-validated rows. Rejects duplicates and empty tables.
    pub fn from_rows(year: i32, rows: Vec<CountryRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.iso_code.clone(), i).is_some() {
                return Err(DatasetError::DuplicateIsoCode(row.iso_code.clone()));
            }
        }

        Ok(Self { year, rows, index })
    }

    /// Find the row for an ISO alpha-3 code (case-insensitive)
    pub fn lookup(&self, iso_code: &str) -> Option<&CountryRow> {
        let key = iso_code.trim().to_ascii_uppercase();
        self.index.get(&key).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, iso_code: &str) -> bool {
        self.lookup(iso_code).is_some()
    }

    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, iso: &str) -> CountryRow {
        CountryRow {
            name: name.to_string(),
            iso_code: iso.to_string(),
            gdp_per_capita: 1000.0,
            life_expectancy: 70.0,
            population: 1_000_000,
        }
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::load_embedded().unwrap();
        assert_eq!(dataset.year(), 2007);
        assert_eq!(dataset.len(), 142);

        let brazil = dataset.lookup("BRA").unwrap();
        assert_eq!(brazil.name, "Brazil");
        assert_eq!(brazil.population, 190_010_647);
        assert!((brazil.gdp_per_capita - 9065.800825).abs() < 1e-6);
        assert!((brazil.life_expectancy - 72.39).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dataset = Dataset::load_embedded().unwrap();
        assert_eq!(dataset.lookup("usa").unwrap().name, "United States");
        assert_eq!(dataset.lookup(" Jpn ").unwrap().name, "Japan");
    }

    #[test]
    fn test_lookup_missing_code() {
        let dataset = Dataset::load_embedded().unwrap();
        // Russia is not part of the 2007 Gapminder table
        assert!(dataset.lookup("RUS").is_none());
        assert!(dataset.lookup("").is_none());
        assert!(!dataset.contains("XXX"));
    }

    #[test]
    fn test_duplicate_iso_rejected() {
        let err = Dataset::from_rows(2007, vec![row("A", "AAA"), row("B", "AAA")]).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateIsoCode(code) if code == "AAA"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Dataset::from_rows(2007, Vec::new()), Err(DatasetError::Empty)));
    }
}
