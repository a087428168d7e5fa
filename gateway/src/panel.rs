//! Country detail panel.
//!
//! Merges the dataset row for the clicked country with the best-effort
//! directory record. Three shapes come out of here:
//!
//! - placeholder: nothing selected yet, or the code is not in the table
//! - enriched: directory record available
//! - fallback: directory unavailable, dataset fields only
//!
//! Composition never fails; missing remote sub-fields render as `Unknown`.

use country_data::{CountryRow, Dataset};
use country_info::{CountryDetail, CountryInfoSource, CountryLookup};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::format::{self, UNKNOWN};
use crate::markup::{div, h2, h3, p, Element, Node};

pub const PLACEHOLDER_TITLE: &str = "Country Information";
pub const PLACEHOLDER_HINT: &str = "Click on a country to see detailed information.";
pub const FALLBACK_HINT: &str = "Click another country to see its details.";

/// The country a click landed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickSelection {
    pub displayed_name: String,
    pub iso_code: String,
}

impl ClickSelection {
    pub fn new(displayed_name: impl Into<String>, iso_code: impl Into<String>) -> Self {
        Self {
            displayed_name: displayed_name.into(),
            iso_code: iso_code.into(),
        }
    }
}

pub struct PanelComposer {
    dataset: Arc<Dataset>,
    source: Arc<dyn CountryInfoSource>,
}

impl PanelComposer {
    pub fn new(dataset: Arc<Dataset>, source: Arc<dyn CountryInfoSource>) -> Self {
        Self { dataset, source }
    }

    pub async fn compose(&self, selection: Option<&ClickSelection>) -> Node {
        let Some(selection) = selection else {
            return placeholder();
        };

        let Some(row) = self.dataset.lookup(&selection.iso_code) else {
            warn!(iso_code = %selection.iso_code, "clicked country not in dataset");
            return placeholder();
        };

        let name = if selection.displayed_name.trim().is_empty() {
            row.name.as_str()
        } else {
            selection.displayed_name.as_str()
        };

        match self.source.fetch(&row.iso_code).await {
            CountryLookup::Found(detail) => {
                debug!(iso_code = %row.iso_code, "rendering enriched panel");
                enriched(name, row, &detail)
            }
            CountryLookup::Unavailable => {
                debug!(iso_code = %row.iso_code, "rendering fallback panel");
                fallback(name, row)
            }
        }
    }
}

/// Shown before any click
pub fn placeholder() -> Node {
    div()
        .child(h3(PLACEHOLDER_TITLE))
        .child(p(PLACEHOLDER_HINT))
        .into()
}

fn title(text: String) -> Element {
    h2(text).style("text-align", "center")
}

fn section(heading: &str, lines: Vec<String>) -> Element {
    div()
        .style("flex", "1")
        .style("padding", "10px")
        .child(h3(heading))
        .children(lines.into_iter().map(p))
}

fn economic_lines(row: &CountryRow) -> [String; 2] {
    [
        format!("GDP per Capita: {}", format::currency(row.gdp_per_capita)),
        format!(
            "Life Expectancy: {} years",
            format::one_decimal(row.life_expectancy)
        ),
    ]
}

/// Dataset row plus directory record
pub fn enriched(name: &str, row: &CountryRow, detail: &CountryDetail) -> Node {
    let heading = match detail.flag.as_deref() {
        Some(flag) => format!("{} {}", flag, name),
        None => name.to_string(),
    };

    let region = format!(
        "{} ({})",
        format::or_unknown(detail.region.as_deref()),
        format::or_unknown(detail.subregion.as_deref())
    );
    let area = detail
        .area
        .map(|a| format!("{} sq km", format::area(a)))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let population = detail
        .population
        .map(format::grouped)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let currencies = format::join_or_unknown(detail.currencies.iter().map(|c| {
        format!(
            "{} ({})",
            format::or_unknown(c.name.as_deref()),
            format::or_unknown(c.symbol.as_deref())
        )
    }));

    let geographic = section(
        "Geographic Information",
        vec![
            format!("Capital: {}", format::or_unknown(detail.capital.as_deref())),
            format!("Region: {}", region),
            format!("Area: {}", area),
        ],
    );
    let demographic = section(
        "Demographic Information",
        vec![
            format!("Population: {}", population),
            format!("Languages: {}", format::join_or_unknown(&detail.languages)),
            format!("Currencies: {}", currencies),
        ],
    );
    let economic = section("Economic Information", economic_lines(row).to_vec());

    div()
        .child(title(heading))
        .child(
            div()
                .style("display", "flex")
                .style("flex-wrap", "wrap")
                .child(geographic)
                .child(demographic)
                .child(economic),
        )
        .into()
}

/// Dataset row only, when the directory had nothing
pub fn fallback(name: &str, row: &CountryRow) -> Node {
    let [gdp, life] = economic_lines(row);

    div()
        .child(title(name.to_string()))
        .child(
            div()
                .child(h3("Basic Information"))
                .child(p(format!("Population: {}", format::grouped(row.population))))
                .child(p(gdp))
                .child(p(life))
                .child(p(FALLBACK_HINT)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_info::{Currency, Offline};

    fn brazil_row() -> CountryRow {
        CountryRow {
            name: "Brazil".into(),
            iso_code: "BRA".into(),
            gdp_per_capita: 9065.800825,
            life_expectancy: 72.39,
            population: 190_010_647,
        }
    }

    #[test]
    fn test_placeholder_content() {
        let panel = placeholder();
        assert_eq!(panel.text_lines(), vec![PLACEHOLDER_TITLE, PLACEHOLDER_HINT]);
    }

    #[test]
    fn test_enriched_defaults_to_unknown() {
        let panel = enriched("Brazil", &brazil_row(), &CountryDetail::default());

        assert!(panel.has_text("Brazil"));
        assert!(panel.has_text("Capital: Unknown"));
        assert!(panel.has_text("Region: Unknown (Unknown)"));
        assert!(panel.has_text("Area: Unknown"));
        assert!(panel.has_text("Population: Unknown"));
        assert!(panel.has_text("Languages: Unknown"));
        assert!(panel.has_text("Currencies: Unknown"));
        assert!(panel.has_text("GDP per Capita: $9,065.80"));
        assert!(panel.has_text("Life Expectancy: 72.4 years"));
    }

    #[test]
    fn test_enriched_partial_currency() {
        let detail = CountryDetail {
            currencies: vec![
                Currency { name: Some("Euro".into()), symbol: Some("€".into()) },
                Currency { name: None, symbol: Some("¤".into()) },
            ],
            languages: vec!["French".into(), "German".into()],
            area: Some(1234.5),
            ..CountryDetail::default()
        };
        let panel = enriched("X", &brazil_row(), &detail);

        assert!(panel.has_text("Currencies: Euro (€), Unknown (¤)"));
        assert!(panel.has_text("Languages: French, German"));
        assert!(panel.has_text("Area: 1,234.5 sq km"));
    }

    #[test]
    fn test_fallback_uses_dataset_only() {
        let panel = fallback("Brazil", &brazil_row());

        assert!(panel.has_text("Brazil"));
        assert!(panel.has_text("Basic Information"));
        assert!(panel.has_text("Population: 190,010,647"));
        assert!(panel.has_text("GDP per Capita: $9,065.80"));
        assert!(panel.has_text("Life Expectancy: 72.4 years"));
        assert!(panel.has_text(FALLBACK_HINT));
        for field in ["Capital:", "Region:", "Languages:", "Currencies:", "Area:"] {
            assert!(!panel.has_text_prefix(field), "unexpected {field}");
        }
    }

    #[tokio::test]
    async fn test_unknown_code_renders_placeholder() {
        let dataset = Arc::new(Dataset::load_embedded().unwrap());
        let composer = PanelComposer::new(dataset, Arc::new(Offline));

        let panel = composer.compose(Some(&ClickSelection::new("Atlantis", "ATL"))).await;
        assert_eq!(panel, placeholder());
    }

    #[tokio::test]
    async fn test_empty_displayed_name_uses_dataset_name() {
        let dataset = Arc::new(Dataset::load_embedded().unwrap());
        let composer = PanelComposer::new(dataset, Arc::new(Offline));

        let panel = composer.compose(Some(&ClickSelection::new("", "JPN"))).await;
        assert!(panel.has_text("Japan"));
    }
}
