//! Choropleth figure for the world map.
//!
//! Serializes to the Plotly figure schema (`{data, layout}`) so the browser
//! can hand it straight to `Plotly.react`. The only data-dependent parts are
//! the trace arrays; all geographic styling is fixed.

use country_data::Dataset;
use serde::Serialize;

/// Plotly's sequential Plasma scale
pub const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786",
    "#d8576b", "#ed7953", "#fb9f3a", "#fdca26", "#f0f921",
];

pub const COLOR_BAR_TITLE: &str = "GDP per Capita";
pub const PROJECTION: &str = "natural earth";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locationmode: &'static str,
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub hovertext: Vec<String>,
    pub hovertemplate: &'static str,
    pub colorscale: Vec<(f64, &'static str)>,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
    pub thickness: u32,
    pub len: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub margin: Margin,
    pub geo: Geo,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub showcountries: bool,
    pub showcoastlines: bool,
    pub showland: bool,
    pub landcolor: &'static str,
    pub countrycolor: &'static str,
    pub coastlinecolor: &'static str,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

fn plasma_scale() -> Vec<(f64, &'static str)> {
    let last = (PLASMA.len() - 1) as f64;
    PLASMA
        .iter()
        .enumerate()
        .map(|(i, color)| (i as f64 / last, *color))
        .collect()
}

/// Build the map from the full table, coloured by GDP per capita
pub fn render(dataset: &Dataset) -> Figure {
    let rows = dataset.rows();

    let trace = ChoroplethTrace {
        kind: "choropleth",
        locationmode: "ISO-3",
        locations: rows.iter().map(|r| r.iso_code.clone()).collect(),
        z: rows.iter().map(|r| r.gdp_per_capita).collect(),
        hovertext: rows.iter().map(|r| r.name.clone()).collect(),
        hovertemplate: "<b>%{hovertext}</b><br>gdpPercap=%{z}<extra></extra>",
        colorscale: plasma_scale(),
        colorbar: ColorBar {
            title: Title { text: COLOR_BAR_TITLE },
            thickness: 15,
            len: 0.5,
            y: 0.5,
        },
    };

    Figure {
        data: vec![trace],
        layout: FigureLayout {
            margin: Margin { r: 0, t: 0, l: 0, b: 0 },
            geo: Geo {
                showcountries: true,
                showcoastlines: true,
                showland: true,
                landcolor: "lightgray",
                countrycolor: "white",
                coastlinecolor: "white",
                projection: Projection { kind: PROJECTION },
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::CountryRow;

    fn small_dataset() -> Dataset {
        let rows = vec![
            CountryRow {
                name: "Brazil".into(),
                iso_code: "BRA".into(),
                gdp_per_capita: 9065.800825,
                life_expectancy: 72.39,
                population: 190_010_647,
            },
            CountryRow {
                name: "Japan".into(),
                iso_code: "JPN".into(),
                gdp_per_capita: 31656.06806,
                life_expectancy: 82.603,
                population: 127_467_972,
            },
        ];
        Dataset::from_rows(2007, rows).unwrap()
    }

    #[test]
    fn test_trace_keyed_by_iso() {
        let figure = render(&small_dataset());
        let trace = &figure.data[0];

        assert_eq!(trace.locations, vec!["BRA", "JPN"]);
        assert_eq!(trace.z, vec![9065.800825, 31656.06806]);
        assert_eq!(trace.hovertext, vec!["Brazil", "Japan"]);
    }

    #[test]
    fn test_full_table_rendered() {
        let dataset = Dataset::load_embedded().unwrap();
        let figure = render(&dataset);
        assert_eq!(figure.data[0].locations.len(), dataset.len());
    }

    #[test]
    fn test_fixed_styling_serialized() {
        let json = serde_json::to_value(render(&small_dataset())).unwrap();

        assert_eq!(json["data"][0]["type"], "choropleth");
        assert_eq!(json["data"][0]["colorscale"][0][0], 0.0);
        assert_eq!(json["data"][0]["colorscale"][0][1], "#0d0887");
        assert_eq!(json["data"][0]["colorscale"][9][0], 1.0);
        assert_eq!(json["data"][0]["colorbar"]["title"]["text"], "GDP per Capita");
        assert_eq!(json["data"][0]["colorbar"]["thickness"], 15);
        assert_eq!(json["layout"]["margin"]["t"], 0);
        assert_eq!(json["layout"]["geo"]["landcolor"], "lightgray");
        assert_eq!(json["layout"]["geo"]["projection"]["type"], "natural earth");
    }
}
