//! World Map Dashboard
//!
//! Serves a single page with a GDP-per-capita choropleth and a detail panel.
//! Clicking a country posts the click to `/api/v1/events`, where the
//! interaction controller redraws the map and composes the panel from the
//! local 2007 dataset plus a best-effort REST Countries lookup.

pub mod app;
pub mod config;
pub mod controller;
pub mod figure;
pub mod format;
pub mod layout;
pub mod markup;
pub mod panel;
pub mod routes;

pub use app::{App, AppHandle, AppState};
pub use config::Settings;
