use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use country_data::CountryRow;
use serde::Serialize;

use crate::app::AppState;
use crate::controller::{DispatchResult, UiEvent};
use crate::figure::{self, Figure};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "world-map-dashboard",
        "countries": state.dataset.len(),
        "year": state.dataset.year(),
        "started_at": state.started_at.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// The choropleth without any interaction
pub async fn get_figure(State(state): State<AppState>) -> Json<Figure> {
    Json(figure::render(&state.dataset))
}

/// Dataset row for one ISO alpha-3 code
pub async fn get_country(
    State(state): State<AppState>,
    Path(iso_code): Path<String>,
) -> Result<Json<CountryRow>, (StatusCode, Json<ErrorResponse>)> {
    match state.dataset.lookup(&iso_code) {
        Some(row) => Ok(Json(row.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Country not found: {}", iso_code),
            }),
        )),
    }
}

/// Deliver one page event to the controller
pub async fn post_event(
    State(state): State<AppState>,
    Json(event): Json<UiEvent>,
) -> Json<DispatchResult> {
    Json(state.controller.dispatch(event).await)
}
