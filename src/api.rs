use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info, instrument};

use crate::db::TemperatureStats;
use crate::services::ClimateService;

#[derive(Clone)]
pub struct AppState {
    pub climate_service: ClimateService,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/start/{start}", get(temperature_stats_from))
        .route("/start_end/{start}/{end}", get(temperature_stats_between))
        .with_state(state);

    Router::new()
        .route("/", get(home))
        .nest("/api/v1.0", api_routes)
}

/// Human-readable index of the available routes.
async fn home() -> Html<&'static str> {
    Html(
        "Welcome to the Hawaii Climate API!<br/>\
         Available Routes:<br/>\
         /api/v1.0/precipitation<br/>\
         /api/v1.0/stations<br/>\
         /api/v1.0/tobs<br/>\
         /api/v1.0/start/<start><br/>\
         /api/v1.0/start_end/<start>/<end>",
    )
}

#[instrument(skip(state))]
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, StatusCode> {
    debug!("Fetching precipitation for the final year of the dataset");
    let precipitation = state
        .climate_service
        .precipitation_last_year()
        .await
        .map_err(|e| {
            error!("Failed to fetch precipitation readings: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved precipitation for {} dates", precipitation.len());

    Ok(Json(precipitation))
}

#[instrument(skip(state))]
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, StatusCode> {
    debug!("Fetching station list");
    let stations = state.climate_service.station_ids().await.map_err(|e| {
        error!("Failed to fetch stations: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Retrieved {} stations", stations.len());

    Ok(Json(stations))
}

#[instrument(skip(state))]
async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, StatusCode> {
    debug!("Fetching temperature observations for the most active station");
    let observations = state
        .climate_service
        .temperature_observations_last_year()
        .await
        .map_err(|e| {
            error!("Failed to fetch temperature observations: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!(
        "Retrieved temperature observations for {} dates",
        observations.len()
    );

    Ok(Json(observations))
}

#[instrument(skip(state), fields(start = %start))]
async fn temperature_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    debug!("Fetching temperature stats from {} onward", start);
    let stats = state
        .climate_service
        .temperature_stats(&start, None)
        .await
        .map_err(|e| {
            error!("Failed to fetch temperature stats from {}: {}", start, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Computed temperature stats from {} onward", start);

    Ok(Json(stats))
}

#[instrument(skip(state), fields(start = %start, end = %end))]
async fn temperature_stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    debug!("Fetching temperature stats between {} and {}", start, end);
    let stats = state
        .climate_service
        .temperature_stats(&start, Some(&end))
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch temperature stats between {} and {}: {}",
                start, end, e
            );
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Computed temperature stats between {} and {}", start, end);

    Ok(Json(stats))
}
