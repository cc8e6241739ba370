pub mod client;
pub mod error;

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tower_http::cors::CorsLayer;

use shared::{AnalysisRequest, AnalysisResult, Coordinate, bounds::AREA_OF_INTEREST};

use crate::client::AnalysisClient;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<AnalysisClient>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Forward one analysis request to the remote service. Service-side failures
/// come back as tagged data with a 200, since the fallback policy lives in
/// the frontend; only a coordinate outside the area of interest is an actual
/// request error.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let coord = Coordinate {
        lat: req.latitude,
        lon: req.longitude,
    };
    if !AREA_OF_INTEREST.contains(coord) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                message: format!(
                    "coordinates ({:.2}, {:.2}) are outside the area of interest",
                    coord.lat, coord.lon
                ),
            }),
        ));
    }

    tracing::debug!("analyzing lat={:.2} lon={:.2}", coord.lat, coord.lon);
    let result = state.client.analyze(coord).await;
    if let AnalysisResult::Success { percentage } = result {
        tracing::info!(
            "analysis for ({:.2}, {:.2}) -> {percentage:.2}%",
            coord.lat,
            coord.lon
        );
    }

    Ok(Json(result))
}

#[derive(serde::Serialize)]
pub struct ApiError {
    pub message: String,
}
