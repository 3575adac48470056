use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::engine::{AnalysisRecord, DecisionEngine, ListingInput, StudentProfile};

/// Router builder exposing the analysis endpoint over a shared engine.
pub fn analysis_router(engine: Arc<DecisionEngine>) -> Router {
    Router::new()
        .route("/api/v1/analysis", post(analyze_handler))
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub profile: StudentProfile,
    #[serde(default)]
    pub listings: Vec<ListingInput>,
    /// Optional pinned evaluation date, echoed in the response; defaults to
    /// the server's local date. The engine itself is date-free, so replays
    /// with a pinned date are byte-stable.
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub evaluated_on: NaiveDate,
    pub listing_count: usize,
    pub profile_summary: String,
    pub internships: Vec<AnalysisRecord>,
}

pub(crate) async fn analyze_handler(
    State(engine): State<Arc<DecisionEngine>>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    let evaluated_on = request
        .evaluated_on
        .unwrap_or_else(|| Local::now().date_naive());

    match engine.run(&request.profile, &request.listings) {
        Ok(report) => {
            let response = AnalysisResponse {
                evaluated_on,
                listing_count: report.internships.len(),
                profile_summary: report.profile_summary,
                internships: report.internships,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
