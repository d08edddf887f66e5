use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::models::PipelineResult;
use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingRequest {
    pub raw_text: String,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/process_meeting", post(process_meeting_json))
        .route("/process_meeting/upload", post(process_meeting_upload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "meetpipe"
    }))
}

async fn process_meeting_json(
    State(state): State<ApiState>,
    Json(request): Json<MeetingRequest>,
) -> Result<Json<PipelineResult>, (StatusCode, Json<Value>)> {
    run_pipeline(&state, &request.raw_text).await
}

/// Accepts a transcript as a multipart file upload. Bytes are decoded as
/// lossy UTF-8 so a stray invalid byte never rejects an otherwise readable
/// transcript.
async fn process_meeting_upload(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineResult>, (StatusCode, Json<Value>)> {
    let mut raw_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Failed to read uploaded file: {}", e)))?;
        raw_text = Some(String::from_utf8_lossy(&bytes).into_owned());
        break;
    }

    let Some(raw_text) = raw_text else {
        return Err(bad_request("No transcript file in request".to_string()));
    };

    run_pipeline(&state, &raw_text).await
}

async fn run_pipeline(
    state: &ApiState,
    raw_text: &str,
) -> Result<Json<PipelineResult>, (StatusCode, Json<Value>)> {
    match state.pipeline.process_meeting(raw_text).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Pipeline run failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal error while processing meeting"})),
            ))
        }
    }
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
}
