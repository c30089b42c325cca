use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::models::message::{ProvisionMessage, UpdateMessage};
use crate::models::status::StatusRecord;
use crate::processor::TelemetryService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TelemetryService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/ambulance/update", post(update_ambulance))
        .route("/api/ambulance/status", get(ambulance_status))
        .route("/api/admin/ambulance", post(provision_ambulance))
        .route("/api/admin/ambulance/:ambulance_id", delete(remove_ambulance))
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::MalformedBody(rejection.body_text()))
        }
    }
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Ambulance telemetry API is running" }))
}

/// `POST /api/ambulance/update`
pub async fn update_ambulance(
    State(state): State<AppState>,
    payload: Result<Json<UpdateMessage>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body(payload)?;
    state.service.ingest(message, Utc::now()).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Data updated" }))))
}

/// `GET /api/ambulance/status`
pub async fn ambulance_status(State(state): State<AppState>) -> Result<Json<Vec<StatusRecord>>, ApiError> {
    let fleet = state.service.fleet_status(Utc::now()).await?;
    Ok(Json(fleet))
}

/// `POST /api/admin/ambulance`
pub async fn provision_ambulance(
    State(state): State<AppState>,
    payload: Result<Json<ProvisionMessage>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body(payload)?;

    if state.service.provision(message, Utc::now()).await? {
        Ok((StatusCode::CREATED, Json(json!({ "message": "Ambulance added" }))))
    } else {
        Ok((StatusCode::OK, Json(json!({ "message": "Ambulance already exists" }))))
    }
}

/// `DELETE /api/admin/ambulance/:ambulance_id`
pub async fn remove_ambulance(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.remove(&ambulance_id).await?;
    Ok(Json(json!({ "message": "Ambulance removed" })))
}
