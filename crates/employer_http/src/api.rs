//! HTTP handlers for the employer roster.
//!
//! # Responsibility
//! - Decode path ids and JSON payloads into service calls.
//! - Encode service outcomes as `200/201/204/400/404/500` responses.
//!
//! # Invariants
//! - Handlers never touch SQL; everything goes through `EmployerService`.
//! - Malformed path ids and bodies are `400`, never `422`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use employer_core::{core_version, Employer, EmployerId, EmployerPayload};
use log::{info, warn};
use serde_json::{json, Value};
use std::time::Instant;

/// Collection path; the created-record locator is built from it.
pub const EMPLOYERS_PATH: &str = "/employers";

/// `GET /employers`
pub async fn list_employers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employer>>, ApiError> {
    let employers = state
        .with_service(|service| service.list_employers())
        .await?;
    Ok(Json(employers))
}

/// `GET /employers/{id}`
pub async fn get_employer(
    State(state): State<AppState>,
    id: Result<Path<EmployerId>, PathRejection>,
) -> Result<Json<Employer>, ApiError> {
    let Path(id) = id?;
    let employer = state
        .with_service(move |service| service.get_employer(id))
        .await?;
    Ok(Json(employer))
}

/// `POST /employers`
///
/// Responds `201` with the stored record and a `Location` header for it.
pub async fn create_employer(
    State(state): State<AppState>,
    payload: Result<Json<EmployerPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let created = state
        .with_service(move |service| service.create_employer(payload))
        .await?;
    let location = format!("{EMPLOYERS_PATH}/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

/// `PUT /employers/{id}`
///
/// Full replace. The body must carry the same `id` as the path.
pub async fn update_employer(
    State(state): State<AppState>,
    id: Result<Path<EmployerId>, PathRejection>,
    payload: Result<Json<EmployerPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state
        .with_service(move |service| service.update_employer(id, payload))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /employers/{id}`
pub async fn delete_employer(
    State(state): State<AppState>,
    id: Result<Path<EmployerId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state
        .with_service(move |service| service.delete_employer(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": core_version(),
    }))
}

/// Emits one `http_request` event per request with method, path, status and duration.
pub async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();

    if status.is_server_error() {
        warn!(
            "event=http_request module=http status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=http status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    }

    response
}
