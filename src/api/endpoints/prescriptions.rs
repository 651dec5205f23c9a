//! Prescription endpoints: create, list, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::prescription::{
    delete_prescription, insert_prescription, list_prescriptions,
};
use crate::models::{Prescription, PrescriptionPayload};

#[derive(Serialize)]
pub struct CreatePrescriptionResponse {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePrescriptionResponse {
    pub success: bool,
    pub message: &'static str,
    pub prescription_id: i64,
}

/// `POST /api/prescriptions` — validation runs in a fixed order (required
/// scalars, list shape, per-entry fields) before any storage call.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<PrescriptionPayload>,
) -> Result<(StatusCode, Json<CreatePrescriptionResponse>), ApiError> {
    let prescription = payload
        .validate()
        .map_err(|msg| ApiError::Validation(msg.into()))?;

    let conn = ctx.db.conn()?;
    let id = insert_prescription(&conn, &prescription)?;
    tracing::debug!(id, "prescription created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePrescriptionResponse {
            id,
            message: "Prescription created successfully",
        }),
    ))
}

/// `GET /api/prescriptions` — all prescriptions with the medications list
/// in structured form.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Prescription>>, ApiError> {
    let conn = ctx.db.conn()?;
    let prescriptions = list_prescriptions(&conn)?;
    Ok(Json(prescriptions))
}

/// `DELETE /api/prescriptions/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletePrescriptionResponse>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.db.conn()?;
    delete_prescription(&conn, id)?;

    Ok(Json(DeletePrescriptionResponse {
        success: true,
        message: "Prescription deleted successfully",
        prescription_id: id,
    }))
}
