//! Patient endpoints: create, list (search + sort), update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::patient::{
    delete_patient, insert_patient, list_patients, update_patient, PatientListFilter, PatientSort,
};
use crate::models::{Patient, PatientPayload};

#[derive(Deserialize)]
pub struct PatientListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientResponse {
    pub success: bool,
    pub message: &'static str,
    pub patient_id: i64,
}

#[derive(Serialize)]
pub struct UpdatePatientResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePatientResponse {
    pub success: bool,
    pub message: &'static str,
    pub patient_id: i64,
}

/// `POST /api/patients`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<PatientPayload>,
) -> Result<(StatusCode, Json<CreatePatientResponse>), ApiError> {
    let patient = payload
        .validate_new()
        .map_err(|msg| ApiError::Validation(msg.into()))?;

    let conn = ctx.db.conn()?;
    let patient_id = insert_patient(&conn, &patient)?;
    tracing::debug!(patient_id, "patient created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePatientResponse {
            success: true,
            message: "Patient added successfully",
            patient_id,
        }),
    ))
}

/// `GET /api/patients` — optional `search` and `sort=field:direction`.
/// An unrecognized sort value is silently ignored. An empty result is an
/// empty array, filtered or not.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<PatientListQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let filter = PatientListFilter {
        search: query.search.filter(|s| !s.is_empty()),
        sort: query.sort.as_deref().and_then(PatientSort::parse),
    };

    let conn = ctx.db.conn()?;
    let patients = list_patients(&conn, &filter)?;
    Ok(Json(patients))
}

/// `PUT /api/patients/:id` — full replace of the editable fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(payload): Json<PatientPayload>,
) -> Result<Json<UpdatePatientResponse>, ApiError> {
    let id = parse_id(&id)?;
    let patient = payload
        .validate_update()
        .map_err(|msg| ApiError::Validation(msg.into()))?;

    let conn = ctx.db.conn()?;
    update_patient(&conn, id, &patient)?;

    Ok(Json(UpdatePatientResponse {
        success: true,
        message: "Patient updated successfully",
    }))
}

/// `DELETE /api/patients/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletePatientResponse>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.db.conn()?;
    delete_patient(&conn, id)?;

    Ok(Json(DeletePatientResponse {
        success: true,
        message: "Patient deleted successfully",
        patient_id: id,
    }))
}
