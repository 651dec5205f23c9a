//! Appointment endpoints: create, list, delete. No update route exists.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::appointment::{
    delete_appointment, insert_appointment, list_appointments,
};
use crate::models::{Appointment, AppointmentPayload};

#[derive(Serialize)]
pub struct CreateAppointmentResponse {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAppointmentResponse {
    pub success: bool,
    pub message: &'static str,
    pub appointment_id: i64,
}

/// `POST /api/appointments` — patient_id, date and time are required; a
/// patient_id with no matching patient still fails in storage on the
/// foreign key and surfaces as a 500.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), ApiError> {
    let appointment = payload
        .validate()
        .map_err(|msg| ApiError::Validation(msg.into()))?;

    let conn = ctx.db.conn()?;
    let id = insert_appointment(&conn, &appointment)?;
    tracing::debug!(id, "appointment created");

    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse {
            id,
            message: "Appointment created successfully",
        }),
    ))
}

/// `GET /api/appointments` — all appointments, no filters.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Appointment>>, ApiError> {
    let conn = ctx.db.conn()?;
    let appointments = list_appointments(&conn)?;
    Ok(Json(appointments))
}

/// `DELETE /api/appointments/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAppointmentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.db.conn()?;
    delete_appointment(&conn, id)?;

    Ok(Json(DeleteAppointmentResponse {
        success: true,
        message: "Appointment deleted successfully",
        appointment_id: id,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::endpoints::testutil::{body_json, send, test_router};

    async fn seed_patient(router: &axum::Router) -> i64 {
        let response = send(
            router,
            "POST",
            "/api/patients",
            Some(json!({
                "first_name": "John",
                "last_name": "Doe",
                "date_of_birth": "1990-01-15",
                "gender": "Male"
            })),
        )
        .await;
        body_json(response).await["patientId"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_id() {
        let (router, _db) = test_router();
        let patient_id = seed_patient(&router).await;

        let response = send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({
                "patient_id": patient_id,
                "date": "2024-12-25",
                "time": "10:00:00",
                "duration": 30,
                "purpose": "Regular checkup"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["id"].as_i64().unwrap() > 0);
        assert_eq!(body["message"], "Appointment created successfully");
    }

    #[tokio::test]
    async fn create_without_patient_id_returns_400() {
        let (router, _db) = test_router();
        let response = send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({"date": "2024-12-25", "time": "10:00:00"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn create_with_unknown_patient_returns_500() {
        let (router, _db) = test_router();
        let response = send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({
                "patient_id": 99999,
                "date": "2024-12-25",
                "time": "10:00:00"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Database operation failed");
    }

    #[tokio::test]
    async fn list_returns_created_rows() {
        let (router, _db) = test_router();
        let patient_id = seed_patient(&router).await;
        send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({
                "patient_id": patient_id,
                "date": "2024-12-25",
                "time": "10:00:00"
            })),
        )
        .await;

        let response = send(&router, "GET", "/api/appointments", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["patient_id"], patient_id);
        assert_eq!(rows[0]["time"], "10:00:00");
    }

    #[tokio::test]
    async fn empty_list_is_200_with_empty_array() {
        let (router, _db) = test_router();
        let response = send(&router, "GET", "/api/appointments", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn delete_roundtrip_and_miss() {
        let (router, _db) = test_router();
        let patient_id = seed_patient(&router).await;
        let created = body_json(
            send(
                &router,
                "POST",
                "/api/appointments",
                Some(json!({
                    "patient_id": patient_id,
                    "date": "2024-12-25",
                    "time": "10:00:00"
                })),
            )
            .await,
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let response = send(&router, "DELETE", &format!("/api/appointments/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["appointmentId"], id);

        let response = send(&router, "DELETE", &format!("/api/appointments/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Appointment not found");
    }

    #[tokio::test]
    async fn delete_with_non_numeric_id_returns_500() {
        let (router, _db) = test_router();
        let response = send(&router, "DELETE", "/api/appointments/invalid", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
