pub mod appointments;
pub mod dashboard;
pub mod health;
pub mod patients;
pub mod prescriptions;

use crate::api::error::ApiError;

/// Parse a path id. A non-numeric id is treated like any other value the
/// storage layer cannot match against a row: the operation fails, not the
/// request parsing. Keeps `/appointments/invalid` behaving like the
/// previous backend (500, not 400).
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::Storage(format!("invalid id '{raw}': {e}")))
}

#[cfg(test)]
pub(crate) mod testutil {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response};
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::router::api_router;
    use crate::api::types::ApiContext;
    use crate::db::Database;

    /// Router over a fresh in-memory database.
    pub fn test_router() -> (Router, Database) {
        let db = Database::open_in_memory().expect("in-memory db");
        let router = api_router(ApiContext::new(db.clone()));
        (router, db)
    }

    pub async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
