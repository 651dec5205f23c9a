//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. The SPA frontend is served from a
//! different origin during development, so CORS is left permissive.

use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router with all routes under `/api/`.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            axum::routing::put(endpoints::patients::update).delete(endpoints::patients::remove),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route("/appointments/:id", delete(endpoints::appointments::remove))
        .route(
            "/prescriptions",
            get(endpoints::prescriptions::list).post(endpoints::prescriptions::create),
        )
        .route(
            "/prescriptions/:id",
            delete(endpoints::prescriptions::remove),
        )
        .route("/dashboard/stats", get(endpoints::dashboard::stats))
        .route(
            "/dashboard/patient-growth",
            get(endpoints::dashboard::patient_growth),
        )
        .route(
            "/dashboard/gender-distribution",
            get(endpoints::dashboard::gender_distribution),
        )
        .route(
            "/dashboard/recent-activity",
            get(endpoints::dashboard::recent_activity),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
