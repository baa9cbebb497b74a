//! survey-api
//!
//! HTTP surface of the survey service: submission, feedback queries and
//! feedback e-mail, plus the public instrument catalogue. Runs under the
//! Lambda runtime or as a plain server.

pub mod audit;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod submission;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Instruments (public schema data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route("/surveys/submit", post(routes::surveys::submit_survey))
        .route(
            "/surveys/{email}/feedback",
            get(routes::surveys::get_feedback),
        )
        .route(
            "/surveys/{email}/feedback/send",
            post(routes::surveys::send_feedback),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
