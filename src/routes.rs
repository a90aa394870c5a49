// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{feedback, survey},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Wires the survey and feedback endpoints.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    // The form is served from classroom screens and scanned into phone
    // browsers, so the API stays open to any origin.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let survey_routes = Router::new()
        .route("/questionnaire", get(survey::get_questionnaire))
        .route("/surveys", post(survey::submit_survey))
        .route("/feedback", get(feedback::get_feedback));

    Router::new()
        .nest("/api", survey_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
