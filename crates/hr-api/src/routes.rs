// ============================================================================
// HR API - Router
// File: crates/hr-api/src/routes.rs
// ============================================================================

use axum::{
    body::Body,
    http::Request,
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use hr_shared::constants::EMPLOYEE_LIST_PATH;

use crate::handlers::{auth, employees, health};
use crate::middleware::require_user;
use crate::state::AppState;

/// Builds the application router: employee pages behind the session check,
/// sign-in and health endpoints open.
pub fn build_router(state: AppState) -> Router {
    let employee_routes = Router::new()
        .route("/page", get(employees::employee_page))
        .route(
            "/create",
            get(employees::create_employee_page).post(employees::create_employee),
        )
        .route(
            "/edit/{id}",
            get(employees::edit_employee_page).post(employees::update_employee),
        )
        .route("/delete/{id}", post(employees::delete_employee))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let auth_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout));

    Router::new()
        .route("/", get(|| async { Redirect::to(EMPLOYEE_LIST_PATH) }))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/employees", employee_routes)
        .nest("/auth", auth_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
