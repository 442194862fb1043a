// ============================================================================
// HR API - Auth Handlers
// File: crates/hr-api/src/handlers/auth.rs
// ============================================================================
//! Sign-in and sign-out (GET/POST /auth/login, POST /auth/logout)

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde_json::json;

use hr_core::DomainError;
use hr_shared::constants::{EMPLOYEE_LIST_PATH, LOGIN_PATH};

use crate::dto::LoginForm;
use crate::error::WebError;
use crate::middleware::auth::{clear_session_cookie, session_cookie};
use crate::state::AppState;
use crate::views;

/// Login page - GET /auth/login
pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    render_login(&state, "", &[])
}

/// Login handler - POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return render_login(&state, username, &["Username and password are required"])
            .map(IntoResponse::into_response);
    }

    match state.auth_service().login(username, &form.password).await {
        Ok(session) => {
            let cookie = session_cookie(&state.session, &session.token, state.jwt.session_ttl_secs())
                .map_err(|e| WebError::InternalError(e.to_string()))?;

            tracing::info!(employee_id = session.employee_id, "Session started");
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to(EMPLOYEE_LIST_PATH),
            )
                .into_response())
        }
        Err(DomainError::InvalidCredentials) => {
            render_login(&state, username, &["Invalid username or password"])
                .map(IntoResponse::into_response)
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout handler - POST /auth/logout
pub async fn logout(State(state): State<AppState>) -> Result<Response, WebError> {
    let cookie = clear_session_cookie(&state.session)
        .map_err(|e| WebError::InternalError(e.to_string()))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response())
}

fn render_login(state: &AppState, username: &str, errors: &[&str]) -> Result<Html<String>, WebError> {
    state.render(
        views::LOGIN,
        &json!({
            "username": username,
            "errors": errors,
        }),
    )
}
