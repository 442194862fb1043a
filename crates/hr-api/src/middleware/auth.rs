// ============================================================================
// HR API - Session Middleware
// File: crates/hr-api/src/middleware/auth.rs
// ============================================================================
//! Cookie-backed sessions for the HTML pages
//!
//! [`require_user`] reads the session cookie, validates the JWT inside it and
//! stores a [`CurrentUser`] in the request extensions. Browsers without a
//! valid session are redirected to the sign-in page.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use hr_shared::constants::LOGIN_PATH;

use crate::state::{AppState, SessionSettings};

/// Signed-in employee, available to handlers via `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

pub async fn require_user(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = read_cookie(req.headers(), &state.session.cookie_name) else {
        tracing::debug!(uri = %req.uri(), "No session cookie, redirecting to sign-in");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let claims = match state.jwt.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Rejected session token");
            return Redirect::to(LOGIN_PATH).into_response();
        }
    };

    let id = match claims.employee_id() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Session token has a malformed subject");
            return Redirect::to(LOGIN_PATH).into_response();
        }
    };

    req.extensions_mut().insert(CurrentUser {
        id,
        username: claims.username,
    });
    next.run(req).await
}

/// Value of the named cookie from the `Cookie` request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(
    settings: &SessionSettings,
    token: &str,
    max_age_secs: i64,
) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(&cookie_string(settings, token, max_age_secs))
}

/// Expires the session cookie in the browser.
pub fn clear_session_cookie(
    settings: &SessionSettings,
) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(&cookie_string(settings, "", 0))
}

fn cookie_string(settings: &SessionSettings, value: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        settings.cookie_name, value, max_age_secs
    );
    if settings.secure {
        cookie.push_str("; Secure");
    }
    cookie
}
