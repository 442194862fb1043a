use serde::Deserialize;

/// Sign-in form (POST /auth/login)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
