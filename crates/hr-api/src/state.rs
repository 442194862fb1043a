// ============================================================================
// HR API - Application State
// File: crates/hr-api/src/state.rs
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use hr_core::domain::EmploymentPolicy;
use hr_core::repositories::EmployeeRepository;
use hr_core::services::{AuthService, EmployeeService};
use hr_security::JwtService;
use hr_shared::config::AppConfig;

use crate::error::WebError;
use crate::views::{render_html, ViewRenderer};

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn EmployeeRepository>,
    pub jwt: Arc<JwtService>,
    pub renderer: Arc<dyn ViewRenderer>,
    pub policy: EmploymentPolicy,
    pub session: SessionSettings,
}

impl AppState {
    pub fn from_config(
        config: &AppConfig,
        repo: Arc<dyn EmployeeRepository>,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            repo,
            jwt: Arc::new(JwtService::new(
                &config.auth.jwt_secret,
                config.auth.session_ttl_secs,
            )),
            renderer,
            policy: EmploymentPolicy {
                enforce_contract_end_date: config.employees.enforce_contract_end_date,
            },
            session: SessionSettings {
                cookie_name: config.auth.cookie_name.clone(),
                secure: config.auth.secure_cookie,
            },
        }
    }

    pub fn employee_service(&self) -> EmployeeService<dyn EmployeeRepository> {
        EmployeeService::new(self.repo.clone(), self.policy)
    }

    pub fn auth_service(&self) -> AuthService<dyn EmployeeRepository> {
        AuthService::new(self.repo.clone(), self.jwt.clone())
    }

    pub fn render(
        &self,
        template: &str,
        context: &Value,
    ) -> Result<axum::response::Html<String>, WebError> {
        Ok(render_html(self.renderer.as_ref(), template, context)?)
    }
}
