// ============================================================================
// HR Core - Authentication Service
// File: crates/hr-core/src/services/auth_service.rs
// ============================================================================
//! Staff sign-in against the employee store

use std::sync::Arc;

use tracing::{info, warn};

use hr_security::{JwtService, PasswordService};

use crate::domain::{Employee, EmployeeCreate};
use crate::error::DomainError;
use crate::repositories::EmployeeRepository;
use crate::services::EmployeeService;

/// Authentication service for the login form and first-run seeding
pub struct AuthService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
    jwt: Arc<JwtService>,
}

impl<R: EmployeeRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for username: {}", username);

        // 1. Find employee by username
        let employee = self.repo.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: unknown username: {}", username);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &employee.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue session token
        let token = self
            .jwt
            .generate_session_token(employee.id, &employee.username)
            .map_err(|e| DomainError::Token(e.to_string()))?;

        info!("Login successful for: {}", username);
        Ok(LoginResult {
            employee_id: employee.id,
            username: employee.username,
            token,
        })
    }

    /// Seeds the first account when the store is empty; `Ok(None)` otherwise.
    pub async fn ensure_bootstrap_admin(
        &self,
        employees: &EmployeeService<R>,
        payload: EmployeeCreate,
    ) -> Result<Option<Employee>, DomainError> {
        if self.repo.count().await? > 0 {
            return Ok(None);
        }

        let admin = employees.create_employee(payload).await?;
        info!(employee_id = admin.id, username = %admin.username, "Bootstrap administrator created");
        Ok(Some(admin))
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub employee_id: i64,
    pub username: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmploymentPolicy, EmploymentType};
    use crate::repositories::InMemoryEmployeeRepository;
    use rust_decimal::Decimal;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn admin(username: &str) -> EmployeeCreate {
        EmployeeCreate {
            username: username.to_string(),
            password: "admin-password".to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            email: "admin@example.com".to_string(),
            phone_number: "021 555 0100".to_string(),
            age: 40,
            role: "Administrator".to_string(),
            salary: Decimal::ZERO,
            employment_type: EmploymentType::FullTime,
            contract_end_date: None,
        }
    }

    fn services() -> (
        EmployeeService<InMemoryEmployeeRepository>,
        AuthService<InMemoryEmployeeRepository>,
        Arc<JwtService>,
    ) {
        let repo = Arc::new(InMemoryEmployeeRepository::new());
        let jwt = Arc::new(JwtService::new(SECRET, 3600));
        (
            EmployeeService::new(repo.clone(), EmploymentPolicy::default()),
            AuthService::new(repo, jwt.clone()),
            jwt,
        )
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let (employees, auth, jwt) = services();
        let created = employees.create_employee(admin("admin")).await.unwrap();

        let result = auth.login("admin", "admin-password").await.unwrap();
        assert_eq!(result.employee_id, created.id);

        let claims = jwt.validate_token(&result.token).unwrap();
        assert_eq!(claims.employee_id().unwrap(), created.id);
        assert_eq!(claims.username, "admin");
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let (employees, auth, _) = services();
        employees.create_employee(admin("admin")).await.unwrap();

        let wrong_password = auth.login("admin", "nope-nope").await.unwrap_err();
        let unknown_user = auth.login("ghost", "admin-password").await.unwrap_err();
        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown_user, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_bootstrap_only_on_empty_store() {
        let (employees, auth, _) = services();

        let first = auth.ensure_bootstrap_admin(&employees, admin("admin")).await.unwrap();
        assert!(first.is_some());

        let second = auth.ensure_bootstrap_admin(&employees, admin("admin2")).await.unwrap();
        assert!(second.is_none());
        assert_eq!(employees.get_all_employees().await.unwrap().len(), 1);
    }
}
