//! Employee repository trait (port)

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeUpdate, NewEmployee};
use crate::error::DomainError;

/// Each method is one unit of work: it commits on success and leaves the
/// store untouched on error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Fails with `UsernameAlreadyExists` when the username is taken.
    async fn create(&self, employee: &NewEmployee) -> Result<Employee, DomainError>;
    /// `Ok(None)` when no row has this id.
    async fn update(&self, id: i64, changes: &EmployeeUpdate) -> Result<Option<Employee>, DomainError>;
    /// `Ok(false)` when no row has this id.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
