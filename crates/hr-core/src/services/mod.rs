//! Domain services (business logic)

pub mod auth_service;
pub mod employee_service;

pub use auth_service::{AuthService, LoginResult};
pub use employee_service::EmployeeService;
