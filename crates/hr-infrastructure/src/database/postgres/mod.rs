//! PostgreSQL repository implementations

pub mod employee_repo_impl;

pub use employee_repo_impl::PgEmployeeRepository;
