//! Repository traits (ports)

pub mod employee_repository;
pub mod memory;

pub use employee_repository::EmployeeRepository;
pub use memory::InMemoryEmployeeRepository;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
