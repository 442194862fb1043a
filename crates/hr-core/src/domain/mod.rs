//! # HR Core - Domain Module
//! 
//! Domain entities for the HR application.

pub mod employee;

pub use employee::{
    validation_messages, Employee, EmployeeCreate, EmployeeUpdate, EmploymentPolicy, EmploymentType,
    NewEmployee,
};
