//! Form payloads posted by the HTML pages

pub mod employee_form;
pub mod login_form;

pub use employee_form::{EmployeeCreateForm, EmployeeUpdateForm};
pub use login_form::LoginForm;
