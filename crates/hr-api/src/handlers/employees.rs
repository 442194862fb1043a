// ============================================================================
// HR API - Employee Handlers
// File: crates/hr-api/src/handlers/employees.rs
// ============================================================================
//! Server-rendered employee pages
//!
//! Validation and conflict failures on create/edit re-render the form with
//! the submitted values and an error list. Missing ids become 404 and store
//! failures become 500 through [`WebError`].

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde_json::{json, Value};
use tracing::info;

use hr_core::{DomainError, ErrorKind};
use hr_shared::constants::EMPLOYEE_LIST_PATH;

use crate::dto::{EmployeeCreateForm, EmployeeUpdateForm};
use crate::error::WebError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{self, employment_type_options};

/// Errors that are shown on the form rather than turned into a status page.
fn shown_on_form(err: &DomainError) -> bool {
    matches!(err.kind(), ErrorKind::Validation | ErrorKind::Conflict)
}

/// GET /employees/page
pub async fn employee_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, WebError> {
    let employees = state.employee_service().get_all_employees().await?;

    state.render(
        views::EMPLOYEES,
        &json!({
            "current_user": user.username,
            "employees": employees,
        }),
    )
}

/// GET /employees/create
pub async fn create_employee_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, WebError> {
    render_create_form(&state, &user, &EmployeeCreateForm::default(), &[])
}

/// POST /employees/create
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<EmployeeCreateForm>,
) -> Result<Response, WebError> {
    let result = match form.to_payload() {
        Ok(payload) => state.employee_service().create_employee(payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(employee) => {
            info!(
                employee_id = employee.id,
                actor_id = user.id,
                created_by = %user.username,
                "Employee created via form"
            );
            Ok(Redirect::to(EMPLOYEE_LIST_PATH).into_response())
        }
        Err(e) if shown_on_form(&e) => {
            render_create_form(&state, &user, &form, &e.user_messages()).map(IntoResponse::into_response)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /employees/edit/{id}
pub async fn edit_employee_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let employee = state.employee_service().get_employee(id).await?;
    let employee = serde_json::to_value(&employee)
        .map_err(|e| WebError::InternalError(e.to_string()))?;

    render_edit_form(&state, &user, employee, &[])
}

/// POST /employees/edit/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeUpdateForm>,
) -> Result<Response, WebError> {
    let service = state.employee_service();
    let result = match form.to_payload() {
        Ok(payload) => service.update_employee(id, payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(employee) => {
            info!(
                employee_id = employee.id,
                actor_id = user.id,
                updated_by = %user.username,
                "Employee updated via form"
            );
            Ok(Redirect::to(EMPLOYEE_LIST_PATH).into_response())
        }
        Err(e) if shown_on_form(&e) => {
            // The row may have been deleted since the form was opened.
            let current = service.get_employee(id).await?;

            let mut employee = serde_json::to_value(&form)
                .map_err(|e| WebError::InternalError(e.to_string()))?;
            employee["id"] = json!(current.id);
            employee["username"] = json!(current.username);

            render_edit_form(&state, &user, employee, &e.user_messages())
                .map(IntoResponse::into_response)
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /employees/delete/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, WebError> {
    state.employee_service().delete_employee(id).await?;
    info!(
        employee_id = id,
        actor_id = user.id,
        deleted_by = %user.username,
        "Employee deleted via form"
    );
    Ok(Redirect::to(EMPLOYEE_LIST_PATH))
}

fn render_create_form(
    state: &AppState,
    user: &CurrentUser,
    form: &EmployeeCreateForm,
    errors: &[String],
) -> Result<Html<String>, WebError> {
    state.render(
        views::CREATE_EMPLOYEE,
        &json!({
            "current_user": user.username,
            "errors": errors,
            "form": form,
            "employment_types": employment_type_options(),
        }),
    )
}

fn render_edit_form(
    state: &AppState,
    user: &CurrentUser,
    employee: Value,
    errors: &[String],
) -> Result<Html<String>, WebError> {
    state.render(
        views::EDIT_EMPLOYEE,
        &json!({
            "current_user": user.username,
            "errors": errors,
            "employee": employee,
            "employment_types": employment_type_options(),
        }),
    )
}
