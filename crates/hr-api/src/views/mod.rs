//! View rendering
//!
//! Handlers receive a [`ViewRenderer`] through `AppState` and hand it a
//! template name plus a JSON context. [`HandlebarsRenderer`] is the default
//! implementation over the templates embedded in this crate.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use hr_core::domain::EmploymentType;

pub const EMPLOYEES: &str = "employees";
pub const CREATE_EMPLOYEE: &str = "create_employee";
pub const EDIT_EMPLOYEE: &str = "edit_employee";
pub const LOGIN: &str = "login";

const LAYOUT: &str = include_str!("../../templates/layout.hbs");
const TEMPLATES: [(&str, &str); 4] = [
    (EMPLOYEES, include_str!("../../templates/employees.hbs")),
    (CREATE_EMPLOYEE, include_str!("../../templates/create_employee.hbs")),
    (EDIT_EMPLOYEE, include_str!("../../templates/edit_employee.hbs")),
    (LOGIN, include_str!("../../templates/login.hbs")),
];

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Template registration failed: {0}")]
    Template(String),
    #[error("Template rendering failed: {0}")]
    Render(String),
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String, ViewError>;
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Result<Self, ViewError> {
        // Built-in `eq` helper drives the `<select>` state.
        let mut registry = Handlebars::new();
        registry
            .register_partial("layout", LAYOUT)
            .map_err(|e| ViewError::Template(e.to_string()))?;
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ViewError::Template(format!("{}: {}", name, e)))?;
        }
        Ok(Self { registry })
    }
}

impl ViewRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, ViewError> {
        self.registry.render(template, context).map_err(|e| {
            tracing::error!("Template rendering failed for {}: {}", template, e);
            ViewError::Render(e.to_string())
        })
    }
}

/// Renders into an HTML response body.
pub fn render_html(
    renderer: &dyn ViewRenderer,
    template: &str,
    context: &Value,
) -> Result<Html<String>, ViewError> {
    renderer.render(template, context).map(Html)
}

#[derive(Serialize)]
pub struct EmploymentTypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Choices for the employment type `<select>`.
pub fn employment_type_options() -> Vec<EmploymentTypeOption> {
    EmploymentType::ALL
        .iter()
        .map(|t| EmploymentTypeOption {
            value: t.as_str(),
            label: t.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_templates_register() {
        assert!(HandlebarsRenderer::new().is_ok());
    }

    #[test]
    fn test_errors_are_rendered_and_escaped() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let html = renderer
            .render(
                LOGIN,
                &json!({ "errors": ["<script>alert(1)</script>"], "username": "" }),
            )
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_selected_employment_type() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let html = renderer
            .render(
                CREATE_EMPLOYEE,
                &json!({
                    "errors": null,
                    "form": { "employment_type": "contract" },
                    "employment_types": employment_type_options(),
                }),
            )
            .unwrap();
        assert!(html.contains(r#"<option value="contract" selected>"#));
        assert!(html.contains(r#"<option value="full_time" >"#));
    }

    #[test]
    fn test_unknown_template() {
        let renderer = HandlebarsRenderer::new().unwrap();
        assert!(matches!(
            renderer.render("missing", &json!({})),
            Err(ViewError::Render(_))
        ));
    }
}
