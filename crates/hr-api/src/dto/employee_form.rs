// ============================================================================
// HR API - Employee Form DTOs
// File: crates/hr-api/src/dto/employee_form.rs
// ============================================================================
//! Raw form submissions and their coercion into typed payloads.
//!
//! Every field arrives as text so that unparseable numbers and dates come
//! back as validation messages on the form instead of extractor rejections.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hr_core::domain::{EmployeeCreate, EmployeeUpdate, EmploymentType};
use hr_core::DomainError;

/// Create form (POST /employees/create)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EmployeeCreateForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: String,
    pub role: String,
    pub salary: String,
    pub employment_type: String,
    pub contract_end_date: String,
}

/// Edit form (POST /employees/edit/{id})
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EmployeeUpdateForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: String,
    pub role: String,
    pub salary: String,
    pub employment_type: String,
    pub contract_end_date: String,
}

struct Coerced {
    age: i32,
    salary: Decimal,
    employment_type: EmploymentType,
    contract_end_date: Option<NaiveDate>,
}

fn coerce(
    age: &str,
    salary: &str,
    employment_type: &str,
    contract_end_date: &str,
) -> Result<Coerced, DomainError> {
    let mut errors = Vec::new();

    let age = match age.trim() {
        "" => {
            errors.push("Age is required".to_string());
            None
        }
        s => s
            .parse::<i32>()
            .map_err(|_| errors.push("Age must be a whole number".to_string()))
            .ok(),
    };

    let salary = match salary.trim() {
        "" => {
            errors.push("Salary is required".to_string());
            None
        }
        s => Decimal::from_str(s)
            .map_err(|_| errors.push("Salary must be a number".to_string()))
            .ok(),
    };

    let employment_type = EmploymentType::parse(employment_type);
    if employment_type.is_none() {
        errors.push(
            "Employment type must be one of full_time, part_time, contract, internship".to_string(),
        );
    }

    let contract_end_date = match contract_end_date.trim() {
        "" => Some(None),
        s => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| errors.push("Contract end date must be a date (YYYY-MM-DD)".to_string()))
            .ok(),
    };

    match (age, salary, employment_type, contract_end_date) {
        (Some(age), Some(salary), Some(employment_type), Some(contract_end_date)) if errors.is_empty() => {
            Ok(Coerced {
                age,
                salary,
                employment_type,
                contract_end_date,
            })
        }
        _ => Err(DomainError::Validation(errors)),
    }
}

impl EmployeeCreateForm {
    pub fn to_payload(&self) -> Result<EmployeeCreate, DomainError> {
        let coerced = coerce(
            &self.age,
            &self.salary,
            &self.employment_type,
            &self.contract_end_date,
        )?;

        Ok(EmployeeCreate {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            age: coerced.age,
            role: self.role.trim().to_string(),
            salary: coerced.salary,
            employment_type: coerced.employment_type,
            contract_end_date: coerced.contract_end_date,
        })
    }
}

impl EmployeeUpdateForm {
    pub fn to_payload(&self) -> Result<EmployeeUpdate, DomainError> {
        let coerced = coerce(
            &self.age,
            &self.salary,
            &self.employment_type,
            &self.contract_end_date,
        )?;

        Ok(EmployeeUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            age: coerced.age,
            role: self.role.trim().to_string(),
            salary: coerced.salary,
            employment_type: coerced.employment_type,
            contract_end_date: coerced.contract_end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EmployeeCreateForm {
        EmployeeCreateForm {
            username: "  dewi ".to_string(),
            password: " pass word ".to_string(),
            first_name: "Dewi".to_string(),
            last_name: "Lestari".to_string(),
            email: "dewi@example.com".to_string(),
            phone_number: "0813 0000 1111".to_string(),
            age: " 31 ".to_string(),
            role: "Designer".to_string(),
            salary: "6400.75".to_string(),
            employment_type: "Part-time".to_string(),
            contract_end_date: String::new(),
        }
    }

    #[test]
    fn test_coercion_and_trimming() {
        let payload = form().to_payload().unwrap();
        assert_eq!(payload.username, "dewi");
        assert_eq!(payload.password, " pass word ");
        assert_eq!(payload.age, 31);
        assert_eq!(payload.salary, Decimal::from_str("6400.75").unwrap());
        assert_eq!(payload.employment_type, EmploymentType::PartTime);
        assert_eq!(payload.contract_end_date, None);
    }

    #[test]
    fn test_contract_end_date_parsed() {
        let mut form = form();
        form.employment_type = "contract".to_string();
        form.contract_end_date = "2027-12-31".to_string();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.contract_end_date, NaiveDate::from_ymd_opt(2027, 12, 31));
    }

    #[test]
    fn test_all_coercion_errors_collected() {
        let mut form = form();
        form.age = "abc".to_string();
        form.salary = "lots".to_string();
        form.employment_type = "volunteer".to_string();
        form.contract_end_date = "31/12/2027".to_string();

        match form.to_payload() {
            Err(DomainError::Validation(messages)) => {
                assert_eq!(messages.len(), 4);
                assert_eq!(messages[0], "Age must be a whole number");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_numbers_reported() {
        let update = EmployeeUpdateForm {
            employment_type: "full_time".to_string(),
            ..Default::default()
        };
        match update.to_payload() {
            Err(DomainError::Validation(messages)) => {
                assert_eq!(messages, vec!["Age is required", "Salary is required"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_password_not_echoed() {
        let json = serde_json::to_value(form()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["age"], " 31 ");
    }
}
