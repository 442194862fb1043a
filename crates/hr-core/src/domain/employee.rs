// ============================================================================
// HR Core - Employee Entity
// File: crates/hr-core/src/domain/employee.rs
// Description: Employee entity, create/update payloads and their validation
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use hr_shared::constants::{
    MAX_EMAIL_LENGTH, MAX_EMPLOYEE_AGE, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_PHONE_LENGTH,
    MAX_USERNAME_LENGTH, MIN_EMPLOYEE_AGE, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
    SALARY_DECIMAL_PLACES, SALARY_INTEGER_DIGITS,
};

/// Employment type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
        }
    }

    /// Accepts the stored form as well as human spellings such as `Full-time` or `full time`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "full_time" | "fulltime" | "permanent" => Some(EmploymentType::FullTime),
            "part_time" | "parttime" => Some(EmploymentType::PartTime),
            "contract" | "contractor" | "fixed_term" => Some(EmploymentType::Contract),
            "internship" | "intern" => Some(EmploymentType::Internship),
            _ => None,
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, EmploymentType::FullTime | EmploymentType::PartTime)
    }
}

/// Employee entity as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub role: String,
    pub salary: Decimal,
    pub employment_type: EmploymentType,
    pub contract_end_date: Option<NaiveDate>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Row to insert; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub role: String,
    pub salary: Decimal,
    pub employment_type: EmploymentType,
    pub contract_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl NewEmployee {
    pub fn from_payload(payload: EmployeeCreate, password_hash: String) -> Self {
        Self {
            username: payload.username,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone_number: payload.phone_number,
            age: payload.age,
            role: payload.role,
            salary: payload.salary,
            employment_type: payload.employment_type,
            contract_end_date: payload.contract_end_date,
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating an employee
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EmployeeCreate {
    #[validate(
        length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH, message = "Username must be between 3 and 50 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "First name is required (max 100 characters)"))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Last name is required (max 100 characters)"))]
    pub last_name: String,

    #[validate(
        email(message = "Email address is not valid"),
        length(max = MAX_EMAIL_LENGTH, message = "Email address must be at most 254 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = MAX_PHONE_LENGTH, message = "Phone number is required (max 32 characters)"),
        custom(function = "validate_phone_number")
    )]
    pub phone_number: String,

    #[validate(range(min = MIN_EMPLOYEE_AGE, max = MAX_EMPLOYEE_AGE, message = "Age must be between 16 and 100"))]
    pub age: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Role is required (max 100 characters)"))]
    pub role: String,

    #[validate(custom(function = "validate_salary"))]
    pub salary: Decimal,

    pub employment_type: EmploymentType,
    pub contract_end_date: Option<NaiveDate>,
}

/// Payload for editing an employee; username and password are fixed after creation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "First name is required (max 100 characters)"))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Last name is required (max 100 characters)"))]
    pub last_name: String,

    #[validate(
        email(message = "Email address is not valid"),
        length(max = MAX_EMAIL_LENGTH, message = "Email address must be at most 254 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = MAX_PHONE_LENGTH, message = "Phone number is required (max 32 characters)"),
        custom(function = "validate_phone_number")
    )]
    pub phone_number: String,

    #[validate(range(min = MIN_EMPLOYEE_AGE, max = MAX_EMPLOYEE_AGE, message = "Age must be between 16 and 100"))]
    pub age: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Role is required (max 100 characters)"))]
    pub role: String,

    #[validate(custom(function = "validate_salary"))]
    pub salary: Decimal,

    pub employment_type: EmploymentType,
    pub contract_end_date: Option<NaiveDate>,
}

impl From<&Employee> for EmployeeUpdate {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone_number: employee.phone_number.clone(),
            age: employee.age,
            role: employee.role.clone(),
            salary: employee.salary,
            employment_type: employee.employment_type,
            contract_end_date: employee.contract_end_date,
        }
    }
}

/// Business rule for `contract_end_date`, switched on per deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmploymentPolicy {
    pub enforce_contract_end_date: bool,
}

impl EmploymentPolicy {
    pub fn check(
        &self,
        employment_type: EmploymentType,
        contract_end_date: Option<NaiveDate>,
    ) -> Result<(), String> {
        if !self.enforce_contract_end_date {
            return Ok(());
        }
        match (employment_type.is_permanent(), contract_end_date) {
            (true, Some(_)) => Err(format!(
                "{} employment must not have a contract end date",
                employment_type.label()
            )),
            (false, None) => Err(format!(
                "{} employment requires a contract end date",
                employment_type.label()
            )),
            _ => Ok(()),
        }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits, '.', '_' and '-'".into()))
    }
}

fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    if allowed && phone.chars().any(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number")
            .with_message("Phone number may only contain digits, spaces, '+', '-' and parentheses".into()))
    }
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(ValidationError::new("salary_negative")
            .with_message("Salary cannot be negative".into()));
    }
    if *salary >= Decimal::from(10_i64.pow(SALARY_INTEGER_DIGITS)) {
        return Err(ValidationError::new("salary_too_large")
            .with_message("Salary must be less than 10,000,000,000".into()));
    }
    // Trailing zeros are fine: 1000.500 is stored as 1000.50.
    if salary.round_dp(SALARY_DECIMAL_PLACES) != *salary {
        return Err(ValidationError::new("salary_precision")
            .with_message("Salary may have at most 2 decimal places".into()));
    }
    Ok(())
}

/// Flattens field errors into user-facing messages, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}
