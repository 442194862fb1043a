// ============================================================================
// HR Infrastructure - PostgreSQL Employee Repository
// File: crates/hr-infrastructure/src/database/postgres/employee_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use hr_core::domain::{Employee, EmployeeUpdate, EmploymentType, NewEmployee};
use hr_core::error::DomainError;
use hr_core::repositories::EmployeeRepository;

const EMPLOYEE_COLUMNS: &str = r#"
    id, username, password, first_name, last_name, email, phone_number,
    age, role, salary, employment_type, contract_end_date,
    created_at, modified_at
"#;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub role: String,
    pub salary: Decimal,
    pub employment_type: String,
    pub contract_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let employment_type = EmploymentType::parse(&row.employment_type).ok_or_else(|| {
            DomainError::Database(format!(
                "employee {} has unknown employment_type '{}'",
                row.id, row.employment_type
            ))
        })?;

        Ok(Employee {
            id: row.id,
            username: row.username,
            password_hash: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            age: row.age,
            role: row.role,
            salary: row.salary,
            employment_type,
            contract_end_date: row.contract_end_date,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::Database(e.to_string())
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        let rows: Vec<EmployeeRow> =
            sqlx::query_as(&format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("listing employees"))?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> =
            sqlx::query_as(&format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding employee by id"))?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM employees WHERE username = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding employee by username"))?;

        row.map(Employee::try_from).transpose()
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting employees"))
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, DomainError> {
        info!("Creating employee with username: {}", employee.username);

        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let row: EmployeeRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO employees (
                username, password, first_name, last_name, email, phone_number,
                age, role, salary, employment_type, contract_end_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(&employee.username)
        .bind(&employee.password_hash)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(employee.age)
        .bind(&employee.role)
        .bind(employee.salary)
        .bind(employee.employment_type.as_str())
        .bind(employee.contract_end_date)
        .bind(employee.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                info!("Username already exists: {}", employee.username);
                DomainError::UsernameAlreadyExists(employee.username.clone())
            }
            e => db_error("creating employee")(e),
        })?;

        let created = Employee::try_from(row)?;
        tx.commit().await.map_err(db_error("committing employee insert"))?;

        info!("Employee created successfully: {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &EmployeeUpdate) -> Result<Option<Employee>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            r#"
            UPDATE employees
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                age = $6,
                role = $7,
                salary = $8,
                employment_type = $9,
                contract_end_date = $10,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone_number)
        .bind(changes.age)
        .bind(&changes.role)
        .bind(changes.salary)
        .bind(changes.employment_type.as_str())
        .bind(changes.contract_end_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("updating employee"))?;

        let updated = row.map(Employee::try_from).transpose()?;
        tx.commit().await.map_err(db_error("committing employee update"))?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting employee"))?;

        tx.commit().await.map_err(db_error("committing employee delete"))?;
        Ok(result.rows_affected() > 0)
    }
}
