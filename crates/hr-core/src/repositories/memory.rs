//! In-memory employee store for tests and local development

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Employee, EmployeeUpdate, NewEmployee};
use crate::error::DomainError;
use crate::repositories::EmployeeRepository;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Employee>,
    last_id: i64,
}

/// Every operation holds the table lock for its whole duration, which gives
/// the same all-or-nothing visibility as a database transaction.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    table: RwLock<Table>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|e| e.username == username)
            .cloned())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.table.read().await.rows.len() as i64)
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, DomainError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|e| e.username == employee.username) {
            return Err(DomainError::UsernameAlreadyExists(employee.username.clone()));
        }

        table.last_id += 1;
        let row = Employee {
            id: table.last_id,
            username: employee.username.clone(),
            password_hash: employee.password_hash.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone_number: employee.phone_number.clone(),
            age: employee.age,
            role: employee.role.clone(),
            salary: employee.salary,
            employment_type: employee.employment_type,
            contract_end_date: employee.contract_end_date,
            created_at: employee.created_at,
            modified_at: None,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &EmployeeUpdate) -> Result<Option<Employee>, DomainError> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        row.first_name = changes.first_name.clone();
        row.last_name = changes.last_name.clone();
        row.email = changes.email.clone();
        row.phone_number = changes.phone_number.clone();
        row.age = changes.age;
        row.role = changes.role.clone();
        row.salary = changes.salary;
        row.employment_type = changes.employment_type;
        row.contract_end_date = changes.contract_end_date;
        row.modified_at = Some(Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
