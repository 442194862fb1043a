// ============================================================================
// HR Core - Employee Service
// File: crates/hr-core/src/services/employee_service.rs
// ============================================================================
//! CRUD business logic over the employee store

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use validator::Validate;

use hr_security::PasswordService;

use crate::domain::{
    validation_messages, Employee, EmployeeCreate, EmployeeUpdate, EmploymentPolicy,
    EmploymentType, NewEmployee,
};
use crate::error::DomainError;
use crate::repositories::EmployeeRepository;

/// Stateless between calls: every operation is one unit of work on the repository.
pub struct EmployeeService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
    policy: EmploymentPolicy,
}

impl<R: EmployeeRepository + ?Sized> EmployeeService<R> {
    pub fn new(repo: Arc<R>, policy: EmploymentPolicy) -> Self {
        Self { repo, policy }
    }

    pub async fn get_all_employees(&self) -> Result<Vec<Employee>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::EmployeeNotFound(id))
    }

    pub async fn create_employee(&self, payload: EmployeeCreate) -> Result<Employee, DomainError> {
        info!(username = %payload.username, "Creating employee");

        // 1. Field rules and employment policy
        self.check(&payload, payload.employment_type, payload.contract_end_date)?;

        // 2. Username uniqueness (the store enforces it again on insert)
        if self.repo.find_by_username(&payload.username).await?.is_some() {
            warn!(username = %payload.username, "Create rejected: username taken");
            return Err(DomainError::UsernameAlreadyExists(payload.username));
        }

        // 3. Hash password
        let password_hash = PasswordService::hash(&payload.password)
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

        // 4. Persist
        let employee = self
            .repo
            .create(&NewEmployee::from_payload(payload, password_hash))
            .await?;

        info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: EmployeeUpdate,
    ) -> Result<Employee, DomainError> {
        info!(employee_id = id, "Updating employee");

        // 1. The row must exist before the payload is judged
        if self.repo.find_by_id(id).await?.is_none() {
            warn!(employee_id = id, "Update rejected: employee not found");
            return Err(DomainError::EmployeeNotFound(id));
        }

        // 2. Field rules and employment policy
        self.check(&payload, payload.employment_type, payload.contract_end_date)?;

        // 3. Persist; the row can still vanish between the two calls
        let employee = self
            .repo
            .update(id, &payload)
            .await?
            .ok_or(DomainError::EmployeeNotFound(id))?;

        info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    /// A second delete of the same id fails with `EmployeeNotFound`.
    pub async fn delete_employee(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            warn!(employee_id = id, "Delete rejected: employee not found");
            return Err(DomainError::EmployeeNotFound(id));
        }
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    fn check<T: Validate>(
        &self,
        payload: &T,
        employment_type: EmploymentType,
        contract_end_date: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        let mut messages = match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        };
        if let Err(message) = self.policy.check(employment_type, contract_end_date) {
            messages.push(message);
        }

        if messages.is_empty() {
            Ok(())
        } else {
            warn!(errors = ?messages, "Employee payload rejected");
            Err(DomainError::Validation(messages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::{InMemoryEmployeeRepository, MockEmployeeRepository};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn service() -> (Arc<InMemoryEmployeeRepository>, EmployeeService<InMemoryEmployeeRepository>) {
        let repo = Arc::new(InMemoryEmployeeRepository::new());
        (repo.clone(), EmployeeService::new(repo, EmploymentPolicy::default()))
    }

    fn create_payload(username: &str) -> EmployeeCreate {
        EmployeeCreate {
            username: username.to_string(),
            password: "s3cret-pass".to_string(),
            first_name: "Siti".to_string(),
            last_name: "Rahma".to_string(),
            email: "siti.rahma@example.com".to_string(),
            phone_number: "0812 3456 7890".to_string(),
            age: 29,
            role: "Accountant".to_string(),
            salary: Decimal::from_str("7250.50").unwrap(),
            employment_type: EmploymentType::Contract,
            contract_end_date: NaiveDate::from_ymd_opt(2027, 6, 30),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_matches_input() {
        let (_, service) = service();
        let payload = create_payload("srahma");

        let created = service.create_employee(payload.clone()).await.unwrap();
        let fetched = service.get_employee(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.username, payload.username);
        assert_eq!(fetched.first_name, payload.first_name);
        assert_eq!(fetched.last_name, payload.last_name);
        assert_eq!(fetched.email, payload.email);
        assert_eq!(fetched.phone_number, payload.phone_number);
        assert_eq!(fetched.age, payload.age);
        assert_eq!(fetched.role, payload.role);
        assert_eq!(fetched.salary, payload.salary);
        assert_eq!(fetched.employment_type, payload.employment_type);
        assert_eq!(fetched.contract_end_date, payload.contract_end_date);
    }

    #[tokio::test]
    async fn test_password_is_hashed_before_storage() {
        let (repo, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret-pass");
        assert!(PasswordService::verify("s3cret-pass", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflict() {
        let (repo, service) = service();
        service.create_employee(create_payload("srahma")).await.unwrap();

        let err = service.create_employee(create_payload("srahma")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let rows = repo.find_all().await.unwrap();
        assert_eq!(rows.iter().filter(|e| e.username == "srahma").count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_payload_not_persisted() {
        let (repo, service) = service();
        let mut payload = create_payload("srahma");
        payload.email = "nope".to_string();

        let err = service.create_employee(payload).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_, service) = service();
        let err = service.get_employee(999).await.unwrap_err();
        assert!(matches!(err, DomainError::EmployeeNotFound(999)));
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let (repo, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();
        let before = repo.find_all().await.unwrap();

        let err = service
            .update_employee(created.id + 100, EmployeeUpdate::from(&created))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(repo.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_with_invalid_payload_is_not_found() {
        let (repo, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();

        let mut changes = EmployeeUpdate::from(&created);
        changes.age = 5;
        changes.email = "nope".to_string();
        let err = service.update_employee(999, changes).await.unwrap_err();

        assert!(matches!(err, DomainError::EmployeeNotFound(999)));
        assert_eq!(repo.find_by_id(created.id).await.unwrap().unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_row_deleted_mid_flight_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(Some(Employee {
                id,
                username: "srahma".to_string(),
                password_hash: "hash".to_string(),
                first_name: "Siti".to_string(),
                last_name: "Rahma".to_string(),
                email: "siti.rahma@example.com".to_string(),
                phone_number: "0812 3456 7890".to_string(),
                age: 29,
                role: "Accountant".to_string(),
                salary: Decimal::from(7000),
                employment_type: EmploymentType::FullTime,
                contract_end_date: None,
                created_at: chrono::Utc::now(),
                modified_at: None,
            }))
        });
        repo.expect_update().returning(|_, _| Ok(None));

        let service = EmployeeService::new(Arc::new(repo), EmploymentPolicy::default());
        let mut payload = create_payload("srahma");
        payload.employment_type = EmploymentType::FullTime;
        payload.contract_end_date = None;
        let changes = EmployeeUpdate {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone_number: payload.phone_number,
            age: payload.age,
            role: payload.role,
            salary: payload.salary,
            employment_type: payload.employment_type,
            contract_end_date: payload.contract_end_date,
        };

        let err = service.update_employee(4, changes).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_salary_round_trip() {
        let (_, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();

        let mut changes = EmployeeUpdate::from(&created);
        changes.salary = Decimal::from_str("9100.00").unwrap();
        service.update_employee(created.id, changes).await.unwrap();

        let fetched = service.get_employee(created.id).await.unwrap();
        assert_eq!(fetched.salary, Decimal::from_str("9100.00").unwrap());
        assert!(fetched.modified_at.is_some());
        assert_eq!(
            Employee { salary: created.salary, modified_at: None, ..fetched },
            created
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_fields() {
        let (_, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();

        let mut changes = EmployeeUpdate::from(&created);
        changes.age = 300;
        let err = service.update_employee(created.id, changes).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.get_employee(created.id).await.unwrap().age, 29);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_, service) = service();
        let created = service.create_employee(create_payload("srahma")).await.unwrap();

        service.delete_employee(created.id).await.unwrap();
        let err = service.delete_employee(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::EmployeeNotFound(id) if id == created.id));
        assert!(service.get_all_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_policy_enforced_when_enabled() {
        let repo = Arc::new(InMemoryEmployeeRepository::new());
        let service = EmployeeService::new(repo, EmploymentPolicy { enforce_contract_end_date: true });

        let mut payload = create_payload("srahma");
        payload.employment_type = EmploymentType::FullTime;
        let err = service.create_employee(payload).await.unwrap_err();
        assert_eq!(
            err.user_messages(),
            vec!["Full-time employment must not have a contract end date".to_string()]
        );
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(DomainError::Database("connection reset".into())));

        let service = EmployeeService::new(Arc::new(repo), EmploymentPolicy::default());
        let err = service.create_employee(create_payload("srahma")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[tokio::test]
    async fn test_store_unique_violation_surfaces_as_conflict() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|e| Err(DomainError::UsernameAlreadyExists(e.username.clone())));

        let service = EmployeeService::new(Arc::new(repo), EmploymentPolicy::default());
        let err = service.create_employee(create_payload("srahma")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_validation_short_circuits_store() {
        let repo = MockEmployeeRepository::new();
        let service = EmployeeService::new(Arc::new(repo), EmploymentPolicy::default());

        let mut payload = create_payload("srahma");
        payload.age = 5;
        // No expectations set: any repository call would panic.
        assert!(service.create_employee(payload).await.is_err());
    }
}
