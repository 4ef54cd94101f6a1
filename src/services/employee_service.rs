// src/services/employee_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        credentials::{generate_employee_id, generate_password},
        error::AppError,
    },
    db::EmployeeStore,
    models::employee::{CreateEmployeePayload, CreatedEmployee, Employee, NewEmployee},
    services::identity::JwtIdentityProvider,
};

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.employees.list().await
    }

    // Campos em branco são gerados aqui. A senha em texto puro só volta nesta resposta.
    pub async fn create(&self, payload: CreateEmployeePayload) -> Result<CreatedEmployee, AppError> {
        let name = payload.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Please enter employee name".to_string()));
        }

        let employee_id = non_blank(payload.employee_id).unwrap_or_else(generate_employee_id);
        let password = non_blank(payload.password).unwrap_or_else(generate_password);

        // Checagem única; a constraint UNIQUE cobre a corrida
        if self.employees.employee_id_exists(&employee_id).await? {
            return Err(AppError::EmployeeIdTaken);
        }

        let password_hash = JwtIdentityProvider::hash_password(&password).await?;
        let employee = self
            .employees
            .insert(NewEmployee {
                employee_id,
                password_hash,
                name,
                role: payload.role,
            })
            .await?;

        tracing::info!(employee_id = %employee.employee_id, role = %employee.role, "👤 Funcionário criado");

        Ok(CreatedEmployee {
            id: employee.id,
            employee_id: employee.employee_id,
            password,
            name: employee.name,
        })
    }

    pub async fn toggle_status(&self, id: Uuid) -> Result<Employee, AppError> {
        self.employees
            .toggle_active(id)
            .await?
            .ok_or(AppError::NotFound("Funcionário"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.employees.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Funcionário"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::employee::EmployeeRole, testing::MemoryEmployees};

    fn service() -> (EmployeeService, Arc<MemoryEmployees>) {
        let store = Arc::new(MemoryEmployees::default());
        (EmployeeService::new(store.clone()), store)
    }

    fn payload(employee_id: Option<&str>, password: Option<&str>, name: &str) -> CreateEmployeePayload {
        CreateEmployeePayload {
            employee_id: employee_id.map(String::from),
            password: password.map(String::from),
            name: name.to_string(),
            role: EmployeeRole::Cashier,
        }
    }

    #[tokio::test]
    async fn blank_fields_are_generated_and_password_is_hashed() {
        let (service, store) = service();
        let created = service.create(payload(Some("  "), None, " Arjun ")).await.unwrap();

        assert!(created.employee_id.starts_with("EMP"));
        assert_eq!(created.password.len(), 8);
        assert_eq!(created.name, "Arjun");

        let row = &store.rows()[0];
        assert_eq!(row.role, "cashier");
        assert!(row.is_active);
        assert_ne!(row.password_hash, created.password);
        assert!(bcrypt::verify(&created.password, &row.password_hash).unwrap());
    }

    #[tokio::test]
    async fn admin_role_from_the_form_is_accepted() {
        let (service, store) = service();
        let payload: CreateEmployeePayload =
            serde_json::from_value(serde_json::json!({ "name": "Kavya", "role": "admin" })).unwrap();
        service.create(payload).await.unwrap();
        assert_eq!(store.rows()[0].role, "admin");

        let payload: CreateEmployeePayload = serde_json::from_value(serde_json::json!({ "name": "Ravi" })).unwrap();
        assert_eq!(payload.role, EmployeeRole::Employee);
    }

    #[tokio::test]
    async fn duplicate_employee_id_is_rejected() {
        let (service, _) = service();
        service.create(payload(Some("EMP1234"), Some("secret1"), "Arjun")).await.unwrap();
        let again = service.create(payload(Some("EMP1234"), Some("secret2"), "Neha")).await;
        assert!(matches!(again, Err(AppError::EmployeeIdTaken)));
    }

    #[tokio::test]
    async fn name_is_required() {
        let (service, store) = service();
        let result = service.create(payload(None, None, "   ")).await;
        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg == "Please enter employee name"));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn toggle_and_delete() {
        let (service, _) = service();
        let created = service.create(payload(Some("EMP5555"), Some("secret1"), "Arjun")).await.unwrap();

        assert!(!service.toggle_status(created.id).await.unwrap().is_active);
        assert!(service.toggle_status(created.id).await.unwrap().is_active);

        service.delete(created.id).await.unwrap();
        assert!(matches!(service.delete(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.toggle_status(created.id).await, Err(AppError::NotFound(_))));
    }
}
