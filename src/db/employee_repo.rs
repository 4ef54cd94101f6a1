// src/db/employee_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::EmployeeStore,
    models::employee::{Employee, NewEmployee},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, password_hash, name, role, is_active, created_at
            FROM employees
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM employees WHERE employee_id = $1)")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        let created = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (employee_id, password_hash, name, role, is_active)
            VALUES ($1, $2, $3, $4, true)
            RETURNING id, employee_id, password_hash, name, role, is_active, created_at
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.password_hash)
        .bind(&employee.name)
        .bind(employee.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A checagem prévia não fecha a corrida; a constraint UNIQUE fecha
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmployeeIdTaken;
                }
            }
            e.into()
        })?;
        Ok(created)
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let updated = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET is_active = NOT is_active
            WHERE id = $1
            RETURNING id, employee_id, password_hash, name, role, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
