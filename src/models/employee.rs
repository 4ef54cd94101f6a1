// src/models/employee.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use std::fmt;

// Linha da tabela 'employees'. O hash da senha nunca sai na resposta.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    #[schema(example = "EMP4821")]
    pub employee_id: String,
    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,
    #[schema(example = "Arjun Mehta")]
    pub name: String,
    #[schema(example = "cashier")]
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Papéis oferecidos no cadastro de funcionários. Não é o papel do painel (AdminRole).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    #[default]
    Employee,
    Admin,
    Cashier,
}

impl EmployeeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Admin => "admin",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Campos vazios => gerados pelo servidor
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[serde(default)]
    #[schema(example = "EMP4821")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[schema(example = "Arjun Mehta")]
    pub name: String,
    #[serde(default)]
    pub role: EmployeeRole,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: String,
    pub password_hash: String,
    pub name: String,
    pub role: EmployeeRole,
}

// Única vez em que a senha aparece em texto puro
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEmployee {
    pub id: Uuid,
    #[schema(example = "EMP4821")]
    pub employee_id: String,
    #[schema(example = "k7HpQ2xa")]
    pub password: String,
    pub name: String,
}
