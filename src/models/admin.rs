// src/models/admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

/// Papel canônico de um administrador.
///
/// Rótulos legados (`manager`, `support`) aparecem apenas em telas antigas de
/// perfil e não são aceitos aqui: veja [`RoleParseError::Legacy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    // Papel padrão quando o usuário não tem linha em 'admin_users'
    #[default]
    Employee,
    Cashier,
}

impl AdminRole {
    #[cfg(test)]
    pub const ALL: [AdminRole; 3] = [AdminRole::SuperAdmin, AdminRole::Employee, AdminRole::Cashier];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Employee => "employee",
            Self::Cashier => "cashier",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Employee => "Employee",
            Self::Cashier => "Cashier",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleParseError {
    #[error("rótulo legado de papel: {0}")]
    Legacy(String),
    #[error("papel desconhecido: {0}")]
    Unknown(String),
}

impl FromStr for AdminRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "super_admin" => Ok(Self::SuperAdmin),
            "employee" => Ok(Self::Employee),
            "cashier" => Ok(Self::Cashier),
            "manager" | "support" => Err(RoleParseError::Legacy(s.to_string())),
            other => Err(RoleParseError::Unknown(other.to_string())),
        }
    }
}

// Linha da tabela 'admin_users'. O papel fica como texto cru: quem interpreta é o RoleResolver.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub auth_user_id: Uuid,
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "cashier")]
    pub role: String,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// O que o RoleResolver devolve para o shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub admin_user_id: Option<Uuid>,
    pub name: String,
    pub role: AdminRole,
}

pub const DEFAULT_ADMIN_NAME: &str = "Admin User";

impl AdminIdentity {
    pub fn fallback() -> Self {
        Self {
            admin_user_id: None,
            name: DEFAULT_ADMIN_NAME.to_string(),
            role: AdminRole::default(),
        }
    }

    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "A".to_string())
    }
}

// Perfil exibido em "My Profile"
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    #[schema(value_type = String)]
    pub role_label: &'static str,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
