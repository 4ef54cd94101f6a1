// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const SESSION_ACTIVE: &str = "active";
pub const SESSION_LOGGED_OUT: &str = "logged_out";

// Tamanho máximo do user-agent gravado em 'device_info'
pub const DEVICE_INFO_MAX_CHARS: usize = 100;

// Linha da tabela 'admin_sessions' (trilha de auditoria, melhor esforço)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: Uuid,
    pub admin_user_id: Uuid,
    pub login_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
    #[schema(example = "active")]
    pub status: String,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}

// De onde veio o login
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl DeviceInfo {
    // Primeiros 100 caracteres (não bytes) do user-agent
    pub fn truncated_user_agent(&self) -> Option<String> {
        self.user_agent
            .as_deref()
            .map(|ua| ua.chars().take(DEVICE_INFO_MAX_CHARS).collect())
    }
}

#[derive(Debug, Clone)]
pub struct NewAdminSession {
    pub admin_user_id: Uuid,
    pub login_at: DateTime<Utc>,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}
