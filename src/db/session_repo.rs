// src/db/session_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::AdminSessionStore,
    models::session::{AdminSession, NewAdminSession, SESSION_ACTIVE, SESSION_LOGGED_OUT},
};

#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminSessionStore for SessionRepository {
    async fn open(&self, session: NewAdminSession) -> Result<AdminSession, AppError> {
        let row = sqlx::query_as::<_, AdminSession>(
            r#"
            INSERT INTO admin_sessions (admin_user_id, login_at, status, device_info, ip_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, admin_user_id, login_at, logout_at, status, device_info, ip_address
            "#,
        )
        .bind(session.admin_user_id)
        .bind(session.login_at)
        .bind(SESSION_ACTIVE)
        .bind(session.device_info)
        .bind(session.ip_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn close_latest_active(
        &self,
        admin_user_id: Uuid,
        logout_at: DateTime<Utc>,
    ) -> Result<Option<AdminSession>, AppError> {
        // Não é um "fecha todas": só a linha ativa mais recente
        let row = sqlx::query_as::<_, AdminSession>(
            r#"
            UPDATE admin_sessions
            SET status = $3, logout_at = $2
            WHERE id = (
                SELECT id FROM admin_sessions
                WHERE admin_user_id = $1 AND status = $4
                ORDER BY login_at DESC
                LIMIT 1
            )
            RETURNING id, admin_user_id, login_at, logout_at, status, device_info, ip_address
            "#,
        )
        .bind(admin_user_id)
        .bind(logout_at)
        .bind(SESSION_LOGGED_OUT)
        .bind(SESSION_ACTIVE)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_for_admin(&self, admin_user_id: Uuid, limit: i64) -> Result<Vec<AdminSession>, AppError> {
        let rows = sqlx::query_as::<_, AdminSession>(
            r#"
            SELECT id, admin_user_id, login_at, logout_at, status, device_info, ip_address
            FROM admin_sessions
            WHERE admin_user_id = $1
            ORDER BY login_at DESC
            LIMIT $2
            "#,
        )
        .bind(admin_user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
