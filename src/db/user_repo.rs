// src/db/user_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::AuthUserStore,
    models::auth::{AuthUser, AuthUserRecord},
};

// O repositório de usuários do provedor de identidade ('auth_users' + revogações)
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthUserStore for UserRepository {
    // Busca um usuário pelo seu e-mail (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUserRecord>, AppError> {
        let maybe_user = sqlx::query_as::<_, AuthUserRecord>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM auth_users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AppError> {
        let maybe_user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, email, created_at FROM auth_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE auth_users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuário"));
        }
        Ok(())
    }

    // Revogar duas vezes o mesmo token não é erro
    async fn revoke_token(
        &self,
        token_id: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO auth_revoked_tokens (jti, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(token_id)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_token_revoked(&self, token_id: Uuid) -> Result<bool, AppError> {
        let revoked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM auth_revoked_tokens WHERE jti = $1)",
        )
        .bind(token_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(revoked)
    }
}
