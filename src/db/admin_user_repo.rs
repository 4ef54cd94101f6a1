// src/db/admin_user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::AdminUserStore, models::admin::AdminUser};

#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserStore for AdminUserRepository {
    async fn find_by_auth_user_id(&self, auth_user_id: Uuid) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, auth_user_id, name, role, status, created_at
            FROM admin_users
            WHERE auth_user_id = $1
            "#,
        )
        .bind(auth_user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }
}
