// src/db/notification_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::NotificationStore, models::notification::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn recent(&self, limit: i64) -> Result<Vec<Notification>, AppError> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, title, message, type, order_id, is_read, created_at
            FROM admin_notifications
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Alertas sintetizados de pedidos não têm linha aqui: o UPDATE simplesmente não casa nada
    async fn mark_read(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_notifications SET is_read = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_notifications SET is_read = true WHERE is_read = false")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
