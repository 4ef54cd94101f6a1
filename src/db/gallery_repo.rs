// src/db/gallery_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::GalleryStore,
    models::gallery::{GalleryCategory, GalleryImage},
};

// Linha "achatada" do LEFT JOIN imagem <-> categoria
#[derive(Debug, FromRow)]
struct GalleryImageRow {
    id: Uuid,
    image_url: String,
    alt_text: String,
    category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    category_name: Option<String>,
    category_created_at: Option<DateTime<Utc>>,
}

impl From<GalleryImageRow> for GalleryImage {
    fn from(row: GalleryImageRow) -> Self {
        let category = match (row.category_id, row.category_name, row.category_created_at) {
            (Some(id), Some(name), Some(created_at)) => Some(GalleryCategory { id, name, created_at }),
            _ => None,
        };
        Self {
            id: row.id,
            image_url: row.image_url,
            alt_text: row.alt_text,
            category_id: row.category_id,
            category,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryStore for GalleryRepository {
    async fn list_categories(&self) -> Result<Vec<GalleryCategory>, AppError> {
        let categories = sqlx::query_as::<_, GalleryCategory>(
            "SELECT id, name, created_at FROM gallery_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn list_images(&self, category_id: Option<Uuid>) -> Result<Vec<GalleryImage>, AppError> {
        // $1 NULL => todas as categorias
        let rows = sqlx::query_as::<_, GalleryImageRow>(
            r#"
            SELECT
                i.id, i.image_url, i.alt_text, i.category_id, i.created_at,
                c.name AS category_name,
                c.created_at AS category_created_at
            FROM gallery_images i
            LEFT JOIN gallery_categories c ON c.id = i.category_id
            WHERE $1::uuid IS NULL OR i.category_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(GalleryImage::from).collect())
    }

    async fn insert_image(
        &self,
        image_url: &str,
        alt_text: &str,
        category_id: Option<Uuid>,
    ) -> Result<GalleryImage, AppError> {
        let row = sqlx::query_as::<_, GalleryImageRow>(
            r#"
            WITH inserted AS (
                INSERT INTO gallery_images (image_url, alt_text, category_id)
                VALUES ($1, $2, $3)
                RETURNING id, image_url, alt_text, category_id, created_at
            )
            SELECT
                i.id, i.image_url, i.alt_text, i.category_id, i.created_at,
                c.name AS category_name,
                c.created_at AS category_created_at
            FROM inserted i
            LEFT JOIN gallery_categories c ON c.id = i.category_id
            "#,
        )
        .bind(image_url)
        .bind(alt_text)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Categoria");
                }
            }
            e.into()
        })?;
        Ok(row.into())
    }

    async fn insert_category(&self, name: &str) -> Result<GalleryCategory, AppError> {
        let category = sqlx::query_as::<_, GalleryCategory>(
            "INSERT INTO gallery_categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM gallery_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::CategoryInUse;
                    }
                }
                AppError::from(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
