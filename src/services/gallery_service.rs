// src/services/gallery_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::GalleryStore,
    models::gallery::{
        GalleryCategory, GalleryImage, GalleryResponse, NewCategoryPayload, NewImagePayload,
        DEFAULT_ALT_TEXT,
    },
};

pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone)]
pub struct GalleryService {
    gallery: Arc<dyn GalleryStore>,
}

// "all" (ou nada) => sem filtro; qualquer outra coisa precisa ser um UUID
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim) {
        None | Some("") | Some(ALL_CATEGORIES) => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("Invalid category filter: {}", value))),
    }
}

impl GalleryService {
    pub fn new(gallery: Arc<dyn GalleryStore>) -> Self {
        Self { gallery }
    }

    pub async fn overview(&self, category: Option<&str>) -> Result<GalleryResponse, AppError> {
        let filter = parse_category_filter(category)?;
        let categories = self.gallery.list_categories().await?;
        let images = self.gallery.list_images(filter).await?;
        Ok(GalleryResponse { categories, images })
    }

    pub async fn add_image(&self, payload: NewImagePayload) -> Result<GalleryImage, AppError> {
        payload.validate()?;
        let url = payload.url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidInput("Please enter image URL".to_string()));
        }

        let alt = payload
            .alt
            .as_deref()
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or(DEFAULT_ALT_TEXT);

        let image = self.gallery.insert_image(url, alt, payload.category_id).await?;
        tracing::info!(image_id = %image.id, "🖼️ Imagem adicionada à galeria");
        Ok(image)
    }

    pub async fn add_category(&self, payload: NewCategoryPayload) -> Result<GalleryCategory, AppError> {
        payload.validate()?;
        let name = payload.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Please enter category name".to_string()));
        }
        self.gallery.insert_category(name).await
    }

    pub async fn delete_image(&self, id: Uuid) -> Result<(), AppError> {
        if self.gallery.delete_image(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Imagem"))
        }
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        if self.gallery.delete_category(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Categoria"))
        }
    }
}
