// src/models/gallery.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_ALT_TEXT: &str = "Gallery image";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCategory {
    pub id: Uuid,
    #[schema(example = "Interiors")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Imagem com a categoria já resolvida (LEFT JOIN)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub image_url: String,
    pub alt_text: String,
    pub category_id: Option<Uuid>,
    pub category: Option<GalleryCategory>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewImagePayload {
    #[validate(length(min = 1, message = "Please enter image URL"))]
    #[schema(example = "https://images.unsplash.com/photo-1554118811-1e0d58224f24")]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCategoryPayload {
    #[validate(length(min = 1, message = "Please enter category name"))]
    #[schema(example = "Desserts")]
    pub name: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GalleryFilter {
    // "all" ou o UUID de uma categoria
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub categories: Vec<GalleryCategory>,
    pub images: Vec<GalleryImage>,
}
