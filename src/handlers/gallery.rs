// src/handlers/gallery.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{GallerySection, RequireSection},
    models::gallery::{
        GalleryCategory, GalleryFilter, GalleryImage, GalleryResponse, NewCategoryPayload,
        NewImagePayload,
    },
};

// GET /api/admin/gallery?category=
#[utoipa::path(
    get,
    path = "/api/admin/gallery",
    tag = "Gallery",
    params(GalleryFilter),
    responses(
        (status = 200, description = "Categorias e imagens", body = GalleryResponse),
        (status = 400, description = "Filtro de categoria inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_gallery(
    State(app_state): State<AppState>,
    _guard: RequireSection<GallerySection>,
    Query(filter): Query<GalleryFilter>,
) -> Result<Json<GalleryResponse>, AppError> {
    let gallery = app_state.gallery.overview(filter.category.as_deref()).await?;
    Ok(Json(gallery))
}

// POST /api/admin/gallery/images
#[utoipa::path(
    post,
    path = "/api/admin/gallery/images",
    tag = "Gallery",
    request_body = NewImagePayload,
    responses(
        (status = 201, description = "Imagem adicionada", body = GalleryImage)
    ),
    security(("api_jwt" = []))
)]
pub async fn add_image(
    State(app_state): State<AppState>,
    _guard: RequireSection<GallerySection>,
    Json(payload): Json<NewImagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let image = app_state.gallery.add_image(payload).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

// POST /api/admin/gallery/categories
#[utoipa::path(
    post,
    path = "/api/admin/gallery/categories",
    tag = "Gallery",
    request_body = NewCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = GalleryCategory)
    ),
    security(("api_jwt" = []))
)]
pub async fn add_category(
    State(app_state): State<AppState>,
    _guard: RequireSection<GallerySection>,
    Json(payload): Json<NewCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let category = app_state.gallery.add_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

// DELETE /api/admin/gallery/images/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/gallery/images/{id}",
    tag = "Gallery",
    params(("id" = Uuid, Path, description = "ID da imagem")),
    responses(
        (status = 204, description = "Removida"),
        (status = 404, description = "Imagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_image(
    State(app_state): State<AppState>,
    _guard: RequireSection<GallerySection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.gallery.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/admin/gallery/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/gallery/categories/{id}",
    tag = "Gallery",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Removida"),
        (status = 409, description = "Categoria em uso por alguma imagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    RequireSection(admin, _): RequireSection<GallerySection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.gallery.delete_category(id).await?;
    tracing::info!(deleted_by = %admin.session.user.id, category = %id, "Categoria da galeria removida");
    Ok(StatusCode::NO_CONTENT)
}
