// src/db/stores.rs
//
// Contratos do "Record Store". Os repositórios Postgres implementam cada um;
// os testes usam as versões em memória de `crate::testing`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        admin::AdminUser,
        auth::{AuthUser, AuthUserRecord},
        employee::{Employee, NewEmployee},
        gallery::{GalleryCategory, GalleryImage},
        notification::Notification,
        session::{AdminSession, NewAdminSession},
    },
};

// Tabelas do provedor de identidade ('auth_users', 'auth_revoked_tokens')
#[async_trait]
pub trait AuthUserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUserRecord>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AppError>;
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;
    async fn revoke_token(
        &self,
        token_id: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;
    async fn is_token_revoked(&self, token_id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn find_by_auth_user_id(&self, auth_user_id: Uuid) -> Result<Option<AdminUser>, AppError>;
}

#[async_trait]
pub trait AdminSessionStore: Send + Sync {
    async fn open(&self, session: NewAdminSession) -> Result<AdminSession, AppError>;

    // Fecha só a sessão ativa mais recente (login_at DESC LIMIT 1)
    async fn close_latest_active(
        &self,
        admin_user_id: Uuid,
        logout_at: DateTime<Utc>,
    ) -> Result<Option<AdminSession>, AppError>;

    async fn list_for_admin(&self, admin_user_id: Uuid, limit: i64) -> Result<Vec<AdminSession>, AppError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn recent(&self, limit: i64) -> Result<Vec<Notification>, AppError>;
    async fn mark_read(&self, id: Uuid) -> Result<(), AppError>;
    async fn mark_all_read(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, AppError>;
    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool, AppError>;
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, AppError>;
    async fn toggle_active(&self, id: Uuid) -> Result<Option<Employee>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait GalleryStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<GalleryCategory>, AppError>;
    async fn list_images(&self, category_id: Option<Uuid>) -> Result<Vec<GalleryImage>, AppError>;
    async fn insert_image(
        &self,
        image_url: &str,
        alt_text: &str,
        category_id: Option<Uuid>,
    ) -> Result<GalleryImage, AppError>;
    async fn insert_category(&self, name: &str) -> Result<GalleryCategory, AppError>;
    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError>;

    // AppError::CategoryInUse quando alguma imagem ainda aponta para ela
    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError>;
}
