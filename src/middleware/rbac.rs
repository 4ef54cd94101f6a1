// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentAdmin,
    services::navigation,
};

/// 1. Uma seção do painel, identificada pelo href na configuração de navegação
pub trait SectionDef: Send + Sync + 'static {
    fn href() -> &'static str;
}

/// 2. O Extractor (Guardião): mesmos papéis que veem o item no menu
pub struct RequireSection<T>(pub CurrentAdmin, pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireSection<T>
where
    T: SectionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o admin (401 se não houver sessão)
        let admin = CurrentAdmin::from_request_parts(parts, state).await?;

        // B. Confere o papel contra a configuração
        let section = T::href();
        if !navigation::can_access(admin.identity.role, section) {
            tracing::warn!(
                role = %admin.identity.role,
                section,
                "⛔ Acesso negado à seção"
            );
            return Err(AppError::Forbidden(section.to_string()));
        }

        Ok(RequireSection(admin, PhantomData))
    }
}

pub struct EmployeesSection;

impl SectionDef for EmployeesSection {
    fn href() -> &'static str {
        "/admin/employees"
    }
}

pub struct GallerySection;

impl SectionDef for GallerySection {
    fn href() -> &'static str {
        "/admin/gallery"
    }
}
