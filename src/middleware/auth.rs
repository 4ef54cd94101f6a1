// src/middleware/auth.rs

use std::{convert::Infallible, net::IpAddr};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{admin::AdminIdentity, auth::IdentitySession, session::DeviceInfo},
};

// Admin autenticado: sessão válida no provedor + papel resolvido
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub session: IdentitySession,
    pub identity: AdminIdentity,
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts).await.ok_or(AppError::Unauthenticated)?;

        let session = app_state
            .identity
            .get_current_session(&token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let identity = app_state.resolver.resolve(session.user.id).await;
        Ok(Self { session, identity })
    }
}

// Token Bearer opcional: logout e o portão do shell funcionam sem ele
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts).await))
    }
}

async fn bearer_token(parts: &mut Parts) -> Option<String> {
    parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

// User-agent e IP do cliente (primeiro da cadeia X-Forwarded-For)
impl<S> FromRequestParts<S> for DeviceInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
            .map(|ip| ip.to_string());

        Ok(Self { user_agent, ip_address })
    }
}
