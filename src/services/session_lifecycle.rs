// src/services/session_lifecycle.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AdminSessionStore,
    models::{
        auth::{AuthResponse, IdentitySession, LogoutResponse},
        session::{AdminSession, DeviceInfo, NewAdminSession},
    },
    services::{
        identity::IdentityProvider,
        navigation::{DASHBOARD_PATH, LOGIN_PATH},
        role_resolver::RoleResolver,
    },
};

pub const LOGIN_HISTORY_LIMIT: i64 = 50;

// Tentativas de revogar o token no logout
const SIGN_OUT_ATTEMPTS: u32 = 2;

/// Login e logout com a trilha de auditoria em `admin_sessions`.
///
/// A trilha é melhor esforço: falhas de gravação só geram log e nunca
/// impedem o login nem o sign-out. "No máximo uma sessão ativa" não é
/// garantido sob concorrência; o logout fecha apenas a mais recente.
#[derive(Clone)]
pub struct SessionLifecycle {
    identity: Arc<dyn IdentityProvider>,
    resolver: RoleResolver,
    sessions: Arc<dyn AdminSessionStore>,
}

impl SessionLifecycle {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        resolver: RoleResolver,
        sessions: Arc<dyn AdminSessionStore>,
    ) -> Self {
        Self { identity, resolver, sessions }
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: &DeviceInfo,
    ) -> Result<AuthResponse, AppError> {
        let session = match self.identity.sign_in_with_credentials(email, password).await {
            Ok(session) => session,
            Err(AppError::InvalidCredentials) => return Err(AppError::InvalidCredentials),
            Err(e) => {
                // A mensagem para o cliente é sempre a mesma
                tracing::error!("Falha no provedor de identidade durante o login: {:?}", e);
                return Err(AppError::InvalidCredentials);
            }
        };

        self.on_login_success(&session, device).await;

        Ok(AuthResponse {
            token: session.access_token,
            expires_at: session.expires_at,
            redirect_to: DASHBOARD_PATH,
        })
    }

    pub async fn on_login_success(
        &self,
        session: &IdentitySession,
        device: &DeviceInfo,
    ) -> Option<AdminSession> {
        let admin = self.resolver.find_admin(session.user.id).await?;

        let new_session = NewAdminSession {
            admin_user_id: admin.id,
            login_at: Utc::now(),
            device_info: device.truncated_user_agent(),
            ip_address: device.ip_address.clone(),
        };

        match self.sessions.open(new_session).await {
            Ok(row) => {
                tracing::info!(admin_id = %admin.id, session_id = %row.id, "📝 Sessão de admin registrada");
                Some(row)
            }
            Err(e) => {
                tracing::warn!(admin_id = %admin.id, "Falha ao registrar sessão de admin: {:?}", e);
                None
            }
        }
    }

    // Sempre termina em sign-out + redirecionamento para o login
    pub async fn on_logout_request(&self, token: Option<&str>) -> LogoutResponse {
        if let Some(token) = token {
            let session = self.current_session(token).await;
            if let Some(session) = &session {
                self.close_audit_row(session).await;
            }
            self.sign_out(token, session.map(|s| s.token_id)).await;
        }

        LogoutResponse { redirect_to: LOGIN_PATH }
    }

    async fn current_session(&self, token: &str) -> Option<IdentitySession> {
        match self.identity.get_current_session(token).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Falha ao resolver sessão no logout: {:?}", e);
                None
            }
        }
    }

    // O token continua válido até expirar se a revogação não gravar
    async fn sign_out(&self, token: &str, token_id: Option<Uuid>) {
        for attempt in 1..=SIGN_OUT_ATTEMPTS {
            match self.identity.sign_out(token).await {
                Ok(()) => return,
                Err(e) if attempt < SIGN_OUT_ATTEMPTS => {
                    tracing::warn!(?token_id, attempt, "Falha ao revogar o token, tentando de novo: {:?}", e);
                }
                Err(e) => {
                    tracing::error!(?token_id, "Token não revogado no logout, segue válido até expirar: {:?}", e);
                }
            }
        }
    }

    async fn close_audit_row(&self, session: &IdentitySession) {
        let Some(admin) = self.resolver.find_admin(session.user.id).await else {
            return;
        };

        match self.sessions.close_latest_active(admin.id, Utc::now()).await {
            Ok(Some(row)) => {
                tracing::info!(admin_id = %admin.id, session_id = %row.id, "Sessão de admin encerrada")
            }
            Ok(None) => tracing::debug!(admin_id = %admin.id, "Nenhuma sessão ativa para encerrar"),
            Err(e) => tracing::warn!(admin_id = %admin.id, "Falha ao encerrar sessão de admin: {:?}", e),
        }
    }

    pub async fn login_history(&self, admin_user_id: Uuid) -> Result<Vec<AdminSession>, AppError> {
        self.sessions.list_for_admin(admin_user_id, LOGIN_HISTORY_LIMIT).await
    }
}
