// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{BearerToken, CurrentAdmin},
    models::{
        admin::{AdminProfile, AdminRole},
        auth::{AuthResponse, ChangePasswordPayload, LoginPayload, LogoutResponse, MessageResponse},
        session::{AdminSession, DeviceInfo},
    },
};

// POST /api/admin/login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    device: DeviceInfo,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .sessions
        .login(payload.email.trim(), &payload.password, &device)
        .await?;

    Ok(Json(response))
}

// POST /api/admin/logout
// Nunca falha: a bookkeeping é melhor esforço e o redirecionamento sempre volta
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão encerrada", body = LogoutResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Json<LogoutResponse> {
    Json(app_state.sessions.on_logout_request(token.as_deref()).await)
}

// GET /api/admin/profile
#[utoipa::path(
    get,
    path = "/api/admin/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Perfil do admin logado", body = AdminProfile),
        (status = 401, description = "Sem sessão")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    admin: CurrentAdmin,
) -> Result<Json<AdminProfile>, AppError> {
    let user = &admin.session.user;

    let profile = match app_state.resolver.find_admin(user.id).await {
        Some(row) => AdminProfile {
            id: row.id,
            email: user.email.clone(),
            name: admin.identity.name.clone(),
            role: admin.identity.role,
            role_label: admin.identity.role.label(),
            status: row.status,
            created_at: row.created_at,
        },
        // Sem linha em admin_users: perfil montado a partir da identidade
        None => AdminProfile {
            id: user.id,
            email: user.email.clone(),
            name: admin.identity.name.clone(),
            role: AdminRole::default(),
            role_label: AdminRole::default().label(),
            status: "active".to_string(),
            created_at: user.created_at,
        },
    };

    Ok(Json(profile))
}

// PUT /api/admin/profile/password
#[utoipa::path(
    put,
    path = "/api/admin/profile/password",
    tag = "Profile",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Senha alterada", body = MessageResponse),
        (status = 400, description = "Senhas diferentes ou curtas demais")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    admin: CurrentAdmin,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    if payload.new_password != payload.confirm_password {
        return Err(AppError::InvalidInput("New passwords don't match".to_string()));
    }

    app_state
        .identity
        .update_password(admin.session.user.id, &payload.new_password)
        .await?;

    tracing::info!(user_id = %admin.session.user.id, "🔒 Senha alterada");
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

// GET /api/admin/login-history
#[utoipa::path(
    get,
    path = "/api/admin/login-history",
    tag = "Profile",
    responses(
        (status = 200, description = "Últimos logins, mais novo primeiro", body = Vec<AdminSession>)
    ),
    security(("api_jwt" = []))
)]
pub async fn login_history(
    State(app_state): State<AppState>,
    admin: CurrentAdmin,
) -> Result<Json<Vec<AdminSession>>, AppError> {
    let Some(admin_user_id) = admin.identity.admin_user_id else {
        return Ok(Json(Vec::new()));
    };

    let history = app_state.sessions.login_history(admin_user_id).await?;
    Ok(Json(history))
}
