// src/handlers/shell.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    config::AppState,
    middleware::auth::BearerToken,
    models::navigation::ShellOutcome,
    services::navigation::DASHBOARD_PATH,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShellQuery {
    // Rota atual do painel, ex.: "/admin/tables"
    pub path: Option<String>,
}

// GET /api/admin/shell?path=
#[utoipa::path(
    get,
    path = "/api/admin/shell",
    tag = "Shell",
    params(ShellQuery),
    responses(
        (status = 200, description = "Tela de login, redirecionamento ou o layout do painel", body = ShellOutcome)
    ),
    security(("api_jwt" = []))
)]
pub async fn enter_shell(
    State(app_state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(query): Query<ShellQuery>,
) -> Json<ShellOutcome> {
    let path = query.path.as_deref().unwrap_or(DASHBOARD_PATH);
    Json(app_state.shell.enter(token.as_deref(), path).await)
}
