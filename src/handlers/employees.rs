// src/handlers/employees.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{EmployeesSection, RequireSection},
    models::employee::{CreateEmployeePayload, CreatedEmployee, Employee},
};

// GET /api/admin/employees
#[utoipa::path(
    get,
    path = "/api/admin/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Funcionários, mais novo primeiro", body = Vec<Employee>),
        (status = 403, description = "Apenas super_admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    _guard: RequireSection<EmployeesSection>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(app_state.employees.list().await?))
}

// POST /api/admin/employees
#[utoipa::path(
    post,
    path = "/api/admin/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado; a senha só aparece aqui", body = CreatedEmployee),
        (status = 409, description = "ID de funcionário já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    RequireSection(admin, _): RequireSection<EmployeesSection>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.employees.create(payload).await?;
    tracing::info!(created_by = %admin.session.user.id, employee = %created.id, "Funcionário cadastrado pelo painel");
    Ok((StatusCode::CREATED, Json(created)))
}

// PATCH /api/admin/employees/{id}/status
#[utoipa::path(
    patch,
    path = "/api/admin/employees/{id}/status",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Status invertido", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_employee_status(
    State(app_state): State<AppState>,
    _guard: RequireSection<EmployeesSection>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(app_state.employees.toggle_status(id).await?))
}

// DELETE /api/admin/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    RequireSection(admin, _): RequireSection<EmployeesSection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.employees.delete(id).await?;
    tracing::info!(deleted_by = %admin.session.user.id, employee = %id, "🗑️ Funcionário removido");
    Ok(StatusCode::NO_CONTENT)
}
