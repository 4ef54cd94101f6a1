// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::navigation::LOGIN_PATH;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Mensagem de validação simples (formulários de uma regra só)
    #[error("{0}")]
    InvalidInput(String),

    // Nunca distingue senha errada de conta inexistente
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Sessão ausente ou expirada")]
    Unauthenticated,

    #[error("Acesso negado à seção '{0}'")]
    Forbidden(String),

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("ID de funcionário já existe")]
    EmployeeIdTaken,

    #[error("Categoria em uso")]
    CategoryInUse,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidInput(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Unauthenticated => {
                // O cliente usa `redirectTo` para voltar à tela de login
                let body = Json(json!({
                    "error": "Please sign in to continue.",
                    "redirectTo": LOGIN_PATH,
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password. Please try again.",
            ),
            AppError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                "You do not have access to this section.",
            ),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found."),
            AppError::EmployeeIdTaken => (StatusCode::CONFLICT, "Employee ID already exists"),
            AppError::CategoryInUse => (
                StatusCode::CONFLICT,
                "Failed to delete category. Make sure no images are using this category.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
