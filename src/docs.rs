// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,

        // --- Shell ---
        handlers::shell::enter_shell,

        // --- Profile ---
        handlers::auth::get_profile,
        handlers::auth::change_password,
        handlers::auth::login_history,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,
        handlers::notifications::stream_events,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::toggle_employee_status,
        handlers::employees::delete_employee,

        // --- Gallery ---
        handlers::gallery::get_gallery,
        handlers::gallery::add_image,
        handlers::gallery::add_category,
        handlers::gallery::delete_image,
        handlers::gallery::delete_category,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::AuthUser,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::LogoutResponse,
            models::auth::ChangePasswordPayload,
            models::auth::MessageResponse,

            // --- Admin ---
            models::admin::AdminRole,
            models::admin::AdminUser,
            models::admin::AdminIdentity,
            models::admin::AdminProfile,
            models::session::AdminSession,

            // --- Shell ---
            models::navigation::NavItem,
            models::navigation::ShellUser,
            models::navigation::ShellView,
            models::navigation::ShellOutcome,

            // --- Notifications ---
            models::notification::Notification,
            models::notification::FeedResponse,
            models::notification::ShellEvent,

            // --- Employees ---
            models::employee::Employee,
            models::employee::EmployeeRole,
            models::employee::CreateEmployeePayload,
            models::employee::CreatedEmployee,

            // --- Gallery ---
            models::gallery::GalleryCategory,
            models::gallery::GalleryImage,
            models::gallery::NewImagePayload,
            models::gallery::NewCategoryPayload,
            models::gallery::GalleryResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login e logout do painel"),
        (name = "Shell", description = "Portão de navegação e layout autenticado"),
        (name = "Profile", description = "Perfil, senha e histórico de logins"),
        (name = "Notifications", description = "Feed de alertas e eventos ao vivo"),
        (name = "Employees", description = "Gestão de funcionários (super_admin)"),
        (name = "Gallery", description = "Imagens e categorias da galeria")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/admin/login",
            "/api/admin/shell",
            "/api/admin/notifications/{id}/read",
            "/api/admin/employees/{id}/status",
            "/api/admin/gallery/categories/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {}", path);
        }
    }

    #[test]
    fn payload_schemas_match_what_handlers_read() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        let password = schemas["ChangePasswordPayload"]["properties"].as_object().unwrap();
        assert!(password.contains_key("newPassword"));
        assert!(!password.contains_key("currentPassword"));

        let roles = schemas["EmployeeRole"]["enum"].as_array().unwrap();
        assert!(roles.iter().any(|r| r == "admin"));
    }
}
