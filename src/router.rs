// src/router.rs

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn app(app_state: AppState) -> Router {
    // Rotas do painel. O portão de papel fica nos extratores de cada handler.
    let admin_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/shell", get(handlers::shell::enter_shell))
        .route("/profile", get(handlers::auth::get_profile))
        .route("/profile/password", put(handlers::auth::change_password))
        .route("/login-history", get(handlers::auth::login_history))
        .route("/notifications", get(handlers::notifications::list_notifications))
        .route("/notifications/read-all", post(handlers::notifications::mark_all_read))
        .route("/notifications/stream", get(handlers::notifications::stream_events))
        .route("/notifications/{id}/read", post(handlers::notifications::mark_read))
        .route(
            "/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route("/employees/{id}", delete(handlers::employees::delete_employee))
        .route("/employees/{id}/status", patch(handlers::employees::toggle_employee_status))
        .route("/gallery", get(handlers::gallery::get_gallery))
        .route("/gallery/images", post(handlers::gallery::add_image))
        .route("/gallery/images/{id}", delete(handlers::gallery::delete_image))
        .route("/gallery/categories", post(handlers::gallery::add_category))
        .route("/gallery/categories/{id}", delete(handlers::gallery::delete_category));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
