// src/handlers/notifications.rs

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::{
    config::AppState,
    middleware::auth::CurrentAdmin,
    models::notification::{FeedResponse, ShellEvent},
    services::notification_feed::NotificationFeed,
};

fn feed_response(feed: &NotificationFeed) -> FeedResponse {
    FeedResponse {
        notifications: feed.snapshot(),
        unread_count: feed.unread_count(),
    }
}

// GET /api/admin/notifications
#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Até 20 alertas, mais novo primeiro", body = FeedResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    _admin: CurrentAdmin,
) -> Json<FeedResponse> {
    Json(feed_response(app_state.shell.feed()))
}

// POST /api/admin/notifications/{id}/read
// A gravação roda em segundo plano; a resposta já reflete a mudança local
#[utoipa::path(
    post,
    path = "/api/admin/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Feed atualizado", body = FeedResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Json<FeedResponse> {
    let feed = app_state.shell.feed();
    let _pending = feed.mark_read(id);
    Json(feed_response(feed))
}

// POST /api/admin/notifications/read-all
#[utoipa::path(
    post,
    path = "/api/admin/notifications/read-all",
    tag = "Notifications",
    responses(
        (status = 200, description = "Feed atualizado", body = FeedResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    _admin: CurrentAdmin,
) -> Json<FeedResponse> {
    let feed = app_state.shell.feed();
    let _pending = feed.mark_all_read();
    Json(feed_response(feed))
}

// GET /api/admin/notifications/stream
#[utoipa::path(
    get,
    path = "/api/admin/notifications/stream",
    tag = "Notifications",
    responses(
        (status = 200, description = "Eventos SSE: toast, chime e warning", body = ShellEvent, content_type = "text/event-stream")
    ),
    security(("api_jwt" = []))
)]
pub async fn stream_events(
    State(app_state): State<AppState>,
    admin: CurrentAdmin,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = app_state.alerts.subscribe();
    tracing::debug!(user_id = %admin.session.user.id, "Painel conectado ao stream de alertas");

    let events = async_stream::stream! {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let sse = Event::default().json_data(&event).unwrap_or_else(|e| {
                        tracing::warn!("Falha ao serializar evento SSE: {}", e);
                        Event::default().comment("serialization error")
                    });
                    yield Ok(sse);
                }
                // Painel lento: pula o que perdeu e segue
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Painel atrasado, eventos descartados");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(events).keep_alive(KeepAlive::default())
}
