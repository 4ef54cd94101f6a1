// src/models/notification.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const ORDER_NOTIFICATION_KIND: &str = "order";

// Linha da tabela 'admin_notifications', ou um alerta sintetizado a partir de um pedido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[schema(example = "New Order - Table 4")]
    pub title: String,
    #[schema(example = "₹250 order received")]
    pub message: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "order")]
    pub kind: String,
    pub order_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// Só os campos de 'orders' que o feed consome
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInsert {
    pub id: Uuid,
    pub table_number: i32,
    pub total_price: Decimal,
}

impl OrderInsert {
    pub fn into_notification(self, now: DateTime<Utc>) -> Notification {
        Notification {
            id: self.id,
            title: format!("New Order - Table {}", self.table_number),
            message: format!("₹{} order received", self.total_price.normalize()),
            kind: ORDER_NOTIFICATION_KIND.to_string(),
            order_id: Some(self.id),
            is_read: false,
            created_at: now,
        }
    }

    pub fn toast_message(&self) -> String {
        format!("🆕 New order from Table {}!", self.table_number)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

// Eventos empurrados para os painéis conectados (SSE)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShellEvent {
    #[serde(rename_all = "camelCase")]
    Toast { message: String, duration_ms: u64 },
    #[serde(rename_all = "camelCase")]
    Chime { sound_url: String, volume: f32 },
    #[serde(rename_all = "camelCase")]
    Warning { message: String },
}
