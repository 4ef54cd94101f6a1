// src/services/notification_feed.rs

use std::{
    collections::HashSet,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotificationStore,
    models::notification::{Notification, OrderInsert},
    services::{
        alerts::AlertSink,
        change_stream::{Backoff, ChangeHandler},
    },
};

pub const FEED_CAPACITY: usize = 20;

#[derive(Default)]
struct FeedState {
    entries: Vec<Notification>,
    // Ids vindos do stream ao vivo; não existem em 'admin_notifications'
    live: HashSet<Uuid>,
}

impl FeedState {
    fn push_live(&mut self, notification: Notification) {
        self.live.insert(notification.id);
        self.entries.insert(0, notification);
        self.entries.truncate(FEED_CAPACITY);
        self.forget_evicted();
    }

    // Ao vivo no topo, depois o histórico. Leitura local pendente não é desfeita.
    fn merge_history(&mut self, rows: Vec<Notification>) {
        let (mut merged, previous): (Vec<Notification>, Vec<Notification>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|n| self.live.contains(&n.id));
        merged.extend(rows.into_iter().filter(|row| !self.live.contains(&row.id)).map(|mut row| {
            if previous.iter().any(|n| n.id == row.id && n.is_read) {
                row.is_read = true;
            }
            row
        }));
        merged.truncate(FEED_CAPACITY);
        self.entries = merged;
        self.forget_evicted();
    }

    fn forget_evicted(&mut self) {
        let entries = &self.entries;
        self.live.retain(|id| entries.iter().any(|n| n.id == *id));
    }
}

const READ_STATE_WARNING: &str =
    "Couldn't save read status. The notification was marked unread again.";

// Tentativas de gravar o estado de leitura antes de desfazer a mudança local
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Backoff {
                base: Duration::from_millis(200),
                max: Duration::from_secs(2),
            },
        }
    }
}

/// Lista de alertas em memória, mais novo primeiro, no máximo 20 itens.
///
/// O histórico do banco é recarregado a cada montagem do painel; eventos ao
/// vivo entram sempre no topo e sobrevivem à recarga, mesmo que o histórico
/// tenha algo com `created_at` mais recente.
/// Marcar como lido é otimista: a lista muda na hora e a gravação roda em
/// segundo plano com retry. Se todas as tentativas falharem, a mudança é
/// desfeita e um aviso é enviado aos painéis.
pub struct NotificationFeed {
    state: Mutex<FeedState>,
    store: Arc<dyn NotificationStore>,
    alerts: Arc<dyn AlertSink>,
    retry: RetryPolicy,
}

impl NotificationFeed {
    pub fn new(store: Arc<dyn NotificationStore>, alerts: Arc<dyn AlertSink>, retry: RetryPolicy) -> Self {
        Self {
            state: Mutex::new(FeedState::default()),
            store,
            alerts,
            retry,
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Troca o histórico pelo do banco. Em caso de falha mantém o estado anterior.
    pub async fn load_history(&self) -> bool {
        match self.store.recent(FEED_CAPACITY as i64).await {
            Ok(mut rows) => {
                rows.truncate(FEED_CAPACITY);
                tracing::debug!(count = rows.len(), "Histórico de notificações carregado");
                self.state().merge_history(rows);
                true
            }
            Err(e) => {
                tracing::warn!("Falha ao carregar histórico de notificações: {:?}", e);
                false
            }
        }
    }

    pub fn on_insert_event(&self, row: &serde_json::Value) {
        let order: OrderInsert = match serde_json::from_value(row.clone()) {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!("Evento de pedido ignorado (formato inesperado): {}", e);
                return;
            }
        };

        let toast = order.toast_message();
        let notification = order.into_notification(Utc::now());
        tracing::info!(order_id = %notification.id, "🛎️ {}", notification.title);

        self.state().push_live(notification);

        // Melhor esforço: o estado acima já foi atualizado
        if let Err(e) = self.alerts.chime() {
            tracing::debug!("Alerta sonoro não tocou: {}", e);
        }
        self.alerts.toast(&toast);
    }

    // Handler entregue ao stream de mudanças de 'orders'
    pub fn insert_handler(self: &Arc<Self>) -> ChangeHandler {
        let feed = Arc::clone(self);
        Arc::new(move |event| {
            tracing::trace!(table = %event.table, kind = event.kind.as_str(), "Evento de mudança recebido");
            feed.on_insert_event(&event.row)
        })
    }

    // None => nada mudou (já lida ou desconhecida), nenhuma gravação disparada
    pub fn mark_read(self: &Arc<Self>, id: Uuid) -> Option<JoinHandle<()>> {
        let changed = {
            let mut state = self.state();
            let entries = &mut state.entries;
            match entries.iter_mut().find(|n| n.id == id) {
                Some(notification) if !notification.is_read => {
                    notification.is_read = true;
                    true
                }
                _ => false,
            }
        };
        if !changed {
            return None;
        }

        let feed = Arc::clone(self);
        Some(tokio::spawn(async move {
            let store = feed.store.clone();
            let persisted = feed
                .persist_with_retry("mark_read", || {
                    let store = store.clone();
                    async move { store.mark_read(id).await }
                })
                .await;
            if !persisted {
                feed.revert(&[id]);
            }
        }))
    }

    pub fn mark_all_read(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let flipped: Vec<Uuid> = {
            let mut state = self.state();
            let entries = &mut state.entries;
            entries
                .iter_mut()
                .filter(|n| !n.is_read)
                .map(|n| {
                    n.is_read = true;
                    n.id
                })
                .collect()
        };
        if flipped.is_empty() {
            return None;
        }

        let feed = Arc::clone(self);
        Some(tokio::spawn(async move {
            let store = feed.store.clone();
            let persisted = feed
                .persist_with_retry("mark_all_read", || {
                    let store = store.clone();
                    async move { store.mark_all_read().await }
                })
                .await;
            if !persisted {
                feed.revert(&flipped);
            }
        }))
    }

    async fn persist_with_retry<F, Fut>(&self, op: &'static str, mut write: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let attempts = self.retry.attempts.max(1);
        for attempt in 1..=attempts {
            match write().await {
                Ok(()) => return true,
                Err(e) => {
                    tracing::warn!(op, attempt, "Falha ao gravar estado de leitura: {:?}", e);
                    if attempt < attempts {
                        tokio::time::sleep(self.retry.backoff.delay(attempt)).await;
                    }
                }
            }
        }
        false
    }

    fn revert(&self, ids: &[Uuid]) {
        {
            let mut state = self.state();
            let entries = &mut state.entries;
            for notification in entries.iter_mut().filter(|n| ids.contains(&n.id)) {
                notification.is_read = false;
            }
        }
        tracing::warn!(count = ids.len(), "Estado de leitura desfeito após falhas de gravação");
        self.alerts.warn(READ_STATE_WARNING);
    }

    pub fn unread_count(&self) -> usize {
        self.state().entries.iter().filter(|n| !n.is_read).count()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.state().entries.clone()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }
}
