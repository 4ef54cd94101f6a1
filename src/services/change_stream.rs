// src/services/change_stream.rs

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use sqlx::{postgres::PgListener, PgPool};
use tokio::sync::oneshot;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub row: serde_json::Value,
}

pub type ChangeHandler = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

/// Assinatura ativa de um stream de mudanças.
///
/// `cancel` consome o handle, então a liberação acontece no máximo uma vez.
/// Se o handle for descartado sem `cancel`, o `Drop` libera do mesmo jeito.
#[must_use = "descartar a assinatura cancela o stream imediatamente"]
pub struct Subscription {
    label: String,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(label: impl Into<String>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label: label.into(),
            release: Some(Box::new(release)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cancel(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
            tracing::debug!(channel = %self.label, "Assinatura liberada");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[async_trait]
pub trait ChangeStream: Send + Sync {
    async fn subscribe(
        &self,
        table: &str,
        kind: ChangeKind,
        handler: ChangeHandler,
    ) -> Result<Subscription, AppError>;
}

// Backoff exponencial com teto
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub base: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base.saturating_mul(factor).min(self.max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            max: Duration::from_secs(30),
        }
    }
}

// Canal usado pelo trigger do Postgres, ex.: "orders_insert"
pub fn channel_name(table: &str, kind: ChangeKind) -> String {
    format!("{}_{}", table, kind.as_str())
}

/// Stream de mudanças via `LISTEN/NOTIFY`.
///
/// O trigger `AFTER INSERT` publica `row_to_json(NEW)` no canal da tabela.
/// Conexões perdidas são refeitas com backoff; eventos emitidos durante a
/// queda se perdem (é um stream, não uma fila).
#[derive(Clone)]
pub struct PgChangeStream {
    pool: PgPool,
    backoff: Backoff,
}

impl PgChangeStream {
    pub fn new(pool: PgPool, backoff: Backoff) -> Self {
        Self { pool, backoff }
    }
}

#[async_trait]
impl ChangeStream for PgChangeStream {
    async fn subscribe(
        &self,
        table: &str,
        kind: ChangeKind,
        handler: ChangeHandler,
    ) -> Result<Subscription, AppError> {
        let channel = channel_name(table, kind);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        tokio::spawn(listen_loop(
            self.pool.clone(),
            self.backoff,
            table.to_string(),
            kind,
            channel.clone(),
            handler,
            stop_rx,
        ));

        Ok(Subscription::new(channel, move || {
            // O loop pode já ter terminado; nesse caso não há nada a avisar
            let _ = stop_tx.send(());
        }))
    }
}

async fn listen_loop(
    pool: PgPool,
    backoff: Backoff,
    table: String,
    kind: ChangeKind,
    channel: String,
    handler: ChangeHandler,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut attempt: u32 = 0;

    loop {
        match connect(&pool, &channel).await {
            Ok(mut listener) => {
                if attempt > 0 {
                    tracing::info!(channel = %channel, "✅ Stream de mudanças reconectado");
                }
                attempt = 0;

                loop {
                    tokio::select! {
                        _ = &mut stop_rx => return,
                        received = listener.try_recv() => match received {
                            Ok(Some(notification)) => {
                                match serde_json::from_str::<serde_json::Value>(notification.payload()) {
                                    Ok(row) => handler(ChangeEvent { table: table.clone(), kind, row }),
                                    Err(e) => tracing::warn!(channel = %channel, "Payload inválido no stream: {}", e),
                                }
                            }
                            Ok(None) => {
                                tracing::warn!(channel = %channel, "Conexão do stream caiu");
                                break;
                            }
                            Err(e) => {
                                tracing::warn!(channel = %channel, "Erro no stream: {}", e);
                                break;
                            }
                        }
                    }
                }
            }
            Err(e) => tracing::warn!(channel = %channel, "Falha ao escutar o canal: {}", e),
        }

        attempt = attempt.saturating_add(1);
        let delay = backoff.delay(attempt);
        tracing::info!(channel = %channel, attempt, ?delay, "Nova tentativa de conexão do stream");

        tokio::select! {
            _ = &mut stop_rx => return,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

async fn connect(pool: &PgPool, channel: &str) -> Result<PgListener, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(channel).await?;
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn backoff_doubles_until_the_cap() {
        let backoff = Backoff {
            base: Duration::from_millis(500),
            max: Duration::from_secs(5),
        };
        assert_eq!(backoff.delay(1), Duration::from_millis(500));
        assert_eq!(backoff.delay(2), Duration::from_millis(1000));
        assert_eq!(backoff.delay(4), Duration::from_millis(4000));
        assert_eq!(backoff.delay(5), Duration::from_secs(5));
        assert_eq!(backoff.delay(60), Duration::from_secs(5));
    }

    #[test]
    fn channel_names_follow_the_trigger() {
        assert_eq!(channel_name("orders", ChangeKind::Insert), "orders_insert");
    }

    #[test]
    fn subscription_releases_exactly_once() {
        let released = Arc::new(AtomicUsize::new(0));

        let counter = released.clone();
        let cancelled = Subscription::new("orders_insert", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cancelled.cancel();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        let counter = released.clone();
        {
            let _dropped = Subscription::new("orders_insert", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }
}
