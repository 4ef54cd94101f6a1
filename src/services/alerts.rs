// src/services/alerts.rs

use tokio::sync::broadcast;

use crate::models::notification::ShellEvent;

pub const TOAST_DURATION_MS: u64 = 5000;
pub const CHIME_VOLUME: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("nenhum painel conectado")]
    NoListeners,
}

// Efeitos colaterais do feed. Falhas aqui nunca afetam o estado do feed.
pub trait AlertSink: Send + Sync {
    fn chime(&self) -> Result<(), AlertError>;
    fn toast(&self, message: &str);
    fn warn(&self, message: &str);
}

// Empurra os eventos para os painéis conectados via SSE
#[derive(Clone)]
pub struct BroadcastAlerts {
    sender: broadcast::Sender<ShellEvent>,
    sound_url: String,
}

impl BroadcastAlerts {
    pub fn new(capacity: usize, sound_url: String) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, sound_url }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, event: ShellEvent) -> Result<(), AlertError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|_| AlertError::NoListeners)
    }
}

impl AlertSink for BroadcastAlerts {
    fn chime(&self) -> Result<(), AlertError> {
        self.publish(ShellEvent::Chime {
            sound_url: self.sound_url.clone(),
            volume: CHIME_VOLUME,
        })
    }

    fn toast(&self, message: &str) {
        // Sem ninguém ouvindo o toast simplesmente some
        let _ = self.publish(ShellEvent::Toast {
            message: message.to_string(),
            duration_ms: TOAST_DURATION_MS,
        });
    }

    fn warn(&self, message: &str) {
        let _ = self.publish(ShellEvent::Warning {
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_subscribers() {
        let alerts = BroadcastAlerts::new(8, "https://cdn.test/chime.mp3".into());
        let mut rx = alerts.subscribe();

        alerts.chime().unwrap();
        alerts.toast("🆕 New order from Table 4!");

        assert_eq!(
            rx.recv().await.unwrap(),
            ShellEvent::Chime { sound_url: "https://cdn.test/chime.mp3".into(), volume: 0.5 }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            ShellEvent::Toast { message: "🆕 New order from Table 4!".into(), duration_ms: 5000 }
        );
    }

    #[test]
    fn chime_without_listeners_is_an_error_toast_is_not() {
        let alerts = BroadcastAlerts::new(8, "https://cdn.test/chime.mp3".into());
        assert!(matches!(alerts.chime(), Err(AlertError::NoListeners)));
        alerts.toast("ignored");
        alerts.warn("ignored");
    }
}
