// src/services/admin_shell.rs

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    common::error::AppError,
    models::{
        admin::AdminIdentity,
        navigation::{ShellOutcome, ShellUser, ShellView},
    },
    services::{
        change_stream::{ChangeKind, ChangeStream, Subscription},
        identity::IdentityProvider,
        navigation::{self, LOGIN_PATH},
        notification_feed::NotificationFeed,
        role_resolver::RoleResolver,
    },
};

pub const ORDERS_TABLE: &str = "orders";

/// O layout autenticado do painel, montado uma vez na subida do servidor.
///
/// Enquanto montado mantém exatamente uma assinatura de inserts em `orders`.
/// `unmount` libera a assinatura; se nunca for chamado, o `Drop` da
/// `Subscription` faz o mesmo.
pub struct AdminShell {
    identity: Arc<dyn IdentityProvider>,
    resolver: RoleResolver,
    feed: Arc<NotificationFeed>,
    subscription: Mutex<Option<Subscription>>,
}

impl AdminShell {
    pub async fn mount(
        identity: Arc<dyn IdentityProvider>,
        resolver: RoleResolver,
        feed: Arc<NotificationFeed>,
        stream: &dyn ChangeStream,
    ) -> Result<Self, AppError> {
        feed.load_history().await;

        let subscription = stream
            .subscribe(ORDERS_TABLE, ChangeKind::Insert, feed.insert_handler())
            .await?;
        tracing::info!(
            channel = subscription.label(),
            history = feed.len(),
            "🔔 Painel montado, escutando novos pedidos"
        );

        Ok(Self {
            identity,
            resolver,
            feed,
            subscription: Mutex::new(Some(subscription)),
        })
    }

    pub fn unmount(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.cancel();
            tracing::info!("Painel desmontado");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn feed(&self) -> &Arc<NotificationFeed> {
        &self.feed
    }

    pub async fn enter(&self, token: Option<&str>, path: &str) -> ShellOutcome {
        if path == LOGIN_PATH {
            return ShellOutcome::LoginScreen;
        }

        let session = match token {
            Some(token) => match self.identity.get_current_session(token).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("Falha ao verificar a sessão: {:?}", e);
                    None
                }
            },
            None => None,
        };

        let Some(session) = session else {
            return ShellOutcome::RedirectToLogin { to: LOGIN_PATH };
        };

        let identity = self.resolver.resolve(session.user.id).await;
        // Cada entrada no painel é uma montagem: o histórico vem do banco de novo
        self.feed.load_history().await;
        ShellOutcome::Render(self.view_for(&identity, path))
    }

    pub fn view_for(&self, identity: &AdminIdentity, path: &str) -> ShellView {
        ShellView {
            user: ShellUser {
                name: identity.name.clone(),
                initial: identity.initial(),
                role: identity.role,
                role_label: identity.role.label(),
            },
            nav: navigation::visible_items(identity.role),
            menu: navigation::visible_menu_items(identity.role),
            section_label: navigation::section_label(path),
            unread_count: self.feed.unread_count(),
        }
    }
}
