// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AdminSessionStore, AdminUserRepository, AdminUserStore, AuthUserStore,
        EmployeeRepository, EmployeeStore, GalleryRepository, GalleryStore, NotificationRepository,
        NotificationStore, SessionRepository, UserRepository,
    },
    services::{
        admin_shell::AdminShell,
        alerts::BroadcastAlerts,
        change_stream::{Backoff, ChangeStream},
        employee_service::EmployeeService,
        gallery_service::GalleryService,
        identity::{IdentityProvider, JwtIdentityProvider},
        notification_feed::{NotificationFeed, RetryPolicy},
        role_resolver::RoleResolver,
        session_lifecycle::SessionLifecycle,
    },
};

pub const DEFAULT_ALERT_SOUND_URL: &str =
    "https://assets.mixkit.co/active_storage/sfx/2869/2869-preview.mp3";

// Capacidade do canal de eventos SSE por painel
const ALERT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub token_ttl_hours: i64,
    pub stream_backoff: Backoff,
    pub alert_sound_url: String,
}

impl Config {
    // Carrega o .env (se existir) e lê as variáveis de ambiente
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{} deve ser definida", key))
        };

        let number = |key: &str, default: u64| -> anyhow::Result<u64> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} inválida: '{}'", key, raw)),
                None => Ok(default),
            }
        };

        let stream_backoff = Backoff {
            base: Duration::from_millis(number("STREAM_RECONNECT_BASE_MS", 500)?),
            max: Duration::from_millis(number("STREAM_RECONNECT_MAX_MS", 30_000)?),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: u32::try_from(number("DB_MAX_CONNECTIONS", 5)?)
                .context("DB_MAX_CONNECTIONS fora do intervalo")?,
            token_ttl_hours: i64::try_from(number("TOKEN_TTL_HOURS", 12)?)
                .context("TOKEN_TTL_HOURS fora do intervalo")?,
            stream_backoff,
            alert_sound_url: lookup("ALERT_SOUND_URL")
                .unwrap_or_else(|| DEFAULT_ALERT_SOUND_URL.to_string()),
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

// Um store por tabela; Postgres em produção, memória nos testes
#[derive(Clone)]
pub struct Stores {
    pub auth_users: Arc<dyn AuthUserStore>,
    pub admins: Arc<dyn AdminUserStore>,
    pub sessions: Arc<dyn AdminSessionStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub gallery: Arc<dyn GalleryStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            auth_users: Arc::new(UserRepository::new(pool.clone())),
            admins: Arc::new(AdminUserRepository::new(pool.clone())),
            sessions: Arc::new(SessionRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            employees: Arc::new(EmployeeRepository::new(pool.clone())),
            gallery: Arc::new(GalleryRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub resolver: RoleResolver,
    pub sessions: SessionLifecycle,
    pub shell: Arc<AdminShell>,
    pub alerts: BroadcastAlerts,
    pub employees: EmployeeService,
    pub gallery: GalleryService,
}

impl AppState {
    // Monta o gráfico de dependências e o painel (com a assinatura de pedidos)
    pub async fn new(config: &Config, stores: Stores, stream: &dyn ChangeStream) -> anyhow::Result<Self> {
        let identity: Arc<dyn IdentityProvider> = Arc::new(JwtIdentityProvider::new(
            stores.auth_users,
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
        ));
        let resolver = RoleResolver::new(stores.admins);
        let sessions = SessionLifecycle::new(identity.clone(), resolver.clone(), stores.sessions);

        let alerts = BroadcastAlerts::new(ALERT_CHANNEL_CAPACITY, config.alert_sound_url.clone());
        let feed = Arc::new(NotificationFeed::new(
            stores.notifications,
            Arc::new(alerts.clone()),
            RetryPolicy::default(),
        ));

        let shell = AdminShell::mount(identity.clone(), resolver.clone(), feed, stream)
            .await
            .context("Falha ao montar o painel")?;

        Ok(Self {
            identity,
            resolver,
            sessions,
            shell: Arc::new(shell),
            alerts,
            employees: EmployeeService::new(stores.employees),
            gallery: GalleryService::new(stores.gallery),
        })
    }
}
