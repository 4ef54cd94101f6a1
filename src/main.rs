//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod router;
mod services;
#[cfg(test)]
mod testing;

use crate::config::{AppState, Config, Stores};
use crate::services::change_stream::PgChangeStream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger com filtro via RUST_LOG (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let db_pool = config.connect().await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let change_stream = PgChangeStream::new(db_pool.clone(), config.stream_backoff);
    let app_state = AppState::new(&config, Stores::postgres(db_pool), &change_stream).await?;
    let shell = app_state.shell.clone();

    let app = router::app(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Libera a assinatura de pedidos antes de sair
    if shell.is_mounted() {
        shell.unmount();
    }
    tracing::info!("👋 Servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Sem sinal não há como encerrar com calma: segue rodando
        tracing::error!("Falha ao escutar o sinal de encerramento: {}", e);
        std::future::pending::<()>().await;
    }
}
