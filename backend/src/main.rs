//! iAircon API server.

use std::net::SocketAddr;

use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use iaircon::adapters::http::{router, HttpOptions};
use iaircon::bootstrap;
use iaircon::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    let app = bootstrap::build(&config).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher_task = app.dispatcher.map(|dispatcher| {
        let rx = shutdown_rx.clone();
        tokio::spawn(async move { dispatcher.run(rx).await })
    });

    let options = HttpOptions {
        request_timeout: config.server.request_timeout(),
        allowed_origins: config.server.cors_origins_list(),
    };
    let service = router(app.state, &options).into_make_service_with_connect_info::<SocketAddr>();

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "iaircon listening");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(task) = dispatcher_task {
        if let Err(err) = task.await {
            tracing::error!(error = %err, "greeting dispatcher task failed");
        }
    }
    tracing::info!("shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over `server.log_level`. JSON lines in production.
fn init_tracing(server: &ServerConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| server.log_level.clone().into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if server.use_json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
