use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use weather_slots::{
    admin,
    config::{self, Config},
    routes,
    state::AppState,
    SeaOrmStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(config::log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .init();

    let config = Config::from_env()?;
    info!(?config, "loaded configuration");

    // Ready before we accept a single request.
    let state = AppState::connect(&config).await?;

    let cleanup = tokio::spawn(
        SeaOrmStore::new(state.db.clone()).delete_expired_every(Duration::from_secs(60 * 60)),
    );

    let shutdown = CancellationToken::new();
    if config.admin_console {
        tokio::spawn(admin::run_console(
            admin::spawn_stdin_reader(),
            state.clone(),
            shutdown.clone(),
        ));
    }

    let app = routes::app(state, &config)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web server started and running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(admin::shutdown_signal(shutdown))
        .await?;

    cleanup.abort();
    info!("server shut down");
    Ok(())
}
