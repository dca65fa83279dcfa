mod config;
mod error;
mod routes;
mod state;
mod tasks;
mod trending;

use eyre::WrapErr;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Trending banner server starting...");

    let config = config::Config::from_env().wrap_err("Failed to load banner config")?;
    tracing::info!("Settings: {:?}", config.settings);

    if config.inject_script {
        tasks::inject::run_injection(config.web_path.as_deref(), &config.public_url);
    }

    let trending = trending::TrendingService::new(&config.settings, &config.tmdb_base_url);
    let app_state = state::AppState::new(
        config.catalog_path.clone(),
        config.script_path.clone(),
        trending,
    );

    tasks::catalog::reload_once(&app_state);
    tasks::catalog::start_catalog_reload_task(
        app_state.clone(),
        config.settings.refresh_interval_hours,
    );

    let app = routes::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err("Failed to bind to address")?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!("failed to install SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = sigterm.recv() => {},
        _ = tokio::signal::ctrl_c() => {},
    }
}
