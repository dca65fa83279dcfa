use std::time::Duration;

use crate::state::AppState;

const MIN_REFRESH_INTERVAL_HOURS: u64 = 1;
const MAX_REFRESH_INTERVAL_HOURS: u64 = 24 * 365;

pub(crate) fn start_catalog_reload_task(app_state: AppState, refresh_interval_hours: u64) {
    let interval = refresh_interval(refresh_interval_hours);
    tracing::info!(
        "catalog: reloading {} every {}h",
        app_state.catalog_path.display(),
        interval.as_secs() / 3600
    );

    tokio::spawn(async move {
        run_reload_loop(&app_state, interval).await;
    });
}

async fn run_reload_loop(app_state: &AppState, interval: Duration) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        reload_once(app_state);
    }
}

pub(crate) fn reload_once(app_state: &AppState) {
    match app_state.reload_catalog() {
        Ok(count) if app_state.is_catalog_loaded() => {
            tracing::info!("catalog: loaded {count} movies");
        }
        Ok(_) => tracing::warn!(
            "catalog: {} not found (using empty catalog)",
            app_state.catalog_path.display()
        ),
        Err(e) => tracing::warn!("catalog: reload failed, keeping previous catalog: {e:#}"),
    }
}

fn refresh_interval(hours: u64) -> Duration {
    let hours = hours.clamp(MIN_REFRESH_INTERVAL_HOURS, MAX_REFRESH_INTERVAL_HOURS);
    Duration::from_secs(hours * 3600)
}
