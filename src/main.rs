use exercise_streaks::{AppConfig, AppState, Clock, FixedClock, SystemClock, load_data, router};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let clock: Arc<dyn Clock> = match config.fixed_today {
        Some(today) => {
            info!("clock pinned to {today}");
            Arc::new(FixedClock::new(today, config.utc_offset))
        }
        None => Arc::new(SystemClock::new(config.utc_offset)),
    };

    let data = load_data(&config.data_path).await;
    let state = AppState::new(config.data_path.clone(), data, clock)
        .with_praise_seed(config.praise_seed);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        "listening on http://{addr} (utc offset {}, data {})",
        config.utc_offset,
        config.data_path.display()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
