use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metro_tracker::config::AppConfig;
use metro_tracker::refresh::RefreshScheduler;
use metro_tracker::sl::{MockSlClient, SlClient, SlError, Upstream};
use metro_tracker::store::{FileStore, KeyValueStore};
use metro_tracker::web::{AppState, create_router};

const USAGE: &str = "usage: metro-tracker [serve | widget [--watch]]";

/// Which context this process runs.
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Interactive app as an HTTP service.
    Serve,
    /// One widget refresh, or a loop of them.
    Widget { watch: bool },
}

fn parse_mode(args: &[String]) -> Result<Mode, String> {
    match args {
        [] => Ok(Mode::Serve),
        [cmd] if cmd == "serve" => Ok(Mode::Serve),
        [cmd] if cmd == "widget" => Ok(Mode::Widget { watch: false }),
        [cmd, flag] if cmd == "widget" && flag == "--watch" => Ok(Mode::Widget { watch: true }),
        _ => Err(USAGE.to_string()),
    }
}

fn upstream(config: &AppConfig) -> Result<Upstream, SlError> {
    match &config.mock_data {
        Some(dir) => {
            let mock = MockSlClient::new(dir)?;
            info!(dir = %dir.display(), "serving recorded departures");
            Ok(Upstream::Mock(mock))
        }
        None => {
            info!(base_url = %config.sl.base_url, "using live departures API");
            Ok(Upstream::Live(SlClient::new(config.sl.clone())?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so widget output on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,metro_tracker=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_mode(&args)?;

    let config = AppConfig::from_env()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.store_dir));
    info!(store = %config.store_dir.display(), ?mode, "starting");

    let upstream = upstream(&config)?;

    match mode {
        Mode::Serve => serve(config, store, upstream).await,
        Mode::Widget { watch } => widget(config, store, upstream, watch).await,
    }
}

async fn serve(
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    upstream: Upstream,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(store, upstream, config.refresh.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "metro tracker listening");
    info!("GET /health, /stations?q=, /departures/:station, /open?url=, /widget");
    info!("GET|POST /pins, DELETE /pins/:id");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn widget(
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    upstream: Upstream,
    watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = RefreshScheduler::new(store, upstream, config.refresh);

    loop {
        let refresh = scheduler.refresh(Utc::now()).await;
        println!("{}", serde_json::to_string(&refresh)?);

        if !watch {
            return Ok(());
        }

        let wait = (refresh.next_refresh - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        tokio::time::sleep(wait).await;
    }
}
