use std::{
    env::{self},
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use nexus_bank::{
    AppState, BankConfig, SessionStore, build_router, graceful_shutdown, logging_middleware,
};

/// The config file read when `--config` is not given, if it exists.
const DEFAULT_CONFIG_PATH: &str = "bank_config.toml";

/// The web server for the NexusBank demo dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a TOML file with the bank branding, demo credentials and seed transactions.
    ///
    /// Defaults to `bank_config.toml` if it exists, otherwise the built-in demo account.
    #[arg(long)]
    config: Option<PathBuf>,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the timezone used to date new transfers, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// How long log-in requests wait before checking the credentials, in milliseconds.
    #[arg(long, default_value_t = 800)]
    log_in_delay_ms: u64,

    /// Sessions unused for this many minutes are removed.
    #[arg(long, default_value_t = 60)]
    session_idle_minutes: i64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let secret = env::var("SECRET").expect("The environment variable 'SECRET' must be set");

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Could not load bank configuration: {error}");
            exit(1);
        }
    };

    let app_state = match AppState::new(
        config,
        &secret,
        &args.timezone,
        std::time::Duration::from_millis(args.log_in_delay_ms),
    ) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not create app state: {error}");
            exit(1);
        }
    };

    tokio::spawn(purge_idle_sessions(
        app_state.sessions.clone(),
        time::Duration::minutes(args.session_idle_minutes),
    ));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn load_config(path: Option<&PathBuf>) -> Result<BankConfig, nexus_bank::Error> {
    match path {
        Some(path) => BankConfig::load(path),
        None if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => {
            BankConfig::load(DEFAULT_CONFIG_PATH)
        }
        None => {
            tracing::info!("No config file found, using the built-in demo account");
            Ok(BankConfig::demo())
        }
    }
}

/// Periodically remove sessions that have been idle for longer than `max_idle`.
async fn purge_idle_sessions(sessions: SessionStore, max_idle: time::Duration) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));

    loop {
        interval.tick().await;

        match sessions.purge_idle(max_idle) {
            Ok(0) => {}
            Ok(count) => tracing::info!("Removed {count} idle sessions"),
            Err(error) => tracing::error!("Could not remove idle sessions: {error}"),
        }
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
