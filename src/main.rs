use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gfg_stats::api;
use gfg_stats::app::AppState;
use gfg_stats::model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let stats_service = web::Data::from(state.stats_service);

    tracing::info!("Starting GeeksForGeeks stats server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(stats_service.clone())
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
