use anyhow::Result;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use meetpipe::api::{create_router, ApiState};
use meetpipe::config::Config;
use meetpipe::event_log::EventLog;
use meetpipe::llm::GeminiGenerator;
use meetpipe::pipeline::Pipeline;
use meetpipe::sinks::{SimulatedCalendar, WebhookNotifier};
use meetpipe::store::PgMeetingStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting meetpipe");

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let event_log = EventLog::new(&config.event_log_path);
    let generator = Arc::new(GeminiGenerator::new(
        config.gemini_api_key.clone(),
        event_log.clone(),
    ));
    let notifier = Arc::new(WebhookNotifier::new(
        config.discord_webhook_url.clone(),
        event_log.clone(),
    ));
    let pipeline = Arc::new(Pipeline::new(
        generator,
        Arc::new(SimulatedCalendar),
        notifier,
        Arc::new(PgMeetingStore::new(&pool)),
        event_log,
    ));

    let app = create_router(ApiState { pipeline });
    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server stopped: {:?}", e);
    }

    Ok(())
}
