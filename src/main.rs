// src/main.rs

use dotenvy::dotenv;
use mindscreen::config::Config;
use mindscreen::state::AppState;
use mindscreen::{db, routes};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open the survey database");

    tracing::info!("Database connected...");

    // Bootstrap the schema (idempotent)
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize the survey schema");
    tracing::info!("Schema ready.");

    // Create AppState
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind the listening address");
    tracing::info!("Listening on {}", config.listen_addr);
    tracing::info!("Feedback links point at {}", config.public_base_url);

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
