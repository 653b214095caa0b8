// src/main.rs

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use storefront::config::AppConfig;
use storefront::db::PgStore;
use storefront::state::AppState;
use storefront::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront backend server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Initialize Database Pool
  let db_pool = match PgPool::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  // Apply embedded schema migrations
  if app_config.run_migrations {
    match sqlx::migrate!("./migrations").run(&db_pool).await {
      Ok(()) => tracing::info!("Database migrations applied."),
      Err(e) => {
        tracing::error!(error = %e, "Failed to apply database migrations.");
        panic!("Migration error: {}", e);
      }
    }
  }

  // Create AppState; the PgStore serves both repositories
  let store = Arc::new(PgStore::new(db_pool));
  let app_state = AppState {
    products: store.clone(),
    users: store,
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
