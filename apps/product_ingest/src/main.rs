// apps/product_ingest/src/main.rs

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use product_ingest::startup::connect_products_table;
use product_ingest::web::{configure_app_routes, payload_config};
use product_ingest::{AppConfig, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  // LOG_FORMAT=json for log shippers; human-readable otherwise.
  if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
    subscriber.json().init();
  } else {
    subscriber.init();
  }

  tracing::info!("Starting product ingest server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e).context("configuration error");
    }
  };

  // The one table handle every request shares.
  let products = match connect_products_table(&app_config).await {
    Ok(table) => {
      tracing::info!(table = %table.table_name(), "Products table is ready.");
      table
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize the table store.");
      return Err(e).context("table store initialization error");
    }
  };

  let app_state = AppState {
    products,
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  let max_payload_bytes = app_config.max_payload_bytes;
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .app_data(payload_config(max_payload_bytes))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await
  .context("server terminated with an error")
}
