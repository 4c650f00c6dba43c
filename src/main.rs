//! YasuiPractice · Vocabulary Quiz Backend
//!
//! - Axum HTTP API (`/api/quiz/generate`, `/api/quiz/validate`)
//! - MongoDB word store, opened once at startup
//!
//! Important env variables:
//!   MONGO_URI         : MongoDB connection string (required)
//!   MONGO_DB          : database name (default "yasui_practice")
//!   PORT              : u16 (default 5000)
//!   QUIZ_CONFIG_PATH  : optional TOML overrides
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use yasui_practice::config::Settings;
use yasui_practice::routes::build_router;
use yasui_practice::state::AppState;
use yasui_practice::store::{MongoWordStore, WordStore};
use yasui_practice::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let _ = dotenvy::dotenv();
  telemetry::init_tracing();

  let settings = Settings::from_env().map_err(|e| {
    error!(target: "yasui_practice", error = %e, "Invalid configuration");
    e
  })?;

  // Serve only once the store is reachable.
  let store = MongoWordStore::connect(&settings).await.map_err(|e| {
    error!(target: "yasui_practice", error = %e, "MongoDB connection error");
    e
  })?;
  match store.count().await {
    Ok(words) => info!(target: "yasui_practice", words, "Word collection ready"),
    Err(e) => warn!(target: "yasui_practice", error = %e, "Could not count words"),
  }
  let state = Arc::new(AppState::new(Arc::new(store)));

  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "yasui_practice", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!(target: "yasui_practice", "Server stopped; word store closed");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      error!(target: "yasui_practice", error = %e, "Failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        error!(target: "yasui_practice", error = %e, "Failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };
  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!(target: "yasui_practice", "Shutdown signal received");
}
