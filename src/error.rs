//! Error types for the store, the HTTP layer, configuration, and seeding.
//!
//! `AppError` is what handlers return; it maps onto the status codes clients see.
//! Store failures are logged with detail and reported as an opaque 500.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("database error: {0}")]
  Mongo(#[from] mongodb::error::Error),

  #[error("document decode error: {0}")]
  Decode(#[from] mongodb::bson::de::Error),

  #[error("duplicate word: {0}")]
  DuplicateWord(String),

  #[error("invalid word record: {0}")]
  InvalidRecord(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "msg": msg }))).into_response(),
      AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({ "msg": msg }))).into_response(),
      AppError::Store(e) => {
        error!(target: "yasui_practice", error = %e, "Store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
      }
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("MONGO_URI is not defined. Create a .env file (or export MONGO_URI) with your MongoDB connection string.")]
  MissingMongoUri,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  #[error(transparent)]
  Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_follow_error_kind() {
    let r = AppError::BadRequest("bad".into()).into_response();
    assert_eq!(r.status(), StatusCode::BAD_REQUEST);
    let r = AppError::NotFound("none".into()).into_response();
    assert_eq!(r.status(), StatusCode::NOT_FOUND);
    let r = AppError::Store(StoreError::DuplicateWord("日本".into())).into_response();
    assert_eq!(r.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
