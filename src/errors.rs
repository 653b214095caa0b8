// src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::web::envelope::Envelope;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authorization Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Upload Error: {0}")]
  Upload(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// The message placed in the client-facing envelope. Internal variants get
  /// a generic message; the real cause only ever reaches the logs.
  pub fn public_message(&self) -> &str {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => m,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Upload(_) | AppError::Internal(_) => {
        "Internal server error"
      }
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in code using `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Upload(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response; the envelope only
    // carries the public message.
    tracing::error!(application_error = %self, "Responding with error envelope");
    HttpResponse::build(self.status_code()).json(Envelope::<serde_json::Value>::failure(self.public_message()))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
