// src/web/envelope.rs

use serde::Serialize;

/// The uniform response wrapper: `{status, message, data}` plus the
/// pagination keys on listing responses. Absent keys are omitted from the
/// JSON, not serialized as null; `data` itself IS null on failures.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
  pub status: bool,
  pub message: String,
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skip: Option<i64>,
}

impl<T: Serialize> Envelope<T> {
  pub fn ok(message: impl Into<String>, data: T) -> Self {
    Self {
      status: true,
      message: message.into(),
      data: Some(data),
      total: None,
      limit: None,
      skip: None,
    }
  }

  pub fn listing(message: impl Into<String>, data: T, total: i64, limit: i64, skip: i64) -> Self {
    Self {
      status: true,
      message: message.into(),
      data: Some(data),
      total: Some(total),
      limit: Some(limit),
      skip: Some(skip),
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      status: false,
      message: message.into(),
      data: None,
      total: None,
      limit: None,
      skip: None,
    }
  }
}
