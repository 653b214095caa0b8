// src/web/auth.rs

//! Trusted identity context.
//!
//! Session/token verification happens upstream; by the time a request
//! reaches this service the gateway has attached the verified caller as
//! `X-User-Id` / `X-User-Role` headers. The [`Identity`] extractor turns
//! those into an explicit handler argument so authorization never relies on
//! ambient state.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Admin,
  Customer,
}

impl Role {
  /// Only the exact string `admin` grants the admin role; every other
  /// verified caller is a customer.
  pub fn parse(raw: &str) -> Role {
    if raw == "admin" {
      Role::Admin
    } else {
      Role::Customer
    }
  }

  pub fn is_admin(self) -> bool {
    matches!(self, Role::Admin)
  }
}

#[derive(Debug, Clone)]
pub struct Identity {
  pub user_id: Uuid,
  pub role: Role,
}

impl Identity {
  pub fn require_admin(&self) -> Result<(), AppError> {
    if self.role.is_admin() {
      Ok(())
    } else {
      Err(AppError::Auth("User not authorized".to_string()))
    }
  }
}

impl FromRequest for Identity {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let user_id = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .and_then(|s| Uuid::parse_str(s).ok());
    let role = req
      .headers()
      .get(USER_ROLE_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(Role::parse);

    match (user_id, role) {
      (Some(user_id), Some(role)) => ready(Ok(Identity { user_id, role })),
      _ => {
        warn!("Identity extractor: missing or invalid identity headers.");
        ready(Err(AppError::Auth("Authentication required".to_string())))
      }
    }
  }
}
