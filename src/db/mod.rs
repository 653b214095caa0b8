// src/db/mod.rs

//! Repository traits over the storage engine.
//!
//! Handlers and services only ever see these traits; the production
//! implementation is [`postgres::PgStore`], and the integration tests supply
//! an in-memory implementation.

pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Product, User};

pub use postgres::PgStore;

/// Resolved listing predicate. Sentinel handling (category `"All"`, empty
/// `q`) happens in the catalog service; a `None` here means "no constraint".
/// Every filter additionally implies `is_deleted = false AND stock > 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
  pub category: Option<String>,
  /// Case-insensitive substring match on `product_name`.
  pub q: Option<String>,
}

/// The seven editable product fields, as written by create and update.
/// Create fills `image` with the server-assigned upload path; update passes
/// the client-supplied value through verbatim.
#[derive(Debug, Clone)]
pub struct ProductDraft {
  pub product_name: String,
  pub description: Option<String>,
  pub price: f64,
  pub stock: i32,
  pub image: Option<String>,
  pub brand: Option<String>,
  pub category: Option<String>,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  /// Count of all products matching `filter`, ignoring pagination.
  async fn count(&self, filter: &ListFilter) -> Result<i64>;

  /// Page of products matching `filter`, newest first, offset by `skip`,
  /// capped at `limit`. Must evaluate the same predicate as [`Self::count`].
  async fn list(&self, filter: &ListFilter, skip: i64, limit: i64) -> Result<Vec<Product>>;

  /// Direct lookup by id. Soft-deleted and out-of-stock products are still
  /// returned here.
  async fn get(&self, id: Uuid) -> Result<Option<Product>>;

  async fn insert(&self, draft: &ProductDraft) -> Result<Product>;

  /// Overwrite all editable fields of an existing product and return the
  /// post-update state. `None` if the id does not resolve.
  async fn replace(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>>;

  /// Atomically set `is_deleted = true` and return the post-update state.
  /// `None` if the id does not resolve. Idempotent.
  async fn soft_delete(&self, id: Uuid) -> Result<Option<Product>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn get(&self, id: Uuid) -> Result<Option<User>>;

  /// Overwrite the user's profile image path and return the post-update
  /// state. `None` if the id does not resolve.
  async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<User>>;
}
