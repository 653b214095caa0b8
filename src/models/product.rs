// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog product. Rows are never physically removed; `is_deleted` marks
/// a product inactive and excludes it from listings while keeping it
/// retrievable by direct id lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub product_name: String,
  pub description: Option<String>,
  /// Currency-agnostic. No floor is enforced anywhere; negative values are
  /// stored as supplied.
  pub price: f64,
  pub stock: i32,
  pub image: Option<String>,
  pub brand: Option<String>,
  pub category: Option<String>,
  pub is_deleted: bool,
  /// Assigned once at creation and used as the sole listing sort key.
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
