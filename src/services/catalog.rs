// src/services/catalog.rs

//! The catalog query service.
//!
//! Every operation here maps one validated request onto exactly one
//! repository call and normalizes the outcome into `AppError` signals.
//! Mutating operations check the payload first and the caller's role second;
//! neither check runs after any database write.

use serde::Deserialize;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::{ListFilter, ProductDraft, ProductRepository};
use crate::errors::{AppError, Result};
use crate::models::Product;
use crate::web::auth::Identity;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

fn default_limit() -> i64 {
  3
}

fn default_category() -> String {
  ALL_CATEGORIES.to_string()
}

/// Listing query parameters. Signed on purpose: no upper bound and no
/// non-negativity check is applied; out-of-range values surface as a storage
/// failure, same as any other transport-level problem.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
  #[serde(default = "default_limit")]
  pub limit: i64,
  #[serde(default)]
  pub skip: i64,
  #[serde(default = "default_category")]
  pub category: String,
  #[serde(default)]
  pub q: String,
}

impl Default for ListParams {
  fn default() -> Self {
    Self {
      limit: default_limit(),
      skip: 0,
      category: default_category(),
      q: String::new(),
    }
  }
}

impl ListParams {
  /// Resolves the `"All"` / empty-string sentinels into an actual predicate.
  pub fn filter(&self) -> ListFilter {
    ListFilter {
      category: (self.category != ALL_CATEGORIES).then(|| self.category.clone()),
      q: (!self.q.is_empty()).then(|| self.q.clone()),
    }
  }
}

/// The editable product fields as supplied by the client. Used by create
/// (where `image` is ignored in favor of the server-assigned upload path)
/// and by update (where `image` is written verbatim).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductPayload {
  #[validate(length(min = 1))]
  pub product_name: String,
  pub description: Option<String>,
  pub price: f64,
  pub stock: i32,
  pub image: Option<String>,
  pub brand: Option<String>,
  pub category: Option<String>,
}

#[derive(Debug)]
pub struct ProductListing {
  pub items: Vec<Product>,
  pub total: i64,
  pub limit: i64,
  pub skip: i64,
}

fn validate_payload(payload: &ProductPayload) -> Result<()> {
  payload.validate().map_err(|errors| {
    warn!(validation_errors = %errors, "Product payload failed field validation.");
    AppError::Validation("Invalid data inputs passed".to_string())
  })
}

fn parse_product_id(raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid product id '{}'", raw)))
}

fn product_not_found() -> AppError {
  AppError::NotFound("Product not found".to_string())
}

/// Count and page fetch run over the identical predicate, so `total` is
/// consistent with what pagination is paging over (absent concurrent
/// writes).
#[instrument(name = "catalog::list_products", skip(repo))]
pub async fn list_products(repo: &dyn ProductRepository, params: &ListParams) -> Result<ProductListing> {
  let filter = params.filter();
  let total = repo.count(&filter).await?;
  let items = repo.list(&filter, params.skip, params.limit).await?;
  Ok(ProductListing {
    items,
    total,
    limit: params.limit,
    skip: params.skip,
  })
}

/// Direct lookup; soft-deleted and out-of-stock products are still
/// retrievable here.
#[instrument(name = "catalog::get_product", skip(repo))]
pub async fn get_product(repo: &dyn ProductRepository, raw_id: &str) -> Result<Product> {
  let id = parse_product_id(raw_id)?;
  repo.get(id).await?.ok_or_else(product_not_found)
}

/// Persists a new product. `uploaded_image` is the server-assigned path of
/// the stored upload (None when no file was attached); any `image` value in
/// the payload is ignored.
#[instrument(name = "catalog::create_product", skip(repo, payload, uploaded_image), fields(actor_role = ?identity.role))]
pub async fn create_product(
  repo: &dyn ProductRepository,
  identity: &Identity,
  payload: ProductPayload,
  uploaded_image: Option<String>,
) -> Result<Product> {
  validate_payload(&payload)?;
  identity.require_admin()?;

  let draft = ProductDraft {
    product_name: payload.product_name,
    description: payload.description,
    price: payload.price,
    stock: payload.stock,
    image: uploaded_image,
    brand: payload.brand,
    category: payload.category,
  };
  repo.insert(&draft).await
}

/// Overwrites all editable fields, `image` included, taken verbatim from
/// the payload. Optional fields omitted by the client are written as NULL;
/// there is no partial merge.
#[instrument(name = "catalog::update_product", skip(repo, payload), fields(actor_role = ?identity.role))]
pub async fn update_product(
  repo: &dyn ProductRepository,
  identity: &Identity,
  raw_id: &str,
  payload: ProductPayload,
) -> Result<Product> {
  validate_payload(&payload)?;
  identity.require_admin()?;
  let id = parse_product_id(raw_id)?;

  let draft = ProductDraft {
    product_name: payload.product_name,
    description: payload.description,
    price: payload.price,
    stock: payload.stock,
    image: payload.image,
    brand: payload.brand,
    category: payload.category,
  };
  repo.replace(id, &draft).await?.ok_or_else(product_not_found)
}

/// Flips `is_deleted` on; the only state transition a product ever makes.
/// Applying it to an already-deleted product succeeds again with the flag
/// still set.
#[instrument(name = "catalog::soft_delete_product", skip(repo), fields(actor_role = ?identity.role))]
pub async fn soft_delete_product(repo: &dyn ProductRepository, identity: &Identity, raw_id: &str) -> Result<Product> {
  identity.require_admin()?;
  let id = parse_product_id(raw_id)?;
  repo.soft_delete(id).await?.ok_or_else(product_not_found)
}
