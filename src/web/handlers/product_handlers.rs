// src/web/handlers/product_handlers.rs

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::catalog::{self, ListParams, ProductPayload};
use crate::services::uploads;
use crate::state::AppState;
use crate::web::auth::Identity;
use crate::web::envelope::Envelope;

// --- Multipart form for create ---

/// There is no text `image` field here on purpose: create only ever persists
/// the server-assigned path of the attached file.
#[derive(Debug, MultipartForm)]
pub struct CreateProductForm {
  pub product_name: Text<String>,
  pub description: Option<Text<String>>,
  pub price: Text<f64>,
  pub stock: Text<i32>,
  pub image: Option<TempFile>,
  pub brand: Option<Text<String>>,
  pub category: Option<Text<String>>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::list_products", skip(app_state, params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
  let params = params.into_inner();
  let listing = catalog::list_products(app_state.products.as_ref(), &params).await?;

  info!("Listed {} of {} matching products.", listing.items.len(), listing.total);
  Ok(HttpResponse::Ok().json(Envelope::listing(
    "Products listed successfully",
    listing.items,
    listing.total,
    listing.limit,
    listing.skip,
  )))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let raw_id = path.into_inner();
  let product = catalog::get_product(app_state.products.as_ref(), &raw_id).await?;

  info!("Product {} fetched.", product.id);
  Ok(HttpResponse::Ok().json(Envelope::ok("Product fetched successfully", product)))
}

#[instrument(name = "handler::create_product", skip(app_state, identity, form), fields(actor_role = ?identity.role))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  identity: Identity,
  MultipartForm(form): MultipartForm<CreateProductForm>,
) -> Result<HttpResponse, AppError> {
  let CreateProductForm {
    product_name,
    description,
    price,
    stock,
    image,
    brand,
    category,
  } = form;

  // The attachment is persisted before the payload and role checks run, so
  // a rejected create can leave a stored file behind; it never leaves a
  // database record behind.
  let uploaded_image = image
    .map(|file| uploads::store_upload(&app_state.config.upload_dir, &file))
    .transpose()?;

  let payload = ProductPayload {
    product_name: product_name.into_inner(),
    description: description.map(Text::into_inner),
    price: price.into_inner(),
    stock: stock.into_inner(),
    image: None,
    brand: brand.map(Text::into_inner),
    category: category.map(Text::into_inner),
  };

  let product = catalog::create_product(app_state.products.as_ref(), &identity, payload, uploaded_image).await?;

  info!("Product {} created.", product.id);
  Ok(HttpResponse::Created().json(Envelope::ok("Product created successfully", product)))
}

#[instrument(
  name = "handler::update_product",
  skip(app_state, identity, path, payload),
  fields(product_id = %path.as_ref(), actor_role = ?identity.role)
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  identity: Identity,
  path: web::Path<String>,
  payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
  let raw_id = path.into_inner();
  let product = catalog::update_product(app_state.products.as_ref(), &identity, &raw_id, payload.into_inner()).await?;

  info!("Product {} updated.", product.id);
  Ok(HttpResponse::Ok().json(Envelope::ok("Product updated successfully", product)))
}

#[instrument(
  name = "handler::remove_product",
  skip(app_state, identity, path),
  fields(product_id = %path.as_ref(), actor_role = ?identity.role)
)]
pub async fn remove_product_handler(
  app_state: web::Data<AppState>,
  identity: Identity,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let raw_id = path.into_inner();
  let product = catalog::soft_delete_product(app_state.products.as_ref(), &identity, &raw_id).await?;

  info!("Product {} soft deleted.", product.id);
  Ok(HttpResponse::Ok().json(Envelope::ok("Product soft deleted successfully", product)))
}
