// src/web/routes.rs

use actix_multipart::form::MultipartFormConfig;
use actix_multipart::MultipartError;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};

use super::handlers::{product_handlers, profile_handlers};
use crate::errors::AppError;

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Extractor failures bypass handler bodies, so each payload extractor gets
// an error handler that folds the failure into the standard envelope.

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(payload_error = %err, "Rejected malformed JSON body.");
  AppError::Validation("Invalid data inputs passed".to_string()).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(payload_error = %err, "Rejected malformed query string.");
  AppError::Validation("Invalid query parameters".to_string()).into()
}

fn multipart_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(payload_error = %err, "Rejected malformed multipart payload.");
  AppError::Validation("Invalid data inputs passed".to_string()).into()
}

/// Called from `main.rs` (and the integration tests) to configure services
/// for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(MultipartFormConfig::default().error_handler(multipart_error_handler))
    // Health Check Route
    .route("/health", web::get().to(health_check_handler))
    // Catalog Routes
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/{id}", web::get().to(product_handlers::get_product_handler))
        .route("/{id}", web::put().to(product_handlers::update_product_handler))
        .route("/{id}", web::delete().to(product_handlers::remove_product_handler)),
    )
    // Profile Routes
    .service(
      web::scope("/profile")
        .route("", web::get().to(profile_handlers::get_profile_handler))
        .route("/image", web::put().to(profile_handlers::update_profile_image_handler)),
    );
}
