// src/web/handlers/profile_handlers.rs

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::{profile, uploads};
use crate::state::AppState;
use crate::web::auth::Identity;
use crate::web::envelope::Envelope;

#[derive(Debug, MultipartForm)]
pub struct ProfileImageForm {
  pub image: TempFile,
}

#[instrument(name = "handler::get_profile", skip(app_state, identity), fields(user_id = %identity.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  identity: Identity,
) -> Result<HttpResponse, AppError> {
  let user = profile::get_profile(app_state.users.as_ref(), &identity).await?;
  Ok(HttpResponse::Ok().json(Envelope::ok("Profile fetched successfully", user)))
}

#[instrument(name = "handler::update_profile_image", skip(app_state, identity, form), fields(user_id = %identity.user_id))]
pub async fn update_profile_image_handler(
  app_state: web::Data<AppState>,
  identity: Identity,
  MultipartForm(form): MultipartForm<ProfileImageForm>,
) -> Result<HttpResponse, AppError> {
  let stored = uploads::store_upload(&app_state.config.upload_dir, &form.image)?;
  let user = profile::update_profile_image(app_state.users.as_ref(), &identity, &stored).await?;

  info!("Profile image updated for user {}.", user.id);
  Ok(HttpResponse::Ok().json(Envelope::ok("Profile image updated successfully", user)))
}
