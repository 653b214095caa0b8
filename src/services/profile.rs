// src/services/profile.rs

//! Profile operations for the authenticated caller.

use tracing::instrument;

use crate::db::UserRepository;
use crate::errors::{AppError, Result};
use crate::models::User;
use crate::web::auth::Identity;

fn user_not_found() -> AppError {
  AppError::NotFound("User not found".to_string())
}

#[instrument(name = "profile::get_profile", skip(repo), fields(user_id = %identity.user_id))]
pub async fn get_profile(repo: &dyn UserRepository, identity: &Identity) -> Result<User> {
  repo.get(identity.user_id).await?.ok_or_else(user_not_found)
}

/// Overwrites the caller's profile image with the server-assigned path of a
/// freshly stored upload. Any authenticated role may do this; it only ever
/// touches the caller's own record.
#[instrument(name = "profile::update_profile_image", skip(repo, image_path), fields(user_id = %identity.user_id))]
pub async fn update_profile_image(repo: &dyn UserRepository, identity: &Identity, image_path: &str) -> Result<User> {
  repo.set_image(identity.user_id, image_path).await?.ok_or_else(user_not_found)
}
