// src/services/uploads.rs

//! Persists multipart uploads under the configured upload directory.
//!
//! The stored path is what handlers thread into the catalog and profile
//! services as the server-assigned `image` value.

use std::fs;
use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};

#[instrument(name = "uploads::store_upload", skip(file), fields(original_name = ?file.file_name, size = file.size))]
pub fn store_upload(upload_dir: &Path, file: &TempFile) -> Result<String> {
  fs::create_dir_all(upload_dir)
    .map_err(|e| AppError::Upload(format!("Failed to create upload directory: {}", e)))?;

  let stored_name = match sanitized_extension(file.file_name.as_deref()) {
    Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
    None => Uuid::new_v4().to_string(),
  };
  let dest = upload_dir.join(&stored_name);

  fs::copy(file.file.path(), &dest).map_err(|e| AppError::Upload(format!("Failed to persist upload: {}", e)))?;

  info!("Stored upload at {}", dest.display());
  Ok(dest.to_string_lossy().into_owned())
}

/// Keeps a short alphanumeric extension from the client-supplied file name;
/// everything else about that name is untrusted and discarded.
fn sanitized_extension(file_name: Option<&str>) -> Option<String> {
  let ext = Path::new(file_name?).extension()?.to_str()?;
  if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
    Some(ext.to_ascii_lowercase())
  } else {
    None
  }
}
