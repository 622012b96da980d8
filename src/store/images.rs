// src/store/images.rs

//! Image-handling policy shared by the repository backends.
//!
//! A product write never fails because of its photo: uploads that error
//! degrade to the placeholder marker, and deletions of stored images are
//! best-effort (a missing key is already idempotent at the store level,
//! anything else is logged and swallowed).

use tracing::warn;
use uuid::Uuid;

use crate::models::product::{is_stored_image, PLACEHOLDER_IMAGE_URL};

use super::{ImageStore, ImageUpload};

/// Key layout for stored product images.
pub fn product_image_key(filename: &str) -> String {
  format!("products/{}_{}", Uuid::new_v4().simple(), filename)
}

/// Store `upload`, returning the reference on success or the placeholder
/// marker when the upload fails.
pub async fn store_image_or_placeholder(images: &dyn ImageStore, upload: ImageUpload) -> String {
  match images.put(upload).await {
    Ok(reference) => reference,
    Err(e) => {
      warn!(error = %e, "Image upload failed, using placeholder");
      PLACEHOLDER_IMAGE_URL.to_string()
    }
  }
}

/// Delete a previously stored image if `image_url` actually references one.
/// The placeholder marker and empty values never reach the image store.
pub async fn delete_image_best_effort(images: &dyn ImageStore, image_url: Option<&str>) {
  if !is_stored_image(image_url) {
    return;
  }
  let reference = image_url.expect("checked by is_stored_image");
  if let Err(e) = images.delete(reference).await {
    warn!(reference, error = %e, "Old image not deleted, continuing");
  }
}

/// Resolve the `image_url` to persist on an update: a new upload replaces
/// (and best-effort deletes) the previous image; upload failure keeps the
/// previous reference rather than dropping it.
pub async fn replace_image(
  images: &dyn ImageStore,
  previous: Option<&str>,
  new_image: Option<ImageUpload>,
) -> Option<String> {
  let upload = match new_image {
    Some(upload) => upload,
    None => return previous.map(|s| s.to_string()),
  };

  match images.put(upload).await {
    Ok(reference) => {
      delete_image_best_effort(images, previous).await;
      Some(reference)
    }
    Err(e) => {
      warn!(error = %e, "Image upload failed, keeping existing reference");
      previous
        .map(|s| s.to_string())
        .or_else(|| Some(PLACEHOLDER_IMAGE_URL.to_string()))
    }
  }
}
