//! Image uploads for products, variants, categories and brands.
//!
//! Image-bearing resources are saved as `multipart/form-data`: scalar fields
//! become text parts, nested values are sent as JSON text, and each image is a
//! file part.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// An image file to attach to a create or update call.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Wrap in-memory image bytes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Upload` if the extension is not an accepted image
    /// type, or the data is empty or too large.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ApiError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).ok_or_else(|| {
            ApiError::Upload(format!(
                "{file_name}: only jpg, png, webp, gif and avif images are accepted"
            ))
        })?;
        if bytes.is_empty() {
            return Err(ApiError::Upload(format!("{file_name}: file is empty")));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::Upload(format!(
                "{file_name}: larger than {} MB",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Upload` if the file cannot be read or is rejected
    /// by [`ImageUpload::new`].
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Upload(format!("{}: not a file", path.display())))?
            .to_owned();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Upload(format!("{}: {e}", path.display())))?;
        Self::new(file_name, bytes)
    }

    /// File name sent with the part.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type derived from the extension.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.content_type)
            .map_err(|e| ApiError::Upload(e.to_string()))
    }
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Text values for each top-level field of `body`, in serialization order.
///
/// Strings are sent as-is, numbers and booleans via their JSON text, nested
/// arrays and objects as JSON, and nulls are skipped.
pub(crate) fn form_fields<B: Serialize + ?Sized>(
    body: &B,
) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(body)
        .map_err(|e| ApiError::Parse(format!("cannot encode form: {e}")))?;
    let Value::Object(map) = value else {
        return Err(ApiError::Parse("form body must be an object".to_owned()));
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}

/// Build a multipart form from `body`'s fields plus `images` under `field`.
pub(crate) fn multipart_form<B: Serialize + ?Sized>(
    body: &B,
    field: &'static str,
    images: Vec<ImageUpload>,
) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (key, text) in form_fields(body)? {
        form = form.text(key, text);
    }
    for image in images {
        form = form.part(field, image.into_part()?);
    }
    Ok(form)
}
