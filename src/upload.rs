//! Multipart form handling and local image storage.

use std::{collections::HashMap, path::Path};

use axum::{body::Bytes, extract::Multipart};
use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Public URL prefix uploaded files are served under.
pub const UPLOAD_ROUTE: &str = "/upload";

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Text fields plus the optional `image` part of a multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Write the image under `dir` and return its public path, e.g. `/upload/<uuid>.png`.
pub async fn save_image(dir: &Path, image: Option<ImageUpload>) -> AppResult<Option<String>> {
    let Some(image) = image else {
        return Ok(None);
    };

    let is_image = image
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(AppError::BadRequest("Only image files are allowed!".into()));
    }

    fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let stored_name = stored_file_name(image.file_name.as_deref());
    fs::write(dir.join(&stored_name), &image.bytes)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    tracing::debug!(file = %stored_name, size = image.bytes.len(), "image stored");
    Ok(Some(format!("{UPLOAD_ROUTE}/{stored_name}")))
}

fn stored_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_a_sane_extension() {
        let name = stored_file_name(Some("Menu Photo.JPG"));
        assert!(name.ends_with(".jpg"));
        assert!(Uuid::parse_str(name.trim_end_matches(".jpg")).is_ok());
    }

    #[test]
    fn drops_suspicious_extensions() {
        let name = stored_file_name(Some("evil.p/hp"));
        assert!(Uuid::parse_str(&name).is_ok());
        let name = stored_file_name(None);
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[tokio::test]
    async fn rejects_non_images() {
        let dir = std::env::temp_dir().join(format!("forum-upload-{}", Uuid::new_v4()));
        let upload = ImageUpload {
            file_name: Some("notes.txt".into()),
            content_type: Some("text/plain".into()),
            bytes: Bytes::from_static(b"hello"),
        };
        let err = save_image(&dir, Some(upload)).await.unwrap_err();
        assert_eq!(err.to_string(), "Only image files are allowed!");
    }

    #[tokio::test]
    async fn stores_images_and_returns_public_path() {
        let dir = std::env::temp_dir().join(format!("forum-upload-{}", Uuid::new_v4()));
        let upload = ImageUpload {
            file_name: Some("dish.png".into()),
            content_type: Some("image/png".into()),
            bytes: Bytes::from_static(b"\x89PNG"),
        };
        let path = save_image(&dir, Some(upload)).await.unwrap().unwrap();
        assert!(path.starts_with("/upload/"));
        let stored = dir.join(path.trim_start_matches("/upload/"));
        assert_eq!(fs::read(&stored).await.unwrap(), b"\x89PNG");
        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn no_upload_is_not_an_error() {
        let dir = std::env::temp_dir().join("forum-upload-unused");
        assert!(save_image(&dir, None).await.unwrap().is_none());
    }
}
