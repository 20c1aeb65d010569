//! Media uploads forwarded to an external object-storage/CDN provider.

use serde::Deserialize;

use crate::config::StorageConfig;
use crate::error::{ AppError, Result };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadedAsset {
    pub secure_url: String,
    pub asset_id: String,
}

#[derive(Deserialize)]
struct ProviderResponse {
    secure_url: String,
    public_id: String,
}

pub struct StorageClient {
    http: reqwest::Client,
    upload_url: Option<String>,
    api_key: String,
    max_image_bytes: usize,
    max_video_bytes: usize,
}

impl StorageClient {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: config.upload_url.clone(),
            api_key: config.api_key.clone(),
            max_image_bytes: config.max_image_bytes,
            max_video_bytes: config.max_video_bytes,
        }
    }

    pub fn check_size(&self, kind: MediaKind, size: usize) -> Result<()> {
        let ceiling = match kind {
            MediaKind::Image => self.max_image_bytes,
            MediaKind::Video => self.max_video_bytes,
        };
        if size > ceiling {
            return Err(
                AppError::Validation(
                    format!("File exceeds the maximum allowed size of {} bytes", ceiling)
                )
            );
        }
        Ok(())
    }

    /// Forward the file to the provider, returning the CDN URL and asset id.
    pub async fn upload(
        &self,
        kind: MediaKind,
        filename: String,
        bytes: Vec<u8>
    ) -> Result<UploadedAsset> {
        self.check_size(kind, bytes.len())?;

        let upload_url = self.upload_url
            .as_ref()
            .ok_or_else(|| AppError::Config("STORAGE_UPLOAD_URL is not configured".to_string()))?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http
            .post(upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send().await
            .map_err(|e| AppError::Storage(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!("Provider returned {}", response.status())));
        }

        let body: ProviderResponse = response
            .json().await
            .map_err(|e| AppError::Storage(format!("Malformed provider response: {}", e)))?;

        Ok(UploadedAsset {
            secure_url: body.secure_url,
            asset_id: body.public_id,
        })
    }
}
