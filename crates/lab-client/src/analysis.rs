//! Disease analysis of a single plant image.

use std::path::Path;

use lab_core::entities::DiseaseAnalysis;

use crate::http::check_response;
use crate::{ApiError, LabClient};

pub const PATH: &str = "/api/disease/detect";

/// MIME type for an image file name, by extension.
fn image_mime(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

impl LabClient {
    /// Upload one image for disease analysis.
    ///
    /// The call is bounded by the configured analysis timeout; running past
    /// it fails with [`ApiError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload fails, the backend rejects the
    /// image, or the response cannot be parsed.
    pub async fn analyze_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<DiseaseAnalysis, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = check_response(
            self.request(reqwest::Method::POST, PATH)
                .multipart(form)
                .timeout(self.analysis_timeout())
                .send()
                .await?,
        )
        .await?;
        Ok(resp.json().await?)
    }

    /// Read an image from disk and upload it for analysis.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the file cannot be read, and
    /// otherwise the same errors as [`LabClient::analyze_image`].
    pub async fn analyze_image_file(&self, path: &Path) -> Result<DiseaseAnalysis, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image");
        self.analyze_image(file_name, bytes).await
    }
}
