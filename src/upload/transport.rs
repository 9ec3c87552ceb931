//! Transport to the external asset host

use super::UploadedImage;
use super::validation::SelectedFile;
use crate::config::UploadConfig;
use async_trait::async_trait;
use serde::Deserialize;

/// Why an upload did not produce an image.
///
/// These are logged but never shown to users, who get one generic message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("asset host answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("asset host response is missing '{0}'")]
    MissingField(&'static str),

    #[error("transport error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("failed to decode asset host response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid upload request: {0}")]
    Request(String),
}

/// Something that can push a file to the asset host
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload `file` using the unsigned `preset`
    async fn upload(&self, file: &SelectedFile, preset: &str) -> Result<UploadedImage, TransportError>;
}

/// Shape of the asset host's JSON answer; only these two fields matter
#[derive(Debug, Deserialize)]
struct AssetHostResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    public_id: Option<String>,
}

impl AssetHostResponse {
    fn into_image(self) -> Result<UploadedImage, TransportError> {
        let url = self
            .secure_url
            .filter(|s| !s.is_empty())
            .ok_or(TransportError::MissingField("secure_url"))?;
        let public_id = self
            .public_id
            .filter(|s| !s.is_empty())
            .ok_or(TransportError::MissingField("public_id"))?;
        Ok(UploadedImage { url, public_id })
    }
}

/// Multipart HTTP transport
///
/// Sends `file` (the raw bytes, with the original filename and MIME type)
/// and `upload_preset` as form fields in a single POST.
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploadTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Transport targeting the configured endpoint
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.url.clone())
    }

    /// Reuse an existing client (connection pool, proxies, timeouts)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn upload(&self, file: &SelectedFile, preset: &str) -> Result<UploadedImage, TransportError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response
            .json::<AssetHostResponse>()
            .await
            .map_err(TransportError::Decode)?;

        body.into_image()
    }
}
