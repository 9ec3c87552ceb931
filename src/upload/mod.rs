//! Banner image uploads
//!
//! A selected file is checked locally (type allow-list, size ceiling), then
//! posted as multipart form data to an external asset host. A successful
//! upload yields the public URL and the host's opaque asset identifier.
//!
//! Removing an image only forgets it locally; the hosted asset is never
//! deleted.

pub mod transport;
pub mod validation;
pub mod widget;

use serde::{Deserialize, Serialize};

pub use transport::{HttpUploadTransport, TransportError, UploadTransport};
pub use validation::{SelectedFile, validate_file};
pub use widget::{UploadState, UploadWidget};

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Public HTTPS URL of the asset
    pub url: String,

    /// Opaque identifier assigned by the asset host
    pub public_id: String,
}
