//! Client-side checks run before any network call

use crate::config::UploadConfig;
use crate::core::error::UploadError;

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Check the type allow-list, then the size ceiling.
///
/// The first failing check wins. A file of exactly the ceiling passes.
pub fn validate_file(file: &SelectedFile, config: &UploadConfig) -> Result<(), UploadError> {
    if !config.allowed_types.iter().any(|t| t == &file.mime_type) {
        return Err(UploadError::InvalidType {
            mime_type: file.mime_type.clone(),
        });
    }

    if file.size() > config.max_file_size {
        return Err(UploadError::TooLarge {
            size: file.size(),
            max_megabytes: config.max_megabytes(),
        });
    }

    Ok(())
}
