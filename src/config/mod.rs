//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One mebibyte, the unit upload ceilings are quoted in
pub const MIB: u64 = 1024 * 1024;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for banner uploads to the external asset host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Endpoint receiving the multipart POST
    pub url: String,

    /// Unsigned upload preset sent alongside the file
    pub preset: String,

    /// Largest accepted file, in bytes
    pub max_file_size: u64,

    /// Accepted MIME types
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: "https://api.cloudinary.com/v1_1/demo/image/upload".to_string(),
            preset: "campus_unsigned".to_string(),
            max_file_size: 3 * MIB,
            allowed_types: vec![
                "image/png".to_string(),
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

impl UploadConfig {
    /// Ceiling expressed in megabytes, for user-facing messages.
    ///
    /// Loaded configurations always hold a whole number of MiB; a partial
    /// MiB built by hand is rounded up so the figure is never below the
    /// real limit.
    pub fn max_megabytes(&self) -> u64 {
        self.max_file_size.div_ceil(MIB)
    }

    /// Value for an HTML `accept` attribute
    pub fn accept_attribute(&self) -> String {
        self.allowed_types.join(",")
    }
}

/// List view defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub pagination: PaginationConfig,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CAMPUS_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("CAMPUS_UPLOAD_URL") {
            self.upload.url = url;
        }
        if let Some(preset) = lookup("CAMPUS_UPLOAD_PRESET") {
            self.upload.preset = preset;
        }
        if let Some(host) = lookup("CAMPUS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CAMPUS_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CAMPUS_PORT".to_string(),
                message: format!("'{}' is not a port number", port),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "upload.max_file_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.upload.max_file_size % MIB != 0 {
            return Err(ConfigError::InvalidValue {
                key: "upload.max_file_size".to_string(),
                message: format!("must be a whole number of MiB ({} bytes each)", MIB),
            });
        }
        if self.upload.allowed_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "upload.allowed_types".to_string(),
                message: "must list at least one MIME type".to_string(),
            });
        }
        if self.pagination.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pagination.default_page_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
