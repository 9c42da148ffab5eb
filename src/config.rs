//! Client configuration.
//!
//! All behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config between a session and a bare [`crate::api::ApiClient`],
//! and to map CLI flags onto it one-for-one.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest; `build()` is the single place where
//! the backend URL is validated.

use crate::error::Pdf2XmlError;

/// Default backend origin, matching the conversion service's development port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for talking to the conversion backend.
///
/// Built via [`ClientConfig::builder()`] or using
/// [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2xml::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://conversion.internal:8000")
///     .request_timeout_secs(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin all three endpoints are resolved against.
    /// Default: `http://localhost:8000`.
    pub base_url: String,

    /// Timeout for the multipart upload in seconds. Default: 120.
    ///
    /// Uploads carry the whole PDF and wait for the server-side conversion to
    /// finish before the response arrives, so they get a far more generous
    /// budget than the follow-up GETs.
    pub upload_timeout_secs: u64,

    /// Timeout for the download/preview/health GETs in seconds. Default: 30.
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_timeout_secs: 120,
            request_timeout_secs: 30,
            user_agent: concat!("pdf2xml/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs.max(1);
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, Pdf2XmlError> {
        let c = &self.config;

        let url = reqwest::Url::parse(&c.base_url).map_err(|e| Pdf2XmlError::InvalidBaseUrl {
            url: c.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Pdf2XmlError::InvalidBaseUrl {
                url: c.base_url.clone(),
                reason: format!("scheme must be http or https, got '{}'", url.scheme()),
            });
        }
        if c.user_agent.is_empty() {
            return Err(Pdf2XmlError::InvalidConfig(
                "User-Agent must not be empty".into(),
            ));
        }

        Ok(self.config)
    }
}
