//! Wire client for the three conversion endpoints.
//!
//! [`ApiClient`] is intentionally thin: it owns one [`reqwest::Client`], maps
//! each endpoint to a typed request/response pair, and classifies failures
//! into [`Pdf2XmlError`] variants. All interaction-state bookkeeping (what is
//! selected, what to show the user) lives in [`crate::session`] so the wire
//! layer can be used standalone, e.g. by the CLI's health probe.
//!
//! ## Filename handling
//!
//! The `{xml_file}` value in the download/preview paths is taken verbatim
//! from a prior convert response and inserted as a single percent-encoded
//! path segment. Encoding is the only treatment it gets: a separator or
//! dot-dot inside the name cannot address a different endpoint, but the value
//! itself is passed through untouched.

use crate::config::ClientConfig;
use crate::error::Pdf2XmlError;
use crate::input::SelectedFile;
use crate::protocol::{ConversionResult, ErrorBody, HealthResponse, PreviewResponse};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client bound to one conversion backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    upload_timeout: Duration,
}

impl ApiClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    /// [`Pdf2XmlError::InvalidBaseUrl`] when the configured origin does not
    /// parse as an http(s) URL.
    pub fn new(config: &ClientConfig) -> Result<Self, Pdf2XmlError> {
        let base = Url::parse(&config.base_url).map_err(|e| Pdf2XmlError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Pdf2XmlError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("scheme must be http or https, got '{}'", base.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Pdf2XmlError::Internal(format!("building HTTP client: {e}")))?;

        Ok(Self {
            http,
            base,
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
        })
    }

    /// The backend origin this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Upload a PDF as multipart field `file` and decode the conversion result.
    ///
    /// # Errors
    /// - [`Pdf2XmlError::RequestFailed`] — no HTTP response at all
    /// - [`Pdf2XmlError::ConvertRejected`] — non-2xx status, with the server's
    ///   `detail` when the error body carried one
    /// - [`Pdf2XmlError::BadResponse`] — 2xx but an undecodable body
    pub async fn convert(&self, file: &SelectedFile) -> Result<ConversionResult, Pdf2XmlError> {
        let url = self.endpoint(&["convert-pdf-to-xml"])?;
        info!(
            "Uploading '{}' ({} bytes) to {}",
            file.name,
            file.size(),
            url
        );

        let part = Part::stream(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.declared_mime)
            .map_err(|e| Pdf2XmlError::Internal(format!("invalid MIME string: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| Pdf2XmlError::RequestFailed {
                endpoint: "convert",
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: the detail is optional and the body may not even
            // be JSON (e.g. a proxy's HTML error page).
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(Pdf2XmlError::ConvertRejected {
                status: status.as_u16(),
                detail,
            });
        }

        let result =
            response
                .json::<ConversionResult>()
                .await
                .map_err(|e| Pdf2XmlError::BadResponse {
                    endpoint: "convert",
                    reason: e.to_string(),
                })?;
        info!("Conversion succeeded: {}", result.xml_file);
        Ok(result)
    }

    /// Fetch the generated XML artifact as raw bytes.
    pub async fn download(&self, xml_file: &str) -> Result<Bytes, Pdf2XmlError> {
        let url = self.endpoint(&["download", xml_file])?;
        debug!("Downloading {}", url);

        let response = self.get(url, "download").await?;
        response
            .bytes()
            .await
            .map_err(|e| Pdf2XmlError::BadResponse {
                endpoint: "download",
                reason: e.to_string(),
            })
    }

    /// Fetch the artifact's XML text for in-page preview.
    pub async fn preview(&self, xml_file: &str) -> Result<PreviewResponse, Pdf2XmlError> {
        let url = self.endpoint(&["preview", xml_file])?;
        debug!("Fetching preview {}", url);

        let response = self.get(url, "preview").await?;
        response
            .json::<PreviewResponse>()
            .await
            .map_err(|e| Pdf2XmlError::BadResponse {
                endpoint: "preview",
                reason: e.to_string(),
            })
    }

    /// Probe the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthResponse, Pdf2XmlError> {
        let url = self.endpoint(&["health"])?;
        let response = self.get(url, "health").await?;
        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| Pdf2XmlError::BadResponse {
                endpoint: "health",
                reason: e.to_string(),
            })
    }

    /// Issue a GET and translate transport errors / non-2xx statuses.
    async fn get(
        &self,
        url: Url,
        endpoint: &'static str,
    ) -> Result<reqwest::Response, Pdf2XmlError> {
        let response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|e| Pdf2XmlError::RequestFailed {
                    endpoint,
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Pdf2XmlError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Resolve an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Pdf2XmlError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Pdf2XmlError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: "cannot be used as a base URL".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
