//! Typed records for the conversion backend's JSON bodies.
//!
//! The backend's responses are small dynamic JSON objects; each one gets an
//! explicit serde record here rather than an untyped `serde_json::Value`, so
//! shape mismatches surface as decode errors at the wire instead of `None`
//! lookups deep in the session. Only `xml_file` and `xml_content` are
//! contractual; the remaining fields are extra context some backend versions
//! include and are therefore optional.

use serde::{Deserialize, Serialize};

/// Success body of `POST /convert-pdf-to-xml`.
///
/// `xml_file` names the server-side artifact and is the key for the follow-up
/// download and preview requests; it must be passed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversionResult {
    /// Name of the generated XML artifact on the server.
    pub xml_file: String,

    /// e.g. `"success"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Human-readable confirmation, e.g. `"PDF converted successfully"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Server-relative download path, e.g. `"/download/report.xml"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Success body of `GET /preview/{xml_file}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewResponse {
    /// The artifact's raw XML text.
    pub xml_content: String,
}

/// Success body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// e.g. `"healthy"`.
    pub status: String,
}

/// Error body the backend attaches to non-2xx responses.
///
/// `detail` is optional: transport intermediaries and crashed handlers
/// produce bodies without one, and the client must cope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
