//! Error types for the pdf2xml library.
//!
//! Every failure the client can hit is a [`Pdf2XmlError`] variant: selection
//! problems (the chosen file cannot be read or is not a PDF), wire problems
//! (the backend is unreachable or answered with a non-2xx status), and local
//! problems (the downloaded XML could not be written to disk).
//!
//! The typed error is what the library returns; the interaction layer in
//! [`crate::session`] flattens it onto the fixed user-facing strings of
//! [`crate::messages`], keeping the wording the service UI has always shown
//! independent of how the failure is classified here.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2xml library.
#[derive(Debug, Error)]
pub enum Pdf2XmlError {
    // ── Selection errors ──────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{}'\nCheck the path exists and is readable.", .path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'\nTry: chmod +r {path:?}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// The candidate file does not declare the `application/pdf` MIME type.
    #[error("'{name}' is not a PDF (declared type: {mime})\nThe conversion service only accepts application/pdf uploads.")]
    NotAPdf { name: String, mime: String },

    // ── Configuration errors ──────────────────────────────────────────────
    /// The configured backend origin is not a usable HTTP(S) URL.
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Wire errors ───────────────────────────────────────────────────────
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout).
    #[error("Request to the {endpoint} endpoint failed: {reason}\nCheck that the conversion backend is running and reachable.")]
    RequestFailed {
        endpoint: &'static str,
        reason: String,
    },

    /// The backend refused the upload with a non-2xx status. `detail` carries
    /// the server's own description of the problem when the error body had one.
    #[error("Conversion failed (HTTP {status}): {}", .detail.as_deref().unwrap_or("no detail provided"))]
    ConvertRejected { status: u16, detail: Option<String> },

    /// A follow-up GET answered with a non-2xx status.
    #[error("The {endpoint} endpoint answered HTTP {status}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
    },

    /// The response body could not be read or decoded as the expected shape.
    #[error("Unreadable response from the {endpoint} endpoint: {reason}")]
    BadResponse {
        endpoint: &'static str,
        reason: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the downloaded XML artifact.
    #[error("Failed to write output file '{}': {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2XmlError {
    /// The server-provided failure description, when the backend sent one.
    ///
    /// Only [`Pdf2XmlError::ConvertRejected`] carries a detail; every other
    /// variant returns `None`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Pdf2XmlError::ConvertRejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
